use chrono::NaiveDate;
use std::{collections::VecDeque, num::NonZeroUsize};

/// Activity of a single day.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DayStats {
    /// Number of records on that day
    pub count: u64,

    /// Mean count of the window ending on that day; absent until the window is full
    pub moving_average: Option<f64>,
}

/// Sliding-window moving average over daily record counts.
///
/// Each update is O(1): the window keeps a running sum, and the oldest count is
/// subtracted when it falls out.
#[derive(Debug)]
pub struct WindowedCounter {
    window_size: NonZeroUsize,
    window: VecDeque<u64>,
    sum: u64,
    days: Vec<(NaiveDate, DayStats)>,
}

impl WindowedCounter {
    /// Creates a counter averaging over `window_size` days.
    #[must_use]
    pub fn new(window_size: NonZeroUsize) -> Self {
        Self {
            window_size,
            window: VecDeque::with_capacity(window_size.get() + 1),
            sum: 0,
            days: Vec::new(),
        }
    }

    /// Adds the final count of a completed day, returning the day's moving average.
    ///
    /// Days must be observed in date order, each exactly once.
    #[allow(clippy::cast_precision_loss)]
    pub fn observe(&mut self, day: NaiveDate, count: u64) -> Option<f64> {
        let window_size = self.window_size.get();

        self.window.push_back(count);
        self.sum += count;

        if self.window.len() > window_size {
            if let Some(evicted) = self.window.pop_front() {
                self.sum -= evicted;
            }
        }

        let moving_average =
            (self.window.len() == window_size).then(|| self.sum as f64 / window_size as f64);

        log::trace!("day {day}: count={count} avg={moving_average:?}");

        self.days.push((
            day,
            DayStats {
                count,
                moving_average,
            },
        ));

        moving_average
    }

    /// Days observed so far, in observation order.
    #[must_use]
    pub fn days(&self) -> &[(NaiveDate, DayStats)] {
        &self.days
    }

    /// Consumes the counter, returning all observed days.
    #[must_use]
    pub fn into_days(self) -> Vec<(NaiveDate, DayStats)> {
        self.days
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn window(n: usize) -> WindowedCounter {
        WindowedCounter::new(NonZeroUsize::new(n).unwrap())
    }

    #[test]
    fn averages_after_window_fills() {
        let mut counter = window(3);

        let averages = [4, 6, 5, 7]
            .into_iter()
            .zip(1..)
            .map(|(count, d)| counter.observe(day(d), count))
            .collect::<Vec<_>>();

        assert_eq!(vec![None, None, Some(5.0), Some(6.0)], averages);
        assert_eq!(4, counter.days().len());
    }

    #[test]
    fn window_of_one_is_identity() {
        let mut counter = window(1);

        assert_eq!(Some(3.0), counter.observe(day(1), 3));
        assert_eq!(Some(9.0), counter.observe(day(2), 9));
        assert_eq!(Some(1.0), counter.observe(day(3), 1));
    }

    #[test]
    fn matches_naive_mean() {
        let counts = [3_u64, 1, 4, 1, 5, 9, 2, 6, 5, 3, 5, 8, 9, 7, 9];
        let w = 4;

        let mut counter = window(w);
        for (d, &count) in (1..).zip(&counts) {
            counter.observe(day(d), count);
        }

        for (k, (_, stats)) in counter.into_days().into_iter().enumerate() {
            if k + 1 < w {
                assert_eq!(None, stats.moving_average, "day {k}");
            } else {
                let expected = counts[k + 1 - w..=k].iter().sum::<u64>() as f64 / w as f64;
                assert_eq!(Some(expected), stats.moving_average, "day {k}");
            }
        }
    }

    #[test]
    fn fewer_days_than_window() {
        let mut counter = window(7);
        counter.observe(day(1), 10);
        counter.observe(day(2), 20);

        assert!(counter
            .days()
            .iter()
            .all(|(_, stats)| stats.moving_average.is_none()));
    }
}
