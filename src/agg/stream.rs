use super::{
    histogram::StreakHistogram,
    streak::{CustomerStreaks, StreakTracker},
    unique::UniqueDayCounter,
    window::{DayStats, WindowedCounter},
};
use crate::{Config, Error, Record};
use chrono::NaiveDate;

/// Position of the aggregator in the record stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Cursor {
    /// No record consumed yet
    BeforeStart,

    /// Accumulating records of `date`
    InDay { date: NaiveDate, count: u64 },

    /// Stream exhausted, last day flushed
    Done,
}

/// Results of an aggregation pass.
#[derive(Clone, Debug, PartialEq)]
pub struct Analytics {
    /// Day whose distinct customers were counted
    pub target_day: NaiveDate,

    /// Distinct customers on `target_day`
    pub unique_count: usize,

    /// Streaks of every customer seen inside the tracked range, in first-seen order
    pub streaks: Vec<CustomerStreaks>,

    /// Every day of the input, in date order
    pub days: Vec<(NaiveDate, DayStats)>,

    /// Distribution of streak lengths across all customers
    pub histogram: StreakHistogram,

    /// Number of days in the tracked range
    pub range_days: u32,
}

impl Analytics {
    /// Returns the streak lengths of a customer.
    #[must_use]
    pub fn streaks_of(&self, customer_id: &str) -> Option<&[u32]> {
        self.streaks
            .iter()
            .find(|s| s.customer_id == customer_id)
            .map(|s| s.lengths.as_slice())
    }

    /// Iterates the moving average of every day.
    pub fn moving_averages(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.days
            .iter()
            .map(|(date, stats)| (*date, stats.moving_average))
    }
}

/// Single-pass streaming aggregator
///
/// Takes in date-ordered records one at a time, and produces all analytics once the stream ends.
///
/// A change of date closes out the previous day: its count is handed to the moving average.
/// The first record after the tracked range (or the end of the stream, whichever comes first)
/// closes every open streak.
pub struct Aggregator<'a> {
    config: &'a Config,
    cursor: Cursor,

    /// Records consumed so far
    position: u64,

    streaks: StreakTracker,
    window: WindowedCounter,
    unique: UniqueDayCounter,
}

impl<'a> Aggregator<'a> {
    /// Creates an aggregator with empty state.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            cursor: Cursor::BeforeStart,
            position: 0,
            streaks: StreakTracker::new(),
            window: WindowedCounter::new(config.window_size()),
            unique: UniqueDayCounter::new(config.target_day()),
        }
    }

    /// Consumes the next record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfOrderInput`] if the record is dated before its predecessor.
    /// The aggregator state is left untouched in that case.
    pub fn push(&mut self, record: &Record) -> crate::Result<()> {
        let date = record.date;

        match self.cursor {
            Cursor::BeforeStart => {
                self.enter_day(date);
            }
            Cursor::InDay { date: current, .. } if date < current => {
                return Err(Error::OutOfOrderInput {
                    record: Some(self.position + 1),
                    date,
                    previous: current,
                });
            }
            Cursor::InDay {
                date: current,
                count,
            } => {
                if date != current {
                    // NOTE: New day, so the previous one is complete
                    self.window.observe(current, count);
                    self.enter_day(date);
                }
            }
            Cursor::Done => unreachable!("aggregator is consumed when finished"),
        }

        self.position += 1;

        if let Cursor::InDay { count, .. } = &mut self.cursor {
            *count += 1;
        }

        self.unique.observe(&record.customer_id, date);

        if self.config.in_range(date) {
            self.streaks.record(&record.customer_id, date)?;
        }

        Ok(())
    }

    fn enter_day(&mut self, date: NaiveDate) {
        if date > self.config.end_date() && !self.streaks.is_closed() {
            log::debug!("reached {date}, tracked range is over");
            self.streaks.close_all();
        }

        self.cursor = Cursor::InDay { date, count: 0 };
    }

    /// Flushes the last day and any open streaks, and assembles the results.
    #[must_use]
    pub fn finish(mut self) -> Analytics {
        if let Cursor::InDay { date, count } = std::mem::replace(&mut self.cursor, Cursor::Done) {
            // NOTE: Flush last day
            self.window.observe(date, count);
        }

        if !self.streaks.is_closed() {
            log::debug!("end of stream inside tracked range, closing open streaks");
            self.streaks.close_all();
        }

        let streaks = self.streaks.into_streaks();

        let histogram = streaks
            .iter()
            .flat_map(|s| s.lengths.iter().copied())
            .collect::<StreakHistogram>();

        let days = self.window.into_days();

        log::debug!(
            "aggregated {} records over {} days, {} customers tracked",
            self.position,
            days.len(),
            streaks.len(),
        );

        Analytics {
            target_day: self.unique.target_day(),
            unique_count: self.unique.unique_count(),
            streaks,
            days,
            histogram,
            range_days: self.config.range_days(),
        }
    }
}

/// Runs a full aggregation pass over `records`.
///
/// # Errors
///
/// Returns the first error yielded by `records`, or an error if the records are not in date order.
pub fn aggregate<I>(config: &Config, records: I) -> crate::Result<Analytics>
where
    I: IntoIterator<Item = crate::Result<Record>>,
{
    let mut aggregator = Aggregator::new(config);

    for record in records {
        aggregator.push(&record?)?;
    }

    Ok(aggregator.finish())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use test_log::test;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, d).unwrap()
    }

    fn config(start: u32, end: u32, window: usize, target: u32) -> Config {
        Config::builder()
            .start_date(day(start))
            .end_date(day(end))
            .window_size(window)
            .target_day(day(target))
            .build()
            .unwrap()
    }

    fn run(config: &Config, records: &[(&str, u32)]) -> crate::Result<Analytics> {
        aggregate(
            config,
            records
                .iter()
                .map(|&(customer, d)| Ok(Record::new(customer, day(d)))),
        )
    }

    #[test]
    fn empty_input() -> crate::Result<()> {
        let analytics = run(&config(1, 5, 3, 2), &[])?;

        assert_eq!(0, analytics.unique_count);
        assert!(analytics.streaks.is_empty());
        assert!(analytics.days.is_empty());
        assert!(analytics.histogram.is_empty());

        Ok(())
    }

    #[test]
    fn streaks_closed_by_next_day_after_range() -> crate::Result<()> {
        let analytics = run(
            &config(1, 5, 1, 1),
            &[("a", 1), ("a", 2), ("a", 4), ("b", 6), ("a", 7)],
        )?;

        assert_eq!(Some(&[2, 1][..]), analytics.streaks_of("a"));
        assert_eq!(None, analytics.streaks_of("b"));
        assert_eq!(Some(&1), analytics.histogram.get(&2));
        assert_eq!(Some(&1), analytics.histogram.get(&1));
        assert_eq!(2, analytics.histogram.total());

        Ok(())
    }

    #[test]
    fn streaks_closed_at_end_of_stream() -> crate::Result<()> {
        let analytics = run(&config(1, 5, 1, 1), &[("a", 1), ("a", 2), ("a", 4), ("a", 5)])?;

        assert_eq!(Some(&[2, 2][..]), analytics.streaks_of("a"));

        Ok(())
    }

    #[test]
    fn streaks_closed_when_day_after_range_is_skipped() -> crate::Result<()> {
        let analytics = run(&config(1, 3, 1, 1), &[("a", 2), ("a", 3), ("b", 9), ("a", 10)])?;

        assert_eq!(Some(&[2][..]), analytics.streaks_of("a"));
        assert_eq!(1, analytics.streaks.len());

        Ok(())
    }

    #[test]
    fn records_before_range_do_not_count() -> crate::Result<()> {
        let analytics = run(&config(3, 5, 1, 1), &[("a", 1), ("a", 2), ("a", 3), ("a", 4)])?;

        assert_eq!(Some(&[2][..]), analytics.streaks_of("a"));
        assert_eq!(4, analytics.days.len());

        Ok(())
    }

    #[test]
    fn daily_counts_and_moving_average() -> crate::Result<()> {
        let mut records = vec![];
        for (d, count) in [(1, 4), (2, 6), (3, 5), (4, 7)] {
            for i in 0..count {
                records.push((["a", "b", "c", "d", "e", "f", "g"][i], d));
            }
        }

        let analytics = run(&config(1, 4, 3, 3), &records)?;

        assert_eq!(
            vec![
                (day(1), None),
                (day(2), None),
                (day(3), Some(5.0)),
                (day(4), Some(6.0)),
            ],
            analytics.moving_averages().collect::<Vec<_>>(),
        );
        assert_eq!(
            vec![4, 6, 5, 7],
            analytics.days.iter().map(|(_, s)| s.count).collect::<Vec<_>>(),
        );
        assert_eq!(5, analytics.unique_count);

        Ok(())
    }

    #[test]
    fn unique_count_ignores_repeat_records() -> crate::Result<()> {
        let analytics = run(
            &config(1, 5, 2, 2),
            &[("a", 1), ("a", 2), ("b", 2), ("a", 2), ("c", 3)],
        )?;

        assert_eq!(2, analytics.unique_count);
        assert_eq!(day(2), analytics.target_day);
        assert_eq!(
            vec![1, 3, 1],
            analytics.days.iter().map(|(_, s)| s.count).collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test]
    fn out_of_order_is_rejected() {
        let result = run(&config(1, 5, 1, 1), &[("a", 1), ("b", 3), ("c", 2)]);

        assert!(matches!(
            result,
            Err(Error::OutOfOrderInput {
                record: Some(3),
                ..
            })
        ));
    }

    #[test]
    fn source_error_aborts() {
        let records = vec![
            Ok(Record::new("a", day(1))),
            Err(Error::MalformedRecord {
                line: 3,
                reason: "bad".into(),
            }),
            Ok(Record::new("a", day(2))),
        ];

        assert!(matches!(
            aggregate(&config(1, 5, 1, 1), records),
            Err(Error::MalformedRecord { line: 3, .. })
        ));
    }

    #[test]
    fn histogram_total_matches_streak_count() -> crate::Result<()> {
        let analytics = run(
            &config(1, 10, 2, 1),
            &[
                ("a", 1),
                ("b", 1),
                ("a", 2),
                ("c", 2),
                ("b", 3),
                ("a", 5),
                ("c", 5),
                ("a", 6),
                ("b", 8),
                ("b", 9),
                ("b", 10),
            ],
        )?;

        let streaks = analytics
            .streaks
            .iter()
            .map(|s| s.lengths.len() as u64)
            .sum::<u64>();

        assert_eq!(streaks, analytics.histogram.total());
        assert_eq!(Some(&[2, 2][..]), analytics.streaks_of("a"));
        assert_eq!(Some(&[1, 1, 3][..]), analytics.streaks_of("b"));
        assert_eq!(Some(&[1, 1][..]), analytics.streaks_of("c"));
        assert_eq!(10, analytics.range_days);

        Ok(())
    }

    #[test]
    fn demo_log() -> crate::Result<()> {
        use crate::source::CsvSource;
        use std::path::Path;

        let root = Path::new(env!("CARGO_MANIFEST_DIR"));

        let config = Config::load(root.join("demo/config.cfg"))?;
        let analytics = aggregate(&config, CsvSource::open(root.join("demo/brews.csv"))?)?;

        assert_eq!(5, analytics.unique_count);

        assert_eq!(
            vec![
                ("alice", vec![2, 1]),
                ("bob", vec![4]),
                ("carol", vec![2]),
                ("dave", vec![1]),
                ("erin", vec![3]),
                ("frank", vec![3]),
                ("gina", vec![2]),
                ("henry", vec![2]),
                ("ivan", vec![1]),
            ],
            analytics
                .streaks
                .iter()
                .map(|s| (s.customer_id.as_str(), s.lengths.clone()))
                .collect::<Vec<_>>(),
        );

        assert_eq!(
            vec![None, None, Some(5.0), Some(6.0), Some(14.0 / 3.0)],
            analytics
                .moving_averages()
                .map(|(_, avg)| avg)
                .collect::<Vec<_>>(),
        );

        assert_eq!(
            vec![(1, 3), (2, 4), (3, 2), (4, 1), (5, 0)],
            analytics.histogram.dense(analytics.range_days).collect::<Vec<_>>(),
        );

        Ok(())
    }

    #[test]
    fn idempotent() -> crate::Result<()> {
        let config = config(1, 4, 2, 2);
        let records = [("x", 1), ("y", 1), ("x", 2), ("y", 4), ("x", 4), ("z", 5)];

        assert_eq!(run(&config, &records)?, run(&config, &records)?);

        Ok(())
    }
}
