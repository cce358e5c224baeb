use std::collections::BTreeMap;

/// Distribution of streak lengths: maps each length to the number of streaks that long.
///
/// Only lengths that occurred are stored; see [`StreakHistogram::dense`] for a gap-free view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StreakHistogram(BTreeMap<u32, u64>);

impl std::ops::Deref for StreakHistogram {
    type Target = BTreeMap<u32, u64>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<u32> for StreakHistogram {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        let mut histogram = Self::default();
        for length in iter {
            histogram.add(length);
        }
        histogram
    }
}

impl StreakHistogram {
    /// Counts one streak of `length` days.
    pub fn add(&mut self, length: u32) {
        *self.0.entry(length).or_default() += 1;
    }

    /// Total number of streaks.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Longest streak counted.
    #[must_use]
    pub fn longest(&self) -> Option<u32> {
        self.0.keys().next_back().copied()
    }

    /// Iterates every length from 1 up to `max(min_len, longest)`, yielding 0 for lengths that never occurred.
    ///
    /// Used for charts, where the x-axis should cover the whole tracked range.
    pub fn dense(&self, min_len: u32) -> impl Iterator<Item = (u32, u64)> + '_ {
        let upper = self.longest().unwrap_or_default().max(min_len);
        (1..=upper).map(|length| (length, self.0.get(&length).copied().unwrap_or_default()))
    }
}
