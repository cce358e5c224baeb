mod histogram;
mod stream;
mod streak;
mod unique;
mod window;

pub use histogram::StreakHistogram;
pub use stream::{aggregate, Aggregator, Analytics};
pub use streak::{CustomerStreaks, StreakState, StreakTracker};
pub use unique::UniqueDayCounter;
pub use window::{DayStats, WindowedCounter};
