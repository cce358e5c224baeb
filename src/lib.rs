//! Single-pass analytics over a time-ordered log of brewing events.
//!
//! Each event is a `(customer, date)` pair. One forward walk over the log computes:
//!
//! - the number of distinct customers active on a target day
//! - every customer's contiguous-day brewing streaks inside a tracked date range
//! - a sliding-window moving average of daily event counts
//! - the distribution of streak lengths across all customers
//!
//! The input must be sorted by date (ascending). Records sharing a date may come in any order.
//!
//! ```
//! use brewstat::{aggregate, Config, Record};
//! use chrono::NaiveDate;
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
//!
//! let config = Config::builder()
//!     .start_date(day(1))
//!     .end_date(day(5))
//!     .window_size(2)
//!     .target_day(day(2))
//!     .build()?;
//!
//! let records = [
//!     Record::new("alice", day(1)),
//!     Record::new("bob", day(1)),
//!     Record::new("alice", day(2)),
//!     Record::new("alice", day(4)),
//! ];
//!
//! let analytics = aggregate(&config, records.into_iter().map(Ok))?;
//!
//! assert_eq!(1, analytics.unique_count);
//! assert_eq!(&[2, 1], analytics.streaks_of("alice").unwrap());
//! assert_eq!(Some(&2), analytics.histogram.get(&1));
//!
//! # Ok::<(), brewstat::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![warn(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![warn(clippy::result_unit_err)]

mod agg;
mod config;
mod error;
mod record;

pub mod report;
pub mod source;

type HashMap<K, V> = std::collections::HashMap<K, V, rustc_hash::FxBuildHasher>;
type HashSet<T> = std::collections::HashSet<T, rustc_hash::FxBuildHasher>;

pub use agg::{
    aggregate, Aggregator, Analytics, CustomerStreaks, DayStats, StreakHistogram, StreakState,
    StreakTracker, UniqueDayCounter, WindowedCounter,
};
pub use config::{Config, ConfigBuilder};
pub use error::{Error, Result};
pub use record::{format_date, parse_date, Record, DATE_FORMAT};
