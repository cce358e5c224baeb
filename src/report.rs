//! Reporters turning [`Analytics`] into files and charts.

use crate::{format_date, Analytics, StreakHistogram};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

/// File name of the per-customer streak report.
pub const STREAKS_FILE: &str = "challenge_2.csv";

/// File name of the moving average report.
pub const AVERAGES_FILE: &str = "challenge_3.csv";

const BAR_WIDTH: u64 = 50;

/// Writes one CSV row per customer: `customer,contiguous days`.
///
/// Streak lengths are listed like `[2, 1]`.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_streaks<W: Write>(writer: W, analytics: &Analytics) -> crate::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["customer", "contiguous days"])?;

    for streaks in &analytics.streaks {
        let lengths = streaks
            .lengths
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        let lengths = format!("[{lengths}]");

        writer.write_record([streaks.customer_id.as_str(), lengths.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes one CSV row per day: `date,average brews`.
///
/// Days without a moving average get an empty cell.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_moving_averages<W: Write>(writer: W, analytics: &Analytics) -> crate::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["date", "average brews"])?;

    for (date, average) in analytics.moving_averages() {
        // NOTE: Debug keeps the fractional part of whole numbers (5.0, not 5)
        let average = average.map(|x| format!("{x:?}")).unwrap_or_default();
        writer.write_record([format_date(date), average])?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders the histogram as a horizontal text bar chart.
///
/// The x-axis covers every length from 1 to `range_days` (or the longest streak, if longer).
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn render_histogram<W: Write>(
    mut out: W,
    histogram: &StreakHistogram,
    range_days: u32,
    title: &str,
) -> crate::Result<()> {
    writeln!(out, "{title}")?;

    let max = histogram.values().copied().max().unwrap_or_default();
    let label_width = histogram
        .dense(range_days)
        .last()
        .map_or(0, |(length, _)| length.to_string().len())
        .max("days".len());

    writeln!(out, "{:>label_width$} | customers", "days")?;

    for (length, count) in histogram.dense(range_days) {
        let bar = if max == 0 {
            0
        } else {
            (count * BAR_WIDTH).div_ceil(max)
        };

        writeln!(
            out,
            "{length:>label_width$} | {} {count}",
            "#".repeat(usize::try_from(bar).unwrap_or_default())
        )?;
    }

    Ok(())
}

/// Writes [`STREAKS_FILE`] and [`AVERAGES_FILE`] into `dir`, returning their paths.
///
/// # Errors
///
/// Returns an error if a file cannot be created or written.
pub fn write_to_dir<P: AsRef<Path>>(
    dir: P,
    analytics: &Analytics,
) -> crate::Result<(PathBuf, PathBuf)> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let streaks_path = dir.join(STREAKS_FILE);
    write_streaks(File::create(&streaks_path)?, analytics)?;
    log::debug!("wrote {streaks_path:?}");

    let averages_path = dir.join(AVERAGES_FILE);
    write_moving_averages(File::create(&averages_path)?, analytics)?;
    log::debug!("wrote {averages_path:?}");

    Ok((streaks_path, averages_path))
}
