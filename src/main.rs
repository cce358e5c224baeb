use brewstat::{format_date, report, source::CsvSource, Config, Error};
use std::time::Instant;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const DEFAULT_CONFIG_PATH: &str = "config.cfg";

fn main() -> brewstat::Result<()> {
    env_logger::builder()
        .filter_module("brewstat", log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_owned());

    let config = Config::load(&config_path)?;

    let input = config.input_path().ok_or_else(|| {
        Error::InvalidConfiguration(format!("no input configured in {config_path:?}"))
    })?;

    let start = Instant::now();

    let analytics = brewstat::aggregate(&config, CsvSource::open(input)?)?;

    log::info!("aggregated {input:?} in {:?}", start.elapsed());

    println!(
        "Challenge 1: {} unique customers on {}",
        analytics.unique_count,
        format_date(analytics.target_day),
    );

    let (streaks_path, averages_path) = report::write_to_dir(config.output_dir(), &analytics)?;
    println!("Challenge 2: saved to file {}", streaks_path.display());
    println!("Challenge 3: saved to file {}", averages_path.display());

    let title = format!(
        "Distribution of Contiguous Brew Days {}-{}",
        format_date(config.start_date()),
        format_date(config.end_date()),
    );

    println!("Challenge 4:");
    report::render_histogram(
        std::io::stdout().lock(),
        &analytics.histogram,
        analytics.range_days,
        &title,
    )?;

    Ok(())
}
