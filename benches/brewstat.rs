use brewstat::{aggregate, source::CsvSource, Config, Record, StreakTracker, WindowedCounter};
use chrono::{Days, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;
use std::num::NonZeroUsize;

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).expect("valid date")
}

/// Generates a date-ordered event log
fn generate(days: u64, customers: usize, events_per_day: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    let mut records = Vec::with_capacity(days as usize * events_per_day);

    for d in 0..days {
        let date = epoch() + Days::new(d);

        for _ in 0..events_per_day {
            let customer = rng.gen_range(0..customers);
            records.push(Record::new(format!("c-{customer}"), date));
        }
    }

    records
}

fn config(days: u64) -> Config {
    Config::builder()
        .start_date(epoch())
        .end_date(epoch() + Days::new(days / 2))
        .window_size(7)
        .target_day(epoch() + Days::new(days / 4))
        .build()
        .expect("valid config")
}

fn full_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for events_per_day in [100, 1_000] {
        let records = generate(90, 1_000, events_per_day);
        let config = config(90);

        group.bench_with_input(
            BenchmarkId::from_parameter(records.len()),
            &records,
            |b, records| {
                b.iter(|| aggregate(&config, records.iter().cloned().map(Ok)).expect("ordered"));
            },
        );
    }

    group.finish();
}

fn streak_tracker(c: &mut Criterion) {
    let records = generate(365, 500, 200);

    c.bench_function("streak tracker", |b| {
        b.iter(|| {
            let mut tracker = StreakTracker::new();
            for record in &records {
                tracker
                    .record(&record.customer_id, record.date)
                    .expect("ordered");
            }
            tracker.close_all();
            tracker
        });
    });
}

fn moving_average(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let counts = (0..10_000)
        .map(|_| rng.gen_range(0..1_000))
        .collect::<Vec<u64>>();

    c.bench_function("moving average (window 30)", |b| {
        b.iter(|| {
            let mut counter = WindowedCounter::new(NonZeroUsize::new(30).expect("non-zero"));
            for (d, &count) in (0..).zip(&counts) {
                counter.observe(epoch() + Days::new(d), count);
            }
            counter
        });
    });
}

fn csv_source(c: &mut Criterion) {
    let mut log = String::from("id,customer,date\n");
    for (idx, record) in generate(30, 1_000, 1_000).iter().enumerate() {
        log.push_str(&format!(
            "{idx},{},{}\n",
            record.customer_id,
            brewstat::format_date(record.date)
        ));
    }

    c.bench_function("csv source", |b| {
        b.iter(|| CsvSource::new(log.as_bytes()).count());
    });
}

criterion_group!(
    benches,
    full_pass,
    streak_tracker,
    moving_average,
    csv_source
);
criterion_main!(benches);
