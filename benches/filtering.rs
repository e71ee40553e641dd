//! Benchmarks for the per-request path (filter + select) and for training.
//!
//! Filtering runs on every request, so it should stay well under a
//! millisecond for catalogs of a few thousand devices.

use advisor::catalog::{DeviceRecord, Schema};
use advisor::classifier::TierClassifier;
use advisor::config::ClassifierConfig;
use advisor::pipeline::{filter_devices, select_candidates, TierAnnotatedCatalog, UserConstraints};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const COLUMNS: &[&str] = &[
    "battery_power",
    "clock_speed",
    "four_g",
    "int_memory",
    "mobile_wt",
    "px_height",
    "px_width",
    "ram",
    "price_range",
];

fn schema() -> Schema {
    let columns: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    Schema::from_training_header(&columns, "price_range").with_id_column(Some("id".to_string()))
}

fn features(i: usize) -> Vec<f64> {
    vec![
        (800 + (i * 53) % 1200) as f64,
        0.5 + ((i * 7) % 25) as f64 / 10.0,
        (i % 3 != 0) as u8 as f64,
        (4 + (i * 11) % 60) as f64,
        (90 + (i * 13) % 110) as f64,
        (300 + (i * 29) % 1400) as f64,
        (600 + (i * 31) % 1300) as f64,
        (500 + (i % 4) * 1000 + (i * 37) % 700) as f64,
    ]
}

fn create_catalog(size: usize) -> TierAnnotatedCatalog {
    let records = (0..size)
        .map(|i| DeviceRecord {
            id: i as i64 + 1,
            features: features(i),
        })
        .collect();
    let tiers = (0..size).map(|i| (i % 4) as i64).collect();
    TierAnnotatedCatalog::new(schema(), records, tiers)
}

/// All three constraints active, roughly a quarter of the catalog survives.
fn bench_filter_by_catalog_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_devices");
    let constraints = UserConstraints::new("gaming")
        .with_budget([2, 3])
        .with_connectivity(true)
        .with_min_ram(3000);

    for size in [100, 1_000, 5_000] {
        let catalog = create_catalog(size);
        group.bench_with_input(BenchmarkId::new("devices", size), &size, |b, _| {
            b.iter(|| black_box(filter_devices(&catalog, &constraints).unwrap()));
        });
    }

    group.finish();
}

/// Unconstrained request: every device passes, selector truncates.
fn bench_shortlist(c: &mut Criterion) {
    let catalog = create_catalog(1_000);
    let constraints = UserConstraints::new("anything");

    c.bench_function("shortlist_unconstrained", |b| {
        b.iter(|| {
            let filtered = filter_devices(&catalog, &constraints).unwrap();
            black_box(select_candidates(&filtered, catalog.schema(), 5))
        });
    });
}

/// Forest training on a small dataset; dominates cold-start latency.
fn bench_training(c: &mut Criterion) {
    let rows: Vec<Vec<f64>> = (0..400).map(features).collect();
    let labels: Vec<i64> = (0..400).map(|i| (i % 4) as i64).collect();
    let config = ClassifierConfig {
        n_estimators: 20,
        ..Default::default()
    };

    c.bench_function("train_forest_400x8", |b| {
        b.iter(|| black_box(TierClassifier::train(&rows, &labels, &config).unwrap()));
    });
}

criterion_group!(benches, bench_filter_by_catalog_size, bench_shortlist, bench_training);
criterion_main!(benches);
