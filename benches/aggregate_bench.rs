//! Criterion benchmarks for the aggregation pipeline

use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;
use vendas_tui::services::{parse_records, Aggregator, DashboardTables};
use vendas_tui::types::{Filters, SaleRecord};

const STATES: [(&str, f64, f64); 6] = [
    ("SP", -22.19, -48.79),
    ("RJ", -22.25, -42.66),
    ("MG", -18.10, -44.38),
    ("BA", -13.29, -41.71),
    ("PR", -24.89, -51.55),
    ("RS", -30.17, -53.50),
];

const CATEGORIES: [&str; 4] = ["eletronicos", "livros", "moveis", "esporte e lazer"];

/// Build a deterministic synthetic dataset spread over states, categories,
/// sellers and the 2020-2023 range
fn synthetic_records(n: usize) -> Vec<SaleRecord> {
    (0..n)
        .map(|i| {
            let (place, lat, lon) = STATES[i % STATES.len()];
            let year = 2020 + (i % 4) as i32;
            let month = 1 + (i % 12) as u32;
            let day = 1 + (i % 28) as u32;
            SaleRecord {
                category: CATEGORIES[i % CATEGORIES.len()].to_string(),
                price: 10.0 + (i % 997) as f64,
                purchase_date: NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap_or_default(),
                place: place.to_string(),
                lat,
                lon,
                seller: format!("Vendedor {}", i % 50),
            }
        })
        .collect()
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for n in [1_000usize, 10_000, 100_000] {
        let records = synthetic_records(n);
        let filters = Filters::default();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("from_records", n), &records, |b, recs| {
            b.iter(|| DashboardTables::from_records(black_box(recs), black_box(&filters)));
        });
    }

    group.finish();
}

fn bench_single_tables(c: &mut Criterion) {
    let records = synthetic_records(10_000);

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(records.len() as u64));

    group.bench_function("revenue_by_state", |b| {
        b.iter(|| Aggregator::revenue_by_state(black_box(&records)));
    });
    group.bench_function("revenue_by_month", |b| {
        b.iter(|| Aggregator::revenue_by_month(black_box(&records)));
    });
    group.bench_function("by_seller", |b| {
        b.iter(|| Aggregator::by_seller(black_box(&records)));
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let records = synthetic_records(10_000);
    let body = serde_json::to_string(&records).expect("serialize synthetic records");

    let mut group = c.benchmark_group("parse");
    group.throughput(Throughput::Bytes(body.len() as u64));

    group.bench_function("parse_records_10k", |b| {
        b.iter(|| parse_records(black_box(&body)));
    });

    group.finish();
}

criterion_group!(benches, bench_aggregate, bench_single_tables, bench_parse);
criterion_main!(benches);
