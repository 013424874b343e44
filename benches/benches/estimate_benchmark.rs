//! Estimation benchmarks.
//!
//! Run with: `cargo bench --package hlf-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use hlf_bench::{PRICES, sample_cart, synthetic_orders};
use hlf_lib::prelude::*;
use std::hint::black_box;

const RATE: f64 = 3.9;

fn calculate_benchmark(c: &mut Criterion) {
    let calculator = FeeCalculator::global();
    let mut group = c.benchmark_group("calculate");

    for method in CalculationMethod::all() {
        for mode in [OrderMode::Single, OrderMode::Bulk] {
            let products: Vec<ProductData> = PRICES
                .iter()
                .filter_map(|&p| ProductData::eur(p).ok())
                .collect();
            group.throughput(Throughput::Elements(products.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(method.as_str(), mode),
                &products,
                |b, products| {
                    b.iter(|| {
                        for product in products {
                            let _ = black_box(calculator.calculate(
                                black_box(product),
                                RATE,
                                *method,
                                mode,
                            ));
                        }
                    });
                },
            );
        }
    }

    group.finish();
}

fn quick_estimate_benchmark(c: &mut Criterion) {
    let calculator = FeeCalculator::global();
    c.bench_function("quick_estimate", |b| {
        b.iter(|| {
            for price in PRICES {
                let _ = black_box(calculator.quick_estimate(
                    black_box(price),
                    RATE,
                    CalculationMethod::Conservative,
                ));
            }
        });
    });
}

fn cart_benchmark(c: &mut Criterion) {
    let calculator = FeeCalculator::global();
    let mut group = c.benchmark_group("cart_allocate");

    for lines in [1, 10, 100] {
        let cart = sample_cart(lines);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &cart, |b, cart| {
            b.iter(|| black_box(calculator.cart().allocate(black_box(cart), RATE)));
        });
    }

    group.finish();
}

fn statistics_builder_benchmark(c: &mut Criterion) {
    let generated_at = chrono::NaiveDate::from_ymd_opt(2025, 10, 9)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap_or_default();
    let mut group = c.benchmark_group("build_statistics");

    for count in [17, 1_000, 10_000] {
        let orders = synthetic_orders(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &orders, |b, orders| {
            b.iter(|| {
                let mut builder = StatisticsBuilder::new();
                builder.extend(orders);
                black_box(builder.finish(generated_at))
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    calculate_benchmark,
    quick_estimate_benchmark,
    cart_benchmark,
    statistics_builder_benchmark
);
criterion_main!(benches);
