//! FILENAME: benches/pipeline.rs
//! Benchmark for the full ingest → enumerate pipeline.

use std::hint::black_box;

use codec::AxisSpec;
use criterion::{criterion_group, criterion_main, Criterion};
use pivot_engine::{Axis, Pivot, PivotConfig};

/// Builds a tab-delimited input with `rows` rows over a small set of
/// repeating group values, so grouping actually has work to do.
fn sample_input(rows: usize) -> String {
    let regions = ["north", "south", "east", "west"];
    let products = ["apple", "pear", "plum"];
    let mut out = String::with_capacity(rows * 24);
    for i in 0..rows {
        out.push_str(regions[i % regions.len()]);
        out.push('\t');
        out.push_str(products[i % products.len()]);
        out.push('\t');
        out.push_str(&(i % 17).to_string());
        out.push('\n');
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let input = sample_input(10_000);
    let left = AxisSpec::parse("+1,+2").unwrap();
    let top = AxisSpec::parse("-3").unwrap();

    c.bench_function("ingest_and_enumerate_10k_rows", |b| {
        b.iter(|| {
            let config = PivotConfig::new(left.clone(), top.clone());
            let mut pivot = Pivot::open(config).unwrap();
            pivot.ingest(input.as_bytes()).unwrap();
            let left_groups = pivot.groups(Axis::Left).unwrap().count();
            let top_groups = pivot.groups(Axis::Top).unwrap().count();
            black_box((left_groups, top_groups));
        })
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
