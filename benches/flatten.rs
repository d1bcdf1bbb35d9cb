//! Benchmarks for row flattening and header building.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

use panetable::header::build_header_rows;
use panetable::rows::{ExpandableOptions, ExpandableRows, RowFlattener};
use panetable::types::ColumnNode;

/// `fanout` children per record, `depth` levels deep
fn tree(fanout: usize, depth: usize, prefix: &str) -> Vec<Value> {
    (0..fanout)
        .map(|i| {
            let key = format!("{prefix}{i}");
            let mut record = json!({"key": key, "name": format!("row {key}"), "age": i});
            if depth > 1 {
                record["children"] = Value::Array(tree(fanout, depth - 1, &format!("{key}-")));
            }
            record
        })
        .collect()
}

/// A column tree `depth` levels deep with `width` groups per level
fn columns(width: usize, depth: usize, prefix: &str) -> Vec<ColumnNode> {
    (0..width)
        .map(|i| {
            let key = format!("{prefix}{i}");
            if depth <= 1 {
                ColumnNode::leaf(key.clone(), key.clone()).with_data_index("name")
            } else {
                let children = columns(width, depth - 1, &format!("{key}."));
                ColumnNode::group(key.clone(), key.clone(), children)
            }
        })
        .collect()
}

/// Flatten a flat record list of growing size
fn bench_flat(c: &mut Criterion) {
    let flattener = RowFlattener::default();
    let mut group = c.benchmark_group("flatten_flat");

    for size in [100, 1_000, 10_000] {
        let data = tree(size, 1, "r");
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| flattener.flatten(black_box(data), 0, true))
        });
    }

    group.finish();
}

/// Flatten a nested tree, plain and with every row expanded
fn bench_tree(c: &mut Criterion) {
    let flattener = RowFlattener::default();
    let data = tree(10, 4, "r");
    let expanded = ExpandableRows::new(
        ExpandableOptions {
            default_expand_all_rows: true,
            ..ExpandableOptions::default()
        },
        &data,
        &flattener,
    );

    let mut group = c.benchmark_group("flatten_tree");
    group.throughput(Throughput::Elements(11_110));
    group.bench_function("plain", |b| b.iter(|| flattener.flatten(black_box(&data), 0, true)));
    group.bench_function("expanded", |b| {
        b.iter(|| flattener.flatten_with(black_box(&data), &expanded))
    });
    group.finish();
}

/// Build the header grid for nested column groups
fn bench_header(c: &mut Criterion) {
    let cols = columns(4, 4, "c");
    c.bench_function("header_4x4", |b| b.iter(|| build_header_rows(black_box(&cols))));
}

criterion_group!(benches, bench_flat, bench_tree, bench_header);

criterion_main!(benches);
