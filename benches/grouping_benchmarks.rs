//! Performance benchmarks for the grouping operations
//! Measures path lookup and bucket assignment over growing collections

use bucketry::container::RuntimeContainer;
use bucketry::{group_by, group_by_label, group_by_multi};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::{json, Value};
use std::hint::black_box;

fn create_json_entries(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            json!({
                "Name": format!("svc_{}", i),
                "Env": {
                    "VIRTUAL_HOST": format!("host{}.example,shared.example", i % 50),
                },
                "Labels": {"com.example.tier": format!("tier{}", i % 5)}
            })
        })
        .collect()
}

fn create_containers(count: usize) -> Vec<RuntimeContainer> {
    (0..count)
        .map(|i| {
            RuntimeContainer::new(format!("svc_{}", i))
                .with_env("VIRTUAL_HOST", format!("host{}.example", i % 50))
                .with_label("com.example.tier", format!("tier{}", i % 5))
        })
        .collect()
}

fn bench_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");

    for count in [100, 1_000, 10_000] {
        let entries = create_json_entries(count);
        group.bench_with_input(BenchmarkId::new("json_path", count), &entries, |b, entries| {
            b.iter(|| group_by(black_box(entries), "Env.VIRTUAL_HOST"))
        });
        group.bench_with_input(BenchmarkId::new("json_multi", count), &entries, |b, entries| {
            b.iter(|| group_by_multi(black_box(entries), "Env.VIRTUAL_HOST", ","))
        });

        let containers = create_containers(count);
        group.bench_with_input(
            BenchmarkId::new("container_label", count),
            &containers,
            |b, containers| b.iter(|| group_by_label(black_box(containers), "com.example.tier")),
        );
        group.bench_with_input(
            BenchmarkId::new("container_path", count),
            &containers,
            |b, containers| b.iter(|| group_by(black_box(containers), "Env.VIRTUAL_HOST")),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_group_by);
criterion_main!(benches);
