//! Benchmarks for name resolution and copy throughput
//!
//! These benchmarks measure how resolution scales with catalog size and how
//! fast the executors move values for common shapes.
//!
//! Copyright (c) 2025 Fieldcopy Team
//! Licensed under the Apache-2.0 license

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fieldcopy_core::*;

fieldcopy_core::record! {
    #[derive(Debug, Clone, Default)]
    struct Form {
        name: String,
        age: String,
        weight: String,
        height: String,
        note: String,
    }
}

fieldcopy_core::record! {
    #[derive(Debug, Clone, Default)]
    struct Person {
        name: String,
        age: i32,
        weight: Option<i64>,
        height: f64,
        note: String,
    }
}

fn form(i: usize) -> Form {
    Form {
        name: format!("Person {}", i),
        age: (i % 100).to_string(),
        weight: (50 + i % 40).to_string(),
        height: format!("1.{}", 50 + i % 40),
        note: "-".to_string(),
    }
}

fn catalog(prefix: &str, size: usize) -> Catalog {
    Catalog::Closed((0..size).map(|i| format!("{}{}", prefix, i)).collect())
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");

    for size in [8usize, 64, 256] {
        let default = CopyOptions::default();
        group.bench_with_input(BenchmarkId::new("same_name", size), &size, |b, &size| {
            b.iter(|| {
                let table = resolve(catalog("f", size), catalog("f", size), black_box(&default));
                black_box(table)
            })
        });

        let rename = CopyOptions::builder()
            .rename(|name| format!("F_{}", name.to_uppercase()))
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("rename", size), &size, |b, &size| {
            b.iter(|| {
                let table = resolve(catalog("f", size), catalog("F_F", size), black_box(&rename));
                black_box(table)
            })
        });

        let predicate = CopyOptions::builder()
            .matches(|source, target| target.eq_ignore_ascii_case(source))
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("predicate", size), &size, |b, &size| {
            b.iter(|| {
                let table = resolve(catalog("f", size), catalog("F", size), black_box(&predicate));
                black_box(table)
            })
        });
    }

    group.finish();
}

fn bench_copy_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_single");
    let source = form(1);

    group.bench_function("record_to_record", |b| {
        b.iter(|| {
            let mut target = Person::default();
            copy_record_to_record_default(black_box(&source), &mut target).unwrap();
            black_box(target)
        })
    });

    group.bench_function("record_to_map", |b| {
        b.iter(|| {
            let mut target = SlotMap::new();
            copy_record_to_map_default(black_box(&source), &mut target).unwrap();
            black_box(target)
        })
    });

    let mut map = SlotMap::new();
    copy_record_to_map_default(&source, &mut map).unwrap();
    group.bench_function("map_to_record", |b| {
        b.iter(|| {
            let mut target = Person::default();
            copy_map_to_record_default(black_box(&map), &mut target).unwrap();
            black_box(target)
        })
    });

    group.finish();
}

fn bench_copy_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_list");

    for len in [10usize, 100, 1000] {
        let source: Vec<Form> = (0..len).map(form).collect();
        group.bench_with_input(BenchmarkId::new("record_list", len), &source, |b, source| {
            b.iter(|| {
                let mut target: RecordList<Person> = RecordList::with_default();
                copy_record_list_to_record_list_default(black_box(source), &mut target).unwrap();
                black_box(target.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("map_list", len), &source, |b, source| {
            b.iter(|| {
                let mut target = MapList::of(ValueKind::Text);
                copy_record_list_to_map_list_default(black_box(source), &mut target).unwrap();
                black_box(target.len())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_copy_single, bench_copy_list);
criterion_main!(benches);
