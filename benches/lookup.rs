extern crate mapiprops;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use mapiprops::{DataSource, PropertyRegistry, PropertyTag, PropertyType};
use std::hint::black_box;

/// Building the registry from the embedded corpus, including parsing and the self-check
fn bench_build(c: &mut Criterion) {
    let source = DataSource::embedded().expect("embedded corpus");

    c.bench_function("registry_build", |b| {
        b.iter(|| {
            let registry = PropertyRegistry::from_source(black_box(&source)).unwrap();
            black_box(registry)
        });
    });
}

/// Resolution of every catalogued id, the hot path of a property-stream reader
fn bench_lookup(c: &mut Criterion) {
    let registry = mapiprops::registry().expect("embedded registry");
    let ids: Vec<u16> = registry.ids().collect();

    let mut group = c.benchmark_group("lookup");
    group.throughput(Throughput::Elements(ids.len() as u64));

    group.bench_function("lookup_by_id", |b| {
        b.iter(|| {
            for &id in &ids {
                black_box(registry.lookup_by_id(black_box(id), None, None));
            }
        });
    });

    group.bench_function("resolve_tag", |b| {
        b.iter(|| {
            for &id in &ids {
                let tag = PropertyTag::with_type(id, PropertyType::Integer32);
                black_box(registry.resolve_tag(black_box(tag), Some("Search")));
            }
        });
    });

    group.finish();
}

/// Reverse lookup by canonical name and by `PR_*` alias
fn bench_names(c: &mut Criterion) {
    let registry = mapiprops::registry().expect("embedded registry");

    c.bench_function("lookup_by_name", |b| {
        b.iter(|| black_box(registry.lookup_by_name(black_box("PidTagSubject"))));
    });

    c.bench_function("lookup_by_name_ignore_case", |b| {
        b.iter(|| black_box(registry.lookup_by_name_ignore_case(black_box("pr_entryid"))));
    });
}

criterion_group!(benches, bench_build, bench_lookup, bench_names);
criterion_main!(benches);
