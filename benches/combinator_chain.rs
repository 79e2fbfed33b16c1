// benches/combinator_chain.rs
//! Benchmarks for outcome construction and combinator chains.
//!
//! The interesting comparisons are the success path against the
//! short-circuited failure path, and keyed against literal messages.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use verdict::definitions::{resource, validation};
use verdict::{Error, ErrorCatalog, Outcome, OutcomeFuture, Success};

// ============================================================================
// Construction
// ============================================================================

fn bench_error_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("error_construction");

    group.bench_function("factory", |b| b.iter(|| black_box(resource::not_found())));

    group.bench_function("factory_with_message", |b| {
        b.iter(|| black_box(resource::not_found().with_message("user 42 not found")))
    });

    group.bench_function("custom", |b| b.iter(|| black_box(Error::new(42, 7, "custom"))));

    for count in [1usize, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::new("details", count), &count, |b, &count| {
            b.iter(|| {
                let mut err = validation::invalid_input();
                for i in 0..count {
                    err = err.with_detail("field", if i % 2 == 0 { "empty" } else { "too long" });
                }
                black_box(err)
            })
        });
    }

    group.finish();
}

fn bench_message_resolution(c: &mut Criterion) {
    let keyed = resource::not_found();
    let literal = resource::not_found().with_message("gone");

    c.bench_function("message_keyed_no_provider", |b| b.iter(|| black_box(keyed.message())));
    c.bench_function("message_literal", |b| b.iter(|| black_box(literal.message())));
}

// ============================================================================
// Combinator chains
// ============================================================================

fn chain(input: Outcome<u64>) -> Outcome<u64> {
    input
        .map(|x| x + 1)
        .ensure(|x| *x > 0, validation::out_of_range())
        .bind(|x| Outcome::created_with(x * 2))
        .tap(|x| {
            black_box(x);
        })
        .map_success(|x| Success::ok_with(x / 2))
}

fn bench_sync_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync_chain");

    group.bench_function("success", |b| b.iter(|| black_box(chain(Outcome::ok_with(black_box(41))))));

    group.bench_function("failure", |b| {
        b.iter(|| black_box(chain(Outcome::failure(resource::not_found()))))
    });

    group.bench_function("collect_100", |b| {
        b.iter(|| {
            let all: Outcome<Vec<u64>> = (0..100u64).map(Outcome::ok_with).collect();
            black_box(all)
        })
    });

    group.finish();
}

fn bench_async_chain(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    let mut group = c.benchmark_group("async_chain");

    group.bench_function("ready_input_async_mapper", |b| {
        b.iter(|| {
            runtime.block_on(async {
                Outcome::ok_with(black_box(41u64))
                    .map_async(async |x| x + 1)
                    .bind_async(async |x| Outcome::created_with(x * 2))
                    .await
            })
        })
    });

    group.bench_function("pending_input_sync_mapper", |b| {
        b.iter(|| {
            runtime.block_on(
                std::future::ready(Outcome::ok_with(black_box(41u64)))
                    .map(|x| x + 1)
                    .bind(|x| Outcome::created_with(x * 2)),
            )
        })
    });

    group.finish();
}

// ============================================================================
// Catalog
// ============================================================================

fn bench_catalog(c: &mut Criterion) {
    let catalog = ErrorCatalog::builtin();

    c.bench_function("catalog_builtin", |b| b.iter(|| black_box(ErrorCatalog::builtin())));
    c.bench_function("catalog_lookup", |b| b.iter(|| black_box(catalog.lookup(black_box(5001)))));
    c.bench_function("catalog_markdown", |b| b.iter(|| black_box(catalog.render_markdown())));
}

criterion_group!(construction, bench_error_construction, bench_message_resolution);
criterion_group!(chains, bench_sync_chain, bench_async_chain);
criterion_group!(catalog, bench_catalog);

criterion_main!(construction, chains, catalog);
