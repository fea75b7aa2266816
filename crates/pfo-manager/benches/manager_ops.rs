//! Criterion micro-benchmarks for PFO creation, linking and deletion.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use pfo_core::{ClusterId, TrackId};
use pfo_test_utils::{seeded_pipeline, single_cluster};

const N: u32 = 1_000;

/// Benchmark: create 1K single-cluster PFOs in one algorithm.
fn bench_create_1k(c: &mut Criterion) {
    c.bench_function("create_1k", |b| {
        b.iter(|| {
            let mut pipeline = seeded_pipeline(N, 0);
            pipeline
                .run_algorithm("Create", |api| {
                    for i in 0..N {
                        black_box(api.create_pfo(&single_cluster(i)).unwrap());
                    }
                })
                .unwrap();
        });
    });
}

/// Benchmark: add then remove a track on 1K PFOs.
fn bench_add_remove_track_1k(c: &mut Criterion) {
    let mut pipeline = seeded_pipeline(N, N);
    let pfos = pipeline
        .run_algorithm("Seed", |api| {
            (0..N)
                .map(|i| api.create_pfo(&single_cluster(i)).unwrap())
                .collect::<Vec<_>>()
        })
        .unwrap();

    c.bench_function("add_remove_track_1k", |b| {
        b.iter(|| {
            pipeline
                .run_algorithm("Toggle", |api| {
                    for (i, &pfo) in pfos.iter().enumerate() {
                        let track = TrackId(i as u32);
                        api.add_track_to_pfo(pfo, track).unwrap();
                        api.remove_track_from_pfo(pfo, track).unwrap();
                    }
                })
                .unwrap();
        });
    });
}

/// Benchmark: link a 1K-long parent/daughter chain, then delete every
/// other node (each deletion detaches two edges).
fn bench_chain_link_delete_1k(c: &mut Criterion) {
    c.bench_function("chain_link_delete_1k", |b| {
        b.iter(|| {
            let mut pipeline = seeded_pipeline(N, 0);
            pipeline
                .run_algorithm("Chain", |api| {
                    let ids: Vec<_> = (0..N)
                        .map(|i| api.create_pfo(&single_cluster(i)).unwrap())
                        .collect();
                    for pair in ids.windows(2) {
                        api.set_parent_daughter_association(pair[0], pair[1])
                            .unwrap();
                    }
                    for id in ids.iter().step_by(2) {
                        api.delete_pfo(*id).unwrap();
                    }
                    black_box(api.pfos().len());
                })
                .unwrap();
        });
    });
}

/// Benchmark: constituent holder lookup (linear scan) over 1K PFOs.
fn bench_holder_lookup_1k(c: &mut Criterion) {
    let mut pipeline = seeded_pipeline(N, 0);
    pipeline
        .run_algorithm("Seed", |api| {
            for i in 0..N {
                api.create_pfo(&single_cluster(i)).unwrap();
            }
        })
        .unwrap();

    c.bench_function("holder_lookup_1k", |b| {
        b.iter(|| black_box(pipeline.pfos().pfo_holding_cluster(ClusterId(N - 1))));
    });
}

criterion_group!(
    benches,
    bench_create_1k,
    bench_add_remove_track_1k,
    bench_chain_link_delete_1k,
    bench_holder_lookup_1k
);
criterion_main!(benches);
