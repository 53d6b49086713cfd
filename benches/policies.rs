//! Benchmarks for the eviction policies and one full trial.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pagesim::simulation::FaultMatrix;
use pagesim::workload::ReferenceStream;
use pagesim::{PolicyKind, Simulation, SimRng};

fn bench_policies(c: &mut Criterion) {
    let mut rng = SimRng::seeded(42);
    let stream = ReferenceStream::generate(&mut rng, 1000, 10);

    let mut group = c.benchmark_group("evaluate_1000_refs");
    for kind in PolicyKind::ALL {
        for working_set in [2, 10, 20] {
            group.bench_with_input(
                BenchmarkId::new(kind.label(), working_set),
                &working_set,
                |b, &ws| {
                    b.iter(|| {
                        let mut policy = kind.build(ws, &mut rng);
                        black_box(policy.evaluate(black_box(&stream)))
                    })
                },
            );
        }
    }
    group.finish();
}

fn bench_trial(c: &mut Criterion) {
    let mut rng = SimRng::seeded(7);

    c.bench_function("trial_ws_2_to_20", |b| {
        b.iter(|| {
            let stream = ReferenceStream::generate(&mut rng, 1000, 10);
            let mut matrix = FaultMatrix::new(2..=20);
            Simulation::run_trial(&mut matrix, &stream, &mut rng);
            black_box(matrix)
        })
    });
}

criterion_group!(benches, bench_policies, bench_trial);
criterion_main!(benches);
