use cachebench::blocked::recursive_transpose::transpose_recursive;
use cachebench::matrix::transpose::transpose_in_place;
use cachebench::{Matrix, Strategy};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("matmul");
    let mut rng = StdRng::seed_from_u64(0);

    for size in [64, 128, 256] {
        let a = Matrix::random(size, &mut rng);
        let b = Matrix::random(size, &mut rng);

        for strategy in Strategy::ALL {
            group.bench_with_input(BenchmarkId::new(strategy.name(), size), &size, |bench, &n| {
                // Transposing strategies consume B, so every iteration gets a fresh copy.
                bench.iter_batched(
                    || (b.clone(), Matrix::zeros(n)),
                    |(mut b, mut c)| {
                        strategy.run(black_box(&a), &mut b, &mut c);
                        c
                    },
                    BatchSize::LargeInput,
                )
            });
        }
    }

    group.finish();
}

fn bench_transpose(c: &mut Criterion) {
    let mut group = c.benchmark_group("transpose");
    let mut rng = StdRng::seed_from_u64(1);

    for size in [256, 1024, 2048] {
        let m = Matrix::random(size, &mut rng);

        group.bench_with_input(BenchmarkId::new("plain", size), &size, |bench, &n| {
            bench.iter_batched_ref(
                || m.clone(),
                |m| transpose_in_place(m.as_mut_slice(), n),
                BatchSize::LargeInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("recursive", size), &size, |bench, &n| {
            bench.iter_batched_ref(
                || m.clone(),
                |m| transpose_recursive(m.as_mut_slice(), n),
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies, bench_transpose);
criterion_main!(benches);
