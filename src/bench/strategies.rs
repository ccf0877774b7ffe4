use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use matmul_strategies::{Matrix, RunConfig, Strategy, multiply_into, multiply_parallel_into};

const INPUT_SIZES: &[(&str, usize, usize, usize)] = &[
    ("64", 64, 64, 64),
    ("128", 128, 128, 128),
    ("256", 256, 256, 256),
    ("200x100x300", 200, 100, 300),
];

const WORKERS: usize = 4;

fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_threaded");
    for &(label, m, n, p) in INPUT_SIZES {
        group.throughput(Throughput::Elements((m * n * p) as u64));

        let a = Matrix::random_seeded(m, n, 0xC0FF_EE42);
        let b = Matrix::random_seeded(n, p, 0xBADC_0FFE);
        let mut out = Matrix::zeros(m, p);

        group.bench_function(BenchmarkId::new("random", label), |bench| {
            bench.iter(|| {
                multiply_into(black_box(&a), black_box(&b), black_box(&mut out)).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_strategy(c: &mut Criterion, strategy: Strategy) {
    let mut group = c.benchmark_group(format!("{strategy}_wise"));
    let config = RunConfig::with_workers(WORKERS);
    for &(label, m, n, p) in INPUT_SIZES {
        group.throughput(Throughput::Elements((m * n * p) as u64));

        let a = Matrix::random_seeded(m, n, 0xC0FF_EE42);
        let b = Matrix::random_seeded(n, p, 0xBADC_0FFE);
        let mut out = Matrix::zeros(m, p);

        group.bench_function(BenchmarkId::new("random", label), |bench| {
            bench.iter(|| {
                multiply_parallel_into(
                    black_box(&a),
                    black_box(&b),
                    black_box(&mut out),
                    strategy,
                    &config,
                )
                .unwrap();
            });
        });
    }
    group.finish();
}

fn bench_matmul(c: &mut Criterion) {
    bench_single(c);
    for strategy in Strategy::ALL {
        bench_strategy(c, strategy);
    }
}

criterion_group!(benches, bench_matmul);
criterion_main!(benches);
