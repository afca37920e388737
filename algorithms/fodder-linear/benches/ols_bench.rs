use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fodder::traits::Fit;
use fodder::Dataset;
use fodder_linear::LinearRegression;
use ndarray::Array;
use ndarray_rand::rand_distr::{Normal, Uniform};
use ndarray_rand::RandomExt;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn perform_ols(num_rows: usize, rng: &mut SmallRng) {
    let num_feats: usize = 3;
    let records = Array::random_using((num_rows, num_feats), Uniform::new(0., 500.), rng);
    let noise = Array::random_using(num_rows, Normal::new(0., 1.).unwrap(), rng);
    let targets = records.column(1).mapv(|w| 0.1 * w - 10.) + noise;

    let dataset = Dataset::new(records, targets);
    let lin_reg = LinearRegression::new();
    let _model = lin_reg.fit(&dataset);
}

fn bench(c: &mut Criterion) {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut group = c.benchmark_group("fodder_linear");
    let sizes: [usize; 3] = [1_000, 10_000, 100_000];
    for size in sizes {
        group.bench_with_input(BenchmarkId::new("OLS", size), &size, |b, size| {
            b.iter(|| perform_ols(*size, &mut rng));
        });
    }
    group.finish();
}

criterion_group!(benches, bench);
criterion_main!(benches);
