use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use hydroplot_core::{cumulative_distribution_line, sequential_line};

// Daily flows with dry spells (zeros) and gauge outages (NaN).
fn gen_flows(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| match i % 53 {
            0 => f64::NAN,
            1..=4 => 0.0,
            _ => ((i as f64 * 0.01).sin() + 1.2) * 25.0,
        })
        .collect()
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    for &n in &[10_000usize, 100_000usize] {
        let data = gen_flows(n);
        group.bench_with_input(BenchmarkId::new("cumulative_distribution", n), &n, |b, _| {
            b.iter_batched(
                || data.clone(),
                |d| { black_box(cumulative_distribution_line(&d)); },
                BatchSize::SmallInput,
            );
        });
        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, _| {
            b.iter(|| black_box(sequential_line(black_box(&data))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_prepare);
criterion_main!(benches);
