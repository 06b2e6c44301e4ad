//! Benchmarks for confusion-matrix construction.
//!
//! Run with: cargo bench --bench matrix_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use emomat_core::{confusion_matrix, Vocabulary};

const EMOTIONS: [&str; 7] = [
    "Sad", "Neutral", "Calm", "Curious", "Angry", "Happy", "Scared",
];

/// Create parallel label sequences cycling through the vocabulary with
/// different periods, so every region of the matrix gets traffic.
fn synthetic_labels(n_samples: usize) -> (Vec<&'static str>, Vec<&'static str>) {
    let y_true: Vec<&str> = (0..n_samples)
        .map(|i| EMOTIONS[i % EMOTIONS.len()])
        .collect();
    let y_pred: Vec<&str> = (0..n_samples)
        .map(|i| EMOTIONS[(i * 3 + i / 5) % EMOTIONS.len()])
        .collect();
    (y_true, y_pred)
}

fn bench_matrix_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("matrix_construction");

    let labels = Vocabulary::new(EMOTIONS).unwrap();

    for n_samples in [100, 1_000, 10_000].iter() {
        let (y_true, y_pred) = synthetic_labels(*n_samples);

        group.bench_with_input(
            BenchmarkId::new("from_pairs", n_samples),
            n_samples,
            |b, _| {
                b.iter(|| {
                    confusion_matrix(black_box(&y_true), black_box(&y_pred), &labels).unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    let labels = Vocabulary::new(EMOTIONS).unwrap();
    let (y_true, y_pred) = synthetic_labels(10_000);
    let counts = confusion_matrix(&y_true, &y_pred, &labels).unwrap();

    group.bench_function("normalized", |b| b.iter(|| black_box(&counts).normalized()));

    group.finish();
}

criterion_group!(benches, bench_matrix_construction, bench_normalization);
criterion_main!(benches);
