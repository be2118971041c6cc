use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use libsnakediff::diff::{diff, diff_with_newlines};

/// A deterministic pseudo-random sequence over a small alphabet.
fn sequence(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            match state >> 62 {
                0 => b'\n',
                1 => b'a',
                _ => b'b',
            }
        })
        .collect()
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for len in [100, 1_000, 5_000] {
        let source = sequence(len, 1);
        let dest = sequence(len, 2);
        group.bench_with_input(BenchmarkId::new("offsets", len), &len, |b, _| {
            b.iter(|| {
                let mut count = 0;
                diff(black_box(&source), black_box(&dest), |_| count += 1);
                count
            })
        });
        group.bench_with_input(BenchmarkId::new("with_newlines", len), &len, |b, _| {
            b.iter(|| {
                let mut count = 0;
                diff_with_newlines(
                    black_box(&source),
                    black_box(&dest),
                    |byte| *byte == b'\n',
                    |_| count += 1,
                );
                count
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_diff);
criterion_main!(benches);
