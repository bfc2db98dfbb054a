use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::io::Cursor;

use sum32_rs::ascii;
use sum32_rs::checksum::{self, Accumulator, RECORD_BLOCK};

/// Create test data of the given size for benchmarking.
fn make_test_data(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

fn bench_checksum_bytes(c: &mut Criterion) {
    let sizes = [1024, 64 * 1024, 1024 * 1024, 10 * 1024 * 1024];

    let mut group = c.benchmark_group("checksum_bytes");
    for &size in &sizes {
        let data = make_test_data(size);
        let label = if size >= 1024 * 1024 {
            format!("{}MB", size / (1024 * 1024))
        } else {
            format!("{}KB", size / 1024)
        };

        group.throughput(Throughput::Bytes(size as u64));

        group.bench_with_input(BenchmarkId::new("one_shot", &label), &data, |b, data| {
            b.iter(|| checksum::checksum_bytes(data));
        });

        // Odd chunk size forces partial words to be carried between calls.
        group.bench_with_input(BenchmarkId::new("chunked_4093", &label), &data, |b, data| {
            b.iter(|| {
                let mut acc = Accumulator::new();
                for chunk in data.chunks(4093) {
                    acc.update(chunk);
                }
                acc.finish()
            });
        });

        group.bench_with_input(BenchmarkId::new("record_blocks", &label), &data, |b, data| {
            b.iter(|| {
                data.chunks(RECORD_BLOCK)
                    .fold(Accumulator::new(), |acc, chunk| acc.accumulate(chunk))
                    .finish()
            });
        });

        group.bench_with_input(BenchmarkId::new("reader", &label), &data, |b, data| {
            b.iter(|| checksum::checksum_reader(Cursor::new(data)).unwrap());
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("ascii_codec");
    group.bench_function("encode32_permuted", |b| {
        b.iter(|| ascii::encode32(std::hint::black_box(0xDEAD_BEEF), true));
    });
    group.bench_function("decode32_permuted", |b| {
        let digest = ascii::encode32(0xDEAD_BEEF, true);
        b.iter(|| ascii::decode(std::hint::black_box(digest.as_bytes()), true).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_checksum_bytes, bench_codec);
criterion_main!(benches);
