//! Throughput of histogram recording and full in-memory scans.

use std::io::sink;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dbkeys::{MemStore, ScanConfig, Scanner, SizeHistogram};

fn benchmark_record(c: &mut Criterion) {
    let sizes: Vec<u64> = (0..10_000u64).map(|i| i.wrapping_mul(2_654_435_761) % (1 << 24)).collect();

    c.bench_function("record_10k_base4", |b| {
        b.iter(|| {
            let mut hist = SizeHistogram::new(4).unwrap();
            for &size in &sizes {
                hist.record(black_box(size));
            }
            black_box(hist.sample_count());
        });
    });
}

fn benchmark_scan(c: &mut Criterion) {
    let store: MemStore = (0..10_000u32)
        .map(|i| (format!("key/{:08}", i), vec![0u8; (i % 4096) as usize]))
        .collect();
    let scanner = Scanner::new(ScanConfig::default());

    c.bench_function("memdb_scan_10k", |b| {
        b.iter(|| {
            let hist = scanner.scan(&store, &mut sink()).unwrap();
            black_box(hist.sample_count());
        });
    });
}

criterion_group!(benches, benchmark_record, benchmark_scan);
criterion_main!(benches);
