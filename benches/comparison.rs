//! Benchmark comparison between `BitVector` and bitvec

use bitvec::prelude::*;
use core::hint::black_box;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use smol_bitvec::BitVector;

// Test different sizes to compare inline vs heap performance
const SIZES: &[usize] = &[10, 50, 100, 500, 1000, 5000, 10000];

fn bench_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("creation");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("BitVector", size), &size, |b, &size| {
            b.iter(|| black_box(BitVector::new(size).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &size, |b, &size| {
            b.iter(|| black_box(BitVec::<u64, Lsb0>::repeat(false, size)));
        });
    }

    group.finish();
}

fn bench_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_bit");

    for &size in SIZES {
        group.throughput(Throughput::Elements(100));

        group.bench_with_input(BenchmarkId::new("BitVector", size), &size, |b, &size| {
            let bits = BitVector::new(size).unwrap();
            b.iter(|| {
                for i in 0..100 {
                    bits.set(i * 7 % size, true).unwrap();
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &size, |b, &size| {
            let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
            b.iter(|| {
                for i in 0..100 {
                    bv.set(i * 7 % size, true);
                }
            });
        });
    }

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_bit");

    for &size in SIZES {
        group.throughput(Throughput::Elements(100));

        let bits = BitVector::new(size).unwrap();
        let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(2) {
            bits.set(i, true).unwrap();
            bv.set(i, true);
        }

        group.bench_with_input(BenchmarkId::new("BitVector", size), &bits, |b, bits| {
            b.iter(|| {
                let mut hits = 0;
                for i in 0..100 {
                    hits += usize::from(bits.get(i * 7 % size).unwrap());
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &bv, |b, bv| {
            b.iter(|| {
                let mut hits = 0;
                for i in 0..100 {
                    hits += usize::from(bv[i * 7 % size]);
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

fn bench_count_ones(c: &mut Criterion) {
    let mut group = c.benchmark_group("count_ones");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let bits = BitVector::new(size).unwrap();
        let mut bv = BitVec::<u64, Lsb0>::repeat(false, size);
        for i in (0..size).step_by(3) {
            bits.set(i, true).unwrap();
            bv.set(i, true);
        }

        group.bench_with_input(BenchmarkId::new("BitVector", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.count_set_bits()));
        });

        group.bench_with_input(BenchmarkId::new("BitVec", size), &bv, |b, bv| {
            b.iter(|| black_box(bv.count_ones()));
        });
    }

    group.finish();
}

fn bench_and(c: &mut Criterion) {
    let mut group = c.benchmark_group("and");

    for &size in SIZES {
        group.throughput(Throughput::Elements(size as u64));

        let a = BitVector::filled(size, true).unwrap();
        let b = BitVector::new(size).unwrap();
        let bv_a = BitVec::<u64, Lsb0>::repeat(true, size);
        let bv_b = BitVec::<u64, Lsb0>::repeat(false, size);

        group.bench_function(BenchmarkId::new("BitVector", size), |bench| {
            bench.iter(|| black_box(a.and(&b).unwrap()));
        });

        group.bench_function(BenchmarkId::new("BitVec", size), |bench| {
            bench.iter(|| {
                let mut out = bv_a.clone();
                out &= bv_b.as_bitslice();
                black_box(out)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_creation,
    bench_set,
    bench_get,
    bench_count_ones,
    bench_and
);
criterion_main!(benches);
