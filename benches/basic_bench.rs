use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smol_bitvec::BitVector;
use std::{hint::black_box, sync::Arc, thread};

fn bench_single_bit(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_bit");

    // Benchmark setting bits in inline storage
    group.bench_function("set_inline", |b| {
        let bits = BitVector::new(64).unwrap();
        let mut i = 0;
        b.iter(|| {
            bits.set(i % 64, black_box(true)).unwrap();
            i += 1;
        });
    });

    // Benchmark setting bits in heap storage
    group.bench_function("set_heap", |b| {
        let bits = BitVector::new(512).unwrap();
        let mut i = 0;
        b.iter(|| {
            bits.set(i % 512, black_box(true)).unwrap();
            i += 1;
        });
    });

    group.bench_function("get_inline", |b| {
        let bits = BitVector::filled(64, true).unwrap();
        let mut i = 0;
        b.iter(|| {
            black_box(bits.get(i % 64).unwrap());
            i += 1;
        });
    });

    group.bench_function("get_heap", |b| {
        let bits = BitVector::filled(512, true).unwrap();
        let mut i = 0;
        b.iter(|| {
            black_box(bits.get(i % 512).unwrap());
            i += 1;
        });
    });

    group.bench_function("toggle_inline", |b| {
        let bits = BitVector::new(64).unwrap();
        let mut i = 0;
        b.iter(|| {
            black_box(bits.toggle(i % 64).unwrap());
            i += 1;
        });
    });

    group.finish();
}

fn bench_counting(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting");

    for size in [64, 1000, 10_000] {
        let bits = BitVector::new(size).unwrap();
        for i in (0..size).step_by(3) {
            bits.set(i, true).unwrap();
        }

        group.bench_with_input(BenchmarkId::new("count_set_bits", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.count_set_bits()));
        });

        group.bench_with_input(BenchmarkId::new("iter_ones", size), &bits, |b, bits| {
            b.iter(|| black_box(bits.iter_ones().count()));
        });
    }

    group.finish();
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");

    for size in [64, 1000, 10_000] {
        let a = BitVector::new(size).unwrap();
        let b = BitVector::new(size).unwrap();
        for i in 0..size {
            if i % 2 == 0 {
                a.set(i, true).unwrap();
            }
            if i % 3 == 0 {
                b.set(i, true).unwrap();
            }
        }

        group.bench_with_input(
            BenchmarkId::new("and", size),
            &(&a, &b),
            |bench, (a, b)| {
                bench.iter(|| black_box(a.and(b).unwrap()));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("xor_assign", size),
            &(&a, &b),
            |bench, (a, b)| {
                bench.iter(|| a.xor_assign(b).unwrap());
            },
        );

        group.bench_with_input(BenchmarkId::new("not", size), &a, |bench, a| {
            bench.iter(|| black_box(a.not()));
        });
    }

    group.finish();
}

fn bench_ranges_and_shifts(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranges_and_shifts");
    let bits = BitVector::new(10_000).unwrap();

    group.bench_function("set_range", |b| {
        b.iter(|| bits.set_range(black_box(37), black_box(9_000), true).unwrap());
    });

    group.bench_function("all_set", |b| {
        b.iter(|| black_box(bits.all_set(37, 9_000).unwrap()));
    });

    group.bench_function("left_shift", |b| {
        b.iter(|| black_box(bits.left_shift(black_box(77))));
    });

    group.bench_function("sub_array", |b| {
        b.iter(|| black_box(bits.sub_array(black_box(13), 5_000).unwrap()));
    });

    group.finish();
}

fn bench_inline_vs_heap_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");

    group.bench_function("grow_across_threshold", |b| {
        b.iter(|| {
            let mut bits = BitVector::filled(64, true).unwrap();
            bits.resize(black_box(65)).unwrap();
            black_box(bits)
        });
    });

    group.bench_function("shrink_across_threshold", |b| {
        b.iter(|| {
            let mut bits = BitVector::filled(65, true).unwrap();
            bits.resize(black_box(64)).unwrap();
            black_box(bits)
        });
    });

    group.finish();
}

fn bench_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("contention");
    group.sample_size(20);

    for size in [64, 256] {
        group.bench_with_input(BenchmarkId::new("toggle_4_threads", size), &size, |b, &size| {
            b.iter(|| {
                let bits = Arc::new(BitVector::new(size).unwrap());
                let handles: Vec<_> = (0..4)
                    .map(|t| {
                        let bits = Arc::clone(&bits);
                        thread::spawn(move || {
                            for i in (t..size).step_by(4).cycle().take(1_000) {
                                bits.toggle(i).unwrap();
                            }
                        })
                    })
                    .collect();
                for h in handles {
                    h.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_bit,
    bench_counting,
    bench_set_algebra,
    bench_ranges_and_shifts,
    bench_inline_vs_heap_transition,
    bench_contention
);
criterion_main!(benches);
