use smol_bitvec::BitVector;
use std::{
    sync::{Arc, Barrier},
    thread,
};

const THREADS: usize = 8;
const ROUNDS: usize = 10_000;

/// Each thread owns a disjoint set of indices and toggles them `ROUNDS`
/// times; with an even round count every bit must end up clear again.
fn toggle_disjoint(len: usize, rounds: usize) -> Arc<BitVector> {
    let bits = Arc::new(BitVector::new(len).unwrap());
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let bits = Arc::clone(&bits);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for _ in 0..rounds {
                    for i in (t..len).step_by(THREADS) {
                        bits.toggle(i).unwrap();
                    }
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
    bits
}

#[test]
fn test_heap_toggle_even_rounds() {
    let bits = toggle_disjoint(256, ROUNDS);
    assert!(bits.is_spilled());
    assert_eq!(bits.count_set_bits(), 0);
}

#[test]
fn test_heap_toggle_odd_rounds() {
    let bits = toggle_disjoint(256, ROUNDS + 1);
    assert!(bits.all());
}

#[test]
fn test_inline_toggle_even_rounds() {
    let bits = toggle_disjoint(64, ROUNDS);
    assert!(!bits.is_spilled());
    assert!(bits.none());
}

#[test]
fn test_inline_toggle_odd_rounds() {
    let bits = toggle_disjoint(40, ROUNDS + 1);
    assert_eq!(bits.count_set_bits(), 40);
}

#[test]
fn test_concurrent_set_disjoint_bits() {
    for len in [64, 1000] {
        let bits = Arc::new(BitVector::new(len).unwrap());
        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let bits = Arc::clone(&bits);
                thread::spawn(move || {
                    for i in (t..len).step_by(THREADS) {
                        bits.set(i, true).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert!(bits.all(), "len {len}");
    }
}

#[test]
fn test_concurrent_ranges_and_reads() {
    let bits = Arc::new(BitVector::new(640).unwrap());
    let writers: Vec<_> = (0..THREADS)
        .map(|t| {
            let bits = Arc::clone(&bits);
            thread::spawn(move || {
                for _ in 0..500 {
                    bits.set_range(t * 80, 80, true).unwrap();
                    bits.set_range(t * 80, 80, false).unwrap();
                }
                bits.set_range(t * 80, 80, true).unwrap();
            })
        })
        .collect();

    let reader = {
        let bits = Arc::clone(&bits);
        thread::spawn(move || {
            for _ in 0..500 {
                // a reader never sees a partially applied range
                let n = bits.count_set_bits();
                assert_eq!(n % 80, 0, "torn range: {n}");
                let copy = bits.clone();
                assert_eq!(copy.count_set_bits() % 80, 0);
            }
        })
    };

    for h in writers {
        h.join().unwrap();
    }
    reader.join().unwrap();
    assert!(bits.all());
}

#[test]
fn test_concurrent_toggle_and_get_same_word() {
    let bits = Arc::new(BitVector::new(30).unwrap());
    let toggler = {
        let bits = Arc::clone(&bits);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                bits.toggle(1).unwrap();
            }
        })
    };
    let setter = {
        let bits = Arc::clone(&bits);
        thread::spawn(move || {
            for _ in 0..ROUNDS {
                bits.set(0, true).unwrap();
                assert!(bits.get(0).unwrap());
            }
        })
    };
    toggler.join().unwrap();
    setter.join().unwrap();

    assert!(bits.get(0).unwrap());
    assert!(!bits.get(1).unwrap());
}
