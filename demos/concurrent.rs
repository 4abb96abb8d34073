//! Shares one `BitVector` between threads

use smol_bitvec::BitVector;
use std::{sync::Arc, thread};

const THREADS: usize = 4;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== BitVector Shared Between Threads ===\n");

    for len in [64, 1024] {
        let bits = Arc::new(BitVector::new(len)?);

        let handles: Vec<_> = (0..THREADS)
            .map(|t| {
                let bits = Arc::clone(&bits);
                thread::spawn(move || {
                    // each thread marks every THREADS-th bit starting at t
                    for i in (t..len).step_by(THREADS) {
                        bits.set(i, true)?;
                    }
                    Ok::<_, smol_bitvec::BitVectorError>(())
                })
            })
            .collect();

        for h in handles {
            h.join().map_err(|_| "worker panicked")??;
        }

        println!(
            "{len} bits ({}): {} set, all set? {}",
            if bits.is_spilled() { "heap" } else { "inline" },
            bits.count_set_bits(),
            bits.all()
        );
    }

    // Toggling is a read-modify-write, so concurrent flips never get lost
    let bits = Arc::new(BitVector::new(8)?);
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let bits = Arc::clone(&bits);
            thread::spawn(move || {
                for _ in 0..1_001 {
                    let _ = bits.toggle(0);
                }
            })
        })
        .collect();
    for h in handles {
        h.join().map_err(|_| "worker panicked")?;
    }
    println!("\nBit 0 after {} toggles: {}", THREADS * 1_001, bits.get(0)?);

    Ok(())
}
