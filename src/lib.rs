//! A fixed-length, thread-safe bit vector with inline storage optimization.
//!
//! This crate provides [`BitVector`], a bit vector whose length is fixed at
//! construction. Vectors of up to 64 bits live in a single atomic word;
//! longer vectors use a heap-allocated word array guarded by a spinlock.
//!
//! # Features
//!
//! - **Zero allocation** for vectors up to 64 bits
//! - **Shared mutation**: every mutator takes `&self`, so a vector can be
//!   updated from many threads at once
//! - **Set algebra** (AND, OR, XOR, NOT) returning new vectors
//! - **Range operations**, shifts and sub-range extraction
//! - **Bit scanning** with a De Bruijn lowest-set-bit lookup and a Hamming
//!   weight population count
//! - **`no_std` support** with `alloc`
//!
//! # Examples
//!
//! ```
//! use smol_bitvec::BitVector;
//!
//! let bits = BitVector::new(10)?;
//! bits.set(2, true)?;
//! bits.set(5, true)?;
//!
//! assert_eq!(bits.next_set_bit(0)?, Some(2));
//! assert_eq!(bits.next_set_bit(3)?, Some(5));
//! assert_eq!(bits.next_set_bit(6)?, None);
//!
//! let other = BitVector::filled(10, true)?;
//! let both = bits.and(&other)?;
//! assert_eq!(both, bits);
//! assert_eq!(bits.to_string(), "0010010000");
//! # Ok::<(), smol_bitvec::BitVectorError>(())
//! ```
//!
//! # Storage Strategy
//!
//! - **Inline**: up to [`INLINE_BITS`] bits in one `AtomicU64`; every
//!   mutation is a single atomic read-modify-write
//! - **Heap**: `ceil(len / 64)` words behind a [`lock::SpinLock`] held for
//!   the whole of each operation
//!
//! The representation is chosen from the length and only changes through
//! [`BitVector::resize`].
//!
//! # Concurrency
//!
//! ```
//! use smol_bitvec::BitVector;
//! use std::{sync::Arc, thread};
//!
//! let bits = Arc::new(BitVector::new(256)?);
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let bits = Arc::clone(&bits);
//!         thread::spawn(move || {
//!             for i in (t..256).step_by(4) {
//!                 bits.set(i, true).unwrap();
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//! assert!(bits.all());
//! # Ok::<(), smol_bitvec::BitVectorError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

// Module declarations
pub mod bits;
mod bitvec;
pub mod error;
mod iter;
pub mod lock;
mod macros;
mod set_ops;
mod storage;
mod traits;

// Re-exports
pub use bitvec::BitVector;
pub use error::{BitVectorError, ParseBitVectorError, Result};
pub use iter::{Iter, Ones};
pub use storage::INLINE_BITS;
