//! Internal storage representation for the bit vector.

use alloc::{boxed::Box, vec, vec::Vec};
use core::{
    slice,
    sync::atomic::{AtomicU64, Ordering},
};

use crate::{
    bits::{tail_mask, words_for},
    lock::SpinLock,
};

/// Largest length, in bits, that is stored inline without allocating.
pub const INLINE_BITS: usize = 64;

/// Storage for the bits of a vector.
///
/// The variant is a function of the vector length alone: lengths up to
/// [`INLINE_BITS`] live in a single atomic word, longer vectors in a boxed
/// word array behind a spinlock. In both cases the bits of the last word at
/// or beyond the logical length are kept at zero.
pub(crate) enum Storage {
    /// A single word updated with atomic RMW instructions
    Inline(AtomicU64),
    /// `ceil(len / 64)` words guarded as a whole
    Heap(SpinLock<Box<[u64]>>),
}

impl Storage {
    /// Storage for `len` bits, every word set to `fill` and the tail masked.
    pub(crate) fn filled(len: usize, fill: u64) -> Self {
        debug_assert!(len > 0);
        if len <= INLINE_BITS {
            return Self::Inline(AtomicU64::new(fill & tail_mask(len)));
        }
        Self::from_vec(len, vec![fill; words_for(len)])
    }

    /// Takes ownership of `words` as storage for `len` bits.
    ///
    /// Missing words are zero-filled, extra words are dropped and the bits
    /// beyond `len` are cleared.
    pub(crate) fn from_vec(len: usize, mut words: Vec<u64>) -> Self {
        debug_assert!(len > 0);
        let tail = tail_mask(len);
        if len <= INLINE_BITS {
            let word = words.first().copied().unwrap_or(0);
            return Self::Inline(AtomicU64::new(word & tail));
        }
        let n = words_for(len);
        words.resize(n, 0);
        words[n - 1] &= tail;
        Self::Heap(SpinLock::new(words.into_boxed_slice()))
    }

    /// Copies `words` into fresh storage for `len` bits.
    pub(crate) fn from_slice(len: usize, words: &[u64]) -> Self {
        let n = words_for(len).min(words.len());
        Self::from_vec(len, words[..n].to_vec())
    }

    /// Returns `true` for the heap-backed representation.
    #[inline(always)]
    pub(crate) const fn is_heap(&self) -> bool {
        matches!(self, Self::Heap(_))
    }

    /// Runs `f` over a consistent view of the words.
    ///
    /// The heap lock is held until `f` returns, so `f` must not re-enter
    /// the same storage.
    #[inline]
    pub(crate) fn read<R>(&self, f: impl FnOnce(&[u64]) -> R) -> R {
        match self {
            Self::Inline(word) => f(slice::from_ref(&word.load(Ordering::Acquire))),
            Self::Heap(lock) => f(&lock.lock()[..]),
        }
    }

    /// Read-modify-write over all words.
    ///
    /// For the heap the closure runs once under the lock. For the inline word
    /// it runs inside a compare-and-swap loop and may be invoked again when
    /// another thread wins the race, so it must derive its result from the
    /// words it is given.
    #[inline]
    pub(crate) fn update<R>(&self, mut f: impl FnMut(&mut [u64]) -> R) -> R {
        match self {
            Self::Inline(word) => {
                let mut current = word.load(Ordering::Acquire);
                loop {
                    let mut next = current;
                    let r = f(slice::from_mut(&mut next));
                    match word.compare_exchange_weak(
                        current,
                        next,
                        Ordering::AcqRel,
                        Ordering::Acquire,
                    ) {
                        Ok(_) => return r,
                        Err(actual) => current = actual,
                    }
                }
            }
            Self::Heap(lock) => f(&mut lock.lock()[..]),
        }
    }

    /// Exclusive access without synchronization.
    #[inline]
    pub(crate) fn get_mut(&mut self) -> &mut [u64] {
        match self {
            Self::Inline(word) => slice::from_mut(word.get_mut()),
            Self::Heap(lock) => &mut lock.get_mut()[..],
        }
    }

    /// Copies the words out.
    pub(crate) fn snapshot(&self) -> Vec<u64> {
        self.read(<[u64]>::to_vec)
    }

    /// Reads a single word.
    #[inline]
    pub(crate) fn load_word(&self, wi: usize) -> u64 {
        match self {
            Self::Inline(word) => {
                debug_assert_eq!(wi, 0);
                word.load(Ordering::Acquire)
            }
            Self::Heap(lock) => lock.lock()[wi],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_representation_threshold() {
        assert!(!Storage::filled(1, 0).is_heap());
        assert!(!Storage::filled(64, 0).is_heap());
        assert!(Storage::filled(65, 0).is_heap());
    }

    #[test]
    fn test_filled_masks_tail() {
        assert_eq!(Storage::filled(10, !0).snapshot(), vec![0x3FF]);
        assert_eq!(Storage::filled(64, !0).snapshot(), vec![!0]);
        assert_eq!(Storage::filled(70, !0).snapshot(), vec![!0, 0x3F]);
    }

    #[test]
    fn test_from_vec_resizes() {
        assert_eq!(Storage::from_vec(200, vec![1]).snapshot(), vec![1, 0, 0, 0]);
        assert_eq!(Storage::from_vec(65, vec![1, 3, 5]).snapshot(), vec![1, 1]);
        assert_eq!(Storage::from_vec(3, vec![!0, !0]).snapshot(), vec![7]);
        assert_eq!(Storage::from_vec(3, Vec::new()).snapshot(), vec![0]);
    }

    #[test]
    fn test_update_inline_and_heap() {
        for len in [10, 300] {
            let storage = Storage::filled(len, 0);
            let r = storage.update(|words| {
                words[0] |= 0b101;
                words.len()
            });
            assert_eq!(r, words_for(len));
            assert_eq!(storage.load_word(0), 0b101);
        }
    }
}
