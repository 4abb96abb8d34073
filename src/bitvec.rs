//! `BitVector` struct and core implementation.

use alloc::{vec, vec::Vec};
use core::sync::atomic::Ordering;

use crate::{
    bits::{hamming_weight, scan_forward, spans, tail_mask, words_for},
    error::{BitVectorError, Result},
    iter::{Iter, Ones},
    macros::bitpos,
    storage::{INLINE_BITS, Storage},
};

/// A fixed-length bit vector that stores bits either inline or on the heap.
///
/// # Overview
///
/// `BitVector` packs one boolean per bit. Its length is chosen at
/// construction and only changes through [`resize`](Self::resize).
///
/// # Storage Strategy
///
/// - **Inline**: up to [`INLINE_BITS`](crate::INLINE_BITS) (64) bits live in
///   a single atomic word; no allocation
/// - **Heap**: longer vectors use `ceil(len / 64)` words behind a spinlock
///
/// Bits beyond the length inside the last word are always zero.
///
/// # Concurrency
///
/// Every mutator takes `&self`, so a vector can be shared between threads
/// (for example through an `Arc`). Inline mutations are single atomic
/// read-modify-write instructions. Heap operations hold the vector's
/// spinlock for their whole duration. Operations that read a second vector
/// copy its words under its own lock first and never hold two locks at once.
///
/// # Semantics
///
/// Single-bit and range mutators act in place. Set algebra, negation,
/// shifts and sub-range extraction return new vectors.
///
/// # Examples
///
/// ```
/// use smol_bitvec::BitVector;
///
/// let bits = BitVector::new(100)?;
/// bits.set(10, true)?;
/// bits.set(99, true)?;
///
/// assert!(bits.get(10)?);
/// assert!(!bits.get(11)?);
/// assert_eq!(bits.count_set_bits(), 2);
/// assert!(bits.is_spilled()); // more than 64 bits
///
/// assert!(bits.get(100).is_err()); // out of range
/// # Ok::<(), smol_bitvec::BitVectorError>(())
/// ```
pub struct BitVector {
    len: usize,
    pub(crate) storage: Storage,
}

#[inline]
fn check_len(len: usize) -> Result<usize> {
    if len == 0 {
        return Err(BitVectorError::InvalidLength { len });
    }
    Ok(len)
}

impl BitVector {
    /// Creates a vector of `len` bits, all cleared.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `len == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::{BitVector, BitVectorError};
    /// let bits = BitVector::new(64)?;
    /// assert_eq!(bits.len(), 64);
    /// assert!(!bits.is_spilled());
    ///
    /// assert_eq!(
    ///     BitVector::new(0).unwrap_err(),
    ///     BitVectorError::InvalidLength { len: 0 }
    /// );
    /// # Ok::<(), BitVectorError>(())
    /// ```
    pub fn new(len: usize) -> Result<Self> {
        Self::filled(len, false)
    }

    /// Creates a vector of `len` bits, all set to `value`.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `len == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::filled(70, true)?;
    /// assert_eq!(bits.count_set_bits(), 70);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn filled(len: usize, value: bool) -> Result<Self> {
        let len = check_len(len)?;
        let fill = if value { !0 } else { 0 };
        Ok(Self {
            len,
            storage: Storage::filled(len, fill),
        })
    }

    /// Creates a vector with one bit per element of `bools`.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `bools` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_bools(&[true, false, true])?;
    /// assert_eq!(bits.to_string(), "101");
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn from_bools(bools: &[bool]) -> Result<Self> {
        let len = check_len(bools.len())?;
        let mut words = vec![0u64; words_for(len)];
        for (i, _) in bools.iter().enumerate().filter(|(_, b)| **b) {
            let (wi, bi) = bitpos!(i);
            words[wi] |= 1 << bi;
        }
        Ok(Self::from_parts(len, words))
    }

    /// Creates a vector of `bytes.len() * 8` bits.
    ///
    /// Bit `j` (0 = least significant) of byte `i` becomes bit `8 * i + j`.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `bytes` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_bytes(&[0b0000_0101, 0x80])?;
    /// assert_eq!(bits.len(), 16);
    /// assert!(bits.get(0)?);
    /// assert!(bits.get(2)?);
    /// assert!(bits.get(15)?);
    /// assert_eq!(bits.count_set_bits(), 3);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let len = check_len(bytes.len() * 8)?;
        let words = bytes
            .chunks(8)
            .map(|chunk| {
                let mut buf = [0u8; 8];
                buf[..chunk.len()].copy_from_slice(chunk);
                u64::from_le_bytes(buf)
            })
            .collect();
        Ok(Self::from_parts(len, words))
    }

    /// Creates a vector of `len` bits from raw little-endian words.
    ///
    /// Missing words read as zero; words and bits beyond `len` are dropped.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `len == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_words(70, &[!0, !0])?;
    /// assert_eq!(bits.count_set_bits(), 70);
    /// assert_eq!(bits.to_words(), vec![!0, 0x3F]);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn from_words(len: usize, words: &[u64]) -> Result<Self> {
        let len = check_len(len)?;
        Ok(Self {
            len,
            storage: Storage::from_slice(len, words),
        })
    }

    /// Wraps owned words; `len` must already be validated.
    #[inline]
    pub(crate) fn from_parts(len: usize, words: Vec<u64>) -> Self {
        Self {
            len,
            storage: Storage::from_vec(len, words),
        }
    }

    /// An all-zero vector of an already validated length.
    #[inline]
    pub(crate) fn zeroed(len: usize) -> Self {
        Self {
            len,
            storage: Storage::filled(len, 0),
        }
    }

    /// Returns the number of bits stored inline without allocating.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// assert_eq!(BitVector::inline_capacity(), 64);
    /// ```
    #[must_use]
    pub const fn inline_capacity() -> usize {
        INLINE_BITS
    }

    /// Returns the number of bits in the vector.
    #[must_use]
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Always `false`: a vector holds at least one bit.
    #[must_use]
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns `true` if the vector is using heap storage.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// assert!(!BitVector::new(64)?.is_spilled());
    /// assert!(BitVector::new(65)?.is_spilled());
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    #[inline(always)]
    pub const fn is_spilled(&self) -> bool {
        self.storage.is_heap()
    }

    /// Returns the number of 64-bit words backing the vector.
    #[must_use]
    #[inline(always)]
    pub const fn word_count(&self) -> usize {
        words_for(self.len)
    }

    /// Runs `f` over a consistent view of the words.
    #[inline(always)]
    pub(crate) fn read<R>(&self, f: impl FnOnce(&[u64]) -> R) -> R {
        self.storage.read(f)
    }

    /// Validates `index` and converts it to (word index, bit position).
    #[inline]
    fn locate(&self, index: usize) -> Result<(usize, usize)> {
        if index >= self.len {
            return Err(BitVectorError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(bitpos!(index))
    }

    /// Validates `[start, start + count)` and returns its end.
    #[inline]
    fn check_range(&self, start: usize, count: usize) -> Result<usize> {
        match start.checked_add(count) {
            Some(end) if end <= self.len => Ok(end),
            _ => Err(BitVectorError::RangeOutOfBounds {
                start,
                count,
                len: self.len,
            }),
        }
    }

    // ========================================================================
    // Single-bit Operations
    // ========================================================================

    /// Returns the value of the bit at `index`.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<bool> {
        let (wi, bi) = self.locate(index)?;
        Ok((self.storage.load_word(wi) >> bi) & 1 != 0)
    }

    /// Sets the bit at `index` to `value` and returns the previous value.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(16)?;
    /// assert_eq!(bits.replace(10, true)?, false);
    /// assert_eq!(bits.replace(10, false)?, true);
    /// assert_eq!(bits.replace(10, true)?, false);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn replace(&self, index: usize, value: bool) -> Result<bool> {
        let (wi, bi) = self.locate(index)?;
        let mask = 1u64 << bi;
        let prev = match &self.storage {
            Storage::Inline(word) if value => word.fetch_or(mask, Ordering::AcqRel),
            Storage::Inline(word) => word.fetch_and(!mask, Ordering::AcqRel),
            Storage::Heap(lock) => {
                let mut words = lock.lock();
                let prev = words[wi];
                words[wi] = if value { prev | mask } else { prev & !mask };
                prev
            }
        };
        Ok(prev & mask != 0)
    }

    /// Sets the bit at `index` to `value`.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    #[inline]
    pub fn set(&self, index: usize, value: bool) -> Result<()> {
        self.replace(index, value).map(|_| ())
    }

    /// Sets the bit at `index`, returning `true` if it was previously clear.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    #[inline]
    pub fn insert(&self, index: usize) -> Result<bool> {
        self.replace(index, true).map(|prev| !prev)
    }

    /// Clears the bit at `index`, returning `true` if it was previously set.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    #[inline]
    pub fn remove(&self, index: usize) -> Result<bool> {
        self.replace(index, false)
    }

    /// Flips the bit at `index` and returns its previous value.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(200)?;
    /// assert_eq!(bits.toggle(150)?, false);
    /// assert!(bits.get(150)?);
    /// assert_eq!(bits.toggle(150)?, true);
    /// assert!(!bits.get(150)?);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn toggle(&self, index: usize) -> Result<bool> {
        let (wi, bi) = self.locate(index)?;
        let mask = 1u64 << bi;
        let prev = match &self.storage {
            Storage::Inline(word) => {
                match word.fetch_update(Ordering::AcqRel, Ordering::Acquire, |w| Some(w ^ mask)) {
                    Ok(prev) | Err(prev) => prev,
                }
            }
            Storage::Heap(lock) => {
                let mut words = lock.lock();
                let prev = words[wi];
                words[wi] = prev ^ mask;
                prev
            }
        };
        Ok(prev & mask != 0)
    }

    // ========================================================================
    // Bulk Operations
    // ========================================================================

    /// Sets every bit to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(130)?;
    /// bits.set_all(true);
    /// assert_eq!(bits.count_set_bits(), 130);
    /// bits.set_all(false);
    /// assert!(bits.none());
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn set_all(&self, value: bool) {
        let tail = tail_mask(self.len);
        let fill = if value { !0 } else { 0 };
        match &self.storage {
            Storage::Inline(word) => {
                word.swap(fill & tail, Ordering::AcqRel);
            }
            Storage::Heap(lock) => {
                let mut words = lock.lock();
                words.fill(fill);
                if let Some(last) = words.last_mut() {
                    *last &= tail;
                }
            }
        }
    }

    /// Clears every bit.
    #[inline]
    pub fn clear(&self) {
        self.set_all(false);
    }

    /// Sets the `count` bits starting at `start` to `value`.
    ///
    /// The range is applied word by word: a partial first word, whole
    /// interior words and a partial last word.
    ///
    /// # Errors
    ///
    /// [`RangeOutOfBounds`](BitVectorError::RangeOutOfBounds) if
    /// `start + count > len`. Nothing is modified in that case.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(200)?;
    /// bits.set_range(60, 80, true)?;
    ///
    /// assert!(!bits.get(59)?);
    /// assert!(bits.all_set(60, 80)?);
    /// assert!(!bits.get(140)?);
    /// assert_eq!(bits.count_set_bits(), 80);
    ///
    /// assert!(bits.set_range(150, 51, true).is_err());
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn set_range(&self, start: usize, count: usize, value: bool) -> Result<()> {
        let end = self.check_range(start, count)?;
        if count == 0 {
            return Ok(());
        }
        match &self.storage {
            Storage::Inline(word) => {
                let mask = spans(start, end).fold(0, |acc, (_, m)| acc | m);
                if value {
                    word.fetch_or(mask, Ordering::AcqRel);
                } else {
                    word.fetch_and(!mask, Ordering::AcqRel);
                }
            }
            Storage::Heap(lock) => {
                let mut words = lock.lock();
                for (wi, mask) in spans(start, end) {
                    if value {
                        words[wi] |= mask;
                    } else {
                        words[wi] &= !mask;
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns `true` if all `count` bits starting at `start` are set.
    ///
    /// An empty range is vacuously all set.
    ///
    /// # Errors
    ///
    /// [`RangeOutOfBounds`](BitVectorError::RangeOutOfBounds) if
    /// `start + count > len`.
    pub fn all_set(&self, start: usize, count: usize) -> Result<bool> {
        let end = self.check_range(start, count)?;
        Ok(self.read(|words| spans(start, end).all(|(wi, mask)| words[wi] & mask == mask)))
    }

    /// Returns `true` if any of the `count` bits starting at `start` is set.
    ///
    /// # Errors
    ///
    /// [`RangeOutOfBounds`](BitVectorError::RangeOutOfBounds) if
    /// `start + count > len`.
    pub fn any_set(&self, start: usize, count: usize) -> Result<bool> {
        let end = self.check_range(start, count)?;
        Ok(self.read(|words| spans(start, end).any(|(wi, mask)| words[wi] & mask != 0)))
    }

    /// Counts the set bits among the `count` bits starting at `start`.
    ///
    /// # Errors
    ///
    /// [`RangeOutOfBounds`](BitVectorError::RangeOutOfBounds) if
    /// `start + count > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::filled(100, true)?;
    /// assert_eq!(bits.count_set_bits_in(10, 70)?, 70);
    /// assert_eq!(bits.count_set_bits_in(99, 1)?, 1);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn count_set_bits_in(&self, start: usize, count: usize) -> Result<usize> {
        let end = self.check_range(start, count)?;
        Ok(self.read(|words| {
            spans(start, end)
                .map(|(wi, mask)| hamming_weight(words[wi] & mask) as usize)
                .sum()
        }))
    }

    // ========================================================================
    // Counting and Scanning
    // ========================================================================

    /// Returns the number of set bits (population count).
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_bools(&[true, false, true, true])?;
    /// assert_eq!(bits.count_set_bits(), 3);
    /// assert_eq!(bits.count_clear_bits(), 1);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    pub fn count_set_bits(&self) -> usize {
        let tail = tail_mask(self.len);
        self.read(|words| {
            let Some((last, body)) = words.split_last() else {
                return 0;
            };
            // final partial word is counted against the tail mask
            body.iter()
                .map(|&w| hamming_weight(w) as usize)
                .sum::<usize>()
                + hamming_weight(last & tail) as usize
        })
    }

    /// Returns the number of clear bits.
    #[must_use]
    pub fn count_clear_bits(&self) -> usize {
        self.len - self.count_set_bits()
    }

    /// Returns `true` if every bit is set.
    #[must_use]
    pub fn all(&self) -> bool {
        self.count_set_bits() == self.len
    }

    /// Returns `true` if at least one bit is set.
    #[must_use]
    pub fn any(&self) -> bool {
        self.read(|words| words.iter().any(|&w| w != 0))
    }

    /// Returns `true` if no bit is set.
    #[must_use]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Returns the index of the first set bit, or `None` if all are clear.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(300)?;
    /// assert_eq!(bits.first_set_bit(), None);
    /// bits.set(257, true)?;
    /// assert_eq!(bits.first_set_bit(), Some(257));
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    pub fn first_set_bit(&self) -> Option<usize> {
        self.read(|words| scan_forward(words, self.len, 0, false))
    }

    /// Returns the index of the first clear bit, or `None` if all are set.
    #[must_use]
    pub fn first_clear_bit(&self) -> Option<usize> {
        self.read(|words| scan_forward(words, self.len, 0, true))
    }

    /// Returns the smallest index `>= start` whose bit is set.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `start >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(10)?;
    /// bits.set(2, true)?;
    /// bits.set(5, true)?;
    ///
    /// assert_eq!(bits.next_set_bit(0)?, Some(2));
    /// assert_eq!(bits.next_set_bit(3)?, Some(5));
    /// assert_eq!(bits.next_set_bit(6)?, None);
    /// assert!(bits.next_set_bit(10).is_err());
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn next_set_bit(&self, start: usize) -> Result<Option<usize>> {
        self.locate(start)?;
        Ok(self.read(|words| scan_forward(words, self.len, start, false)))
    }

    /// Returns the smallest index `>= start` whose bit is clear.
    ///
    /// # Errors
    ///
    /// [`IndexOutOfRange`](BitVectorError::IndexOutOfRange) if
    /// `start >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::filled(70, true)?;
    /// assert_eq!(bits.next_clear_bit(0)?, None);
    /// bits.set(66, false)?;
    /// assert_eq!(bits.next_clear_bit(3)?, Some(66));
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn next_clear_bit(&self, start: usize) -> Result<Option<usize>> {
        self.locate(start)?;
        Ok(self.read(|words| scan_forward(words, self.len, start, true)))
    }

    /// Returns the index of the last set bit, or `None` if all are clear.
    #[must_use]
    pub fn last_set_bit(&self) -> Option<usize> {
        self.read(|words| {
            let wi = words.iter().rposition(|&w| w != 0)?;
            Some(wi * 64 + 63 - words[wi].leading_zeros() as usize)
        })
    }

    // ========================================================================
    // Shift Operations
    // ========================================================================

    /// Returns a vector of the same length with every bit moved `n`
    /// positions towards higher indices.
    ///
    /// Bit `i` of the result is bit `i - n` of `self`, or zero when
    /// `i < n`. Bits shifted past the end are lost.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let bits: BitVector = "11100000".parse()?;
    /// assert_eq!(bits.left_shift(2).to_string(), "00111000");
    /// assert_eq!(bits.left_shift(8).to_string(), "00000000");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn left_shift(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone();
        }
        if n >= self.len {
            return Self::zeroed(self.len);
        }

        let (word_shift, shift) = bitpos!(n);
        let shift = shift as u32;
        let out = self.read(|src| {
            let mut out = vec![0u64; src.len()];
            if shift == 0 {
                out[word_shift..].copy_from_slice(&src[..src.len() - word_shift]);
            } else {
                let mut carry = 0u64;
                for (dst, &word) in out[word_shift..].iter_mut().zip(src) {
                    *dst = carry | (word << shift);
                    carry = word >> (64 - shift);
                }
            }
            out
        });
        Self::from_parts(self.len, out)
    }

    /// Returns a vector of the same length with every bit moved `n`
    /// positions towards lower indices.
    ///
    /// Bit `i` of the result is bit `i + n` of `self`, or zero when
    /// `i + n >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let bits: BitVector = "00000111".parse()?;
    /// assert_eq!(bits.right_shift(2).to_string(), "00011100");
    /// assert_eq!(bits.right_shift(0), bits);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn right_shift(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone();
        }
        if n >= self.len {
            return Self::zeroed(self.len);
        }

        let (word_shift, shift) = bitpos!(n);
        let shift = shift as u32;
        let out = self.read(|src| {
            let mut out = vec![0u64; src.len()];
            let remaining = src.len() - word_shift;
            if shift == 0 {
                out[..remaining].copy_from_slice(&src[word_shift..]);
            } else {
                let mut carry = 0u64;
                for (dst, &word) in out[..remaining].iter_mut().zip(&src[word_shift..]).rev() {
                    *dst = (word >> shift) | carry;
                    carry = word << (64 - shift);
                }
            }
            out
        });
        Self::from_parts(self.len, out)
    }

    // ========================================================================
    // Range Extraction
    // ========================================================================

    /// Copies the `count` bits starting at `start` into a new vector of
    /// length `count`; bit `start` becomes bit 0.
    ///
    /// # Errors
    ///
    /// - [`InvalidLength`](BitVectorError::InvalidLength) if `count == 0`
    /// - [`RangeOutOfBounds`](BitVectorError::RangeOutOfBounds) if
    ///   `start + count > len`
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let bits: BitVector = "0011010".parse()?;
    /// let sub = bits.sub_array(2, 4)?;
    /// assert_eq!(sub.to_string(), "1101");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn sub_array(&self, start: usize, count: usize) -> Result<Self> {
        check_len(count)?;
        self.check_range(start, count)?;

        let n = words_for(count);
        let (wi, bi) = bitpos!(start);
        let out = self.read(|src| {
            if bi == 0 {
                // Word-aligned: copy exactly the words we need.
                src[wi..wi + n].to_vec()
            } else {
                // Misaligned: each output word is (v0 >> s) | (v1 << (64 - s)).
                let shift = bi as u32;
                (wi..wi + n)
                    .map(|i| {
                        let hi = src.get(i + 1).map_or(0, |&w| w << (64 - shift));
                        (src[i] >> shift) | hi
                    })
                    .collect()
            }
        });
        Ok(Self::from_parts(count, out))
    }

    // ========================================================================
    // Resizing
    // ========================================================================

    /// Changes the length of the vector to `new_len`.
    ///
    /// Bits below `min(len, new_len)` keep their values and new positions
    /// are cleared. Crossing the inline/heap threshold moves the data to the
    /// other representation.
    ///
    /// # Errors
    ///
    /// [`InvalidLength`](BitVectorError::InvalidLength) if `new_len == 0`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let mut bits = BitVector::filled(50, true)?;
    ///
    /// bits.resize(100)?;
    /// assert!(bits.is_spilled());
    /// assert_eq!(bits.count_set_bits(), 50);
    ///
    /// bits.resize(10)?;
    /// assert!(!bits.is_spilled());
    /// assert_eq!(bits.count_set_bits(), 10);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn resize(&mut self, new_len: usize) -> Result<()> {
        let new_len = check_len(new_len)?;
        if new_len == self.len {
            return Ok(());
        }

        let was_spilled = self.is_spilled();
        let src = self.storage.get_mut();
        let keep = src.len().min(words_for(new_len));
        let storage = Storage::from_slice(new_len, &src[..keep]);

        if was_spilled != storage.is_heap() {
            log::trace!(
                "bit vector resized {} -> {new_len} bits, moved to {} storage",
                self.len,
                if storage.is_heap() { "heap" } else { "inline" },
            );
        }

        self.storage = storage;
        self.len = new_len;
        Ok(())
    }

    // ========================================================================
    // Conversions and Iteration
    // ========================================================================

    /// Returns one `bool` per bit.
    #[must_use]
    pub fn to_bools(&self) -> Vec<bool> {
        self.iter().collect()
    }

    /// Packs the bits into `ceil(len / 8)` bytes.
    ///
    /// Bit `j` (0 = least significant) of byte `i` is bit `8 * i + j`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_bools(&[true, false, false, true, false, false, false, false, true])?;
    /// assert_eq!(bits.to_bytes(), vec![0b0000_1001, 0b1]);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let n = self.len.div_ceil(8);
        self.read(|words| {
            words
                .iter()
                .flat_map(|w| w.to_le_bytes())
                .take(n)
                .collect()
        })
    }

    /// Copies out the backing words, little-endian bit order.
    #[must_use]
    pub fn to_words(&self) -> Vec<u64> {
        self.storage.snapshot()
    }

    /// Returns a lazy iterator over the bit values, index 0 first.
    ///
    /// Words are read one at a time as the iterator advances, so concurrent
    /// writes to words not yet reached are observed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::from_bools(&[true, false, true])?;
    /// let values: Vec<bool> = bits.iter().collect();
    /// assert_eq!(values, vec![true, false, true]);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Returns an iterator over the indices of set bits, ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// # use smol_bitvec::BitVector;
    /// let bits = BitVector::new(200)?;
    /// bits.set(3, true)?;
    /// bits.set(190, true)?;
    /// assert_eq!(bits.iter_ones().collect::<Vec<_>>(), vec![3, 190]);
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    #[must_use]
    pub fn iter_ones(&self) -> Ones<'_> {
        Ones::new(self)
    }
}
