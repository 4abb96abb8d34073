//! Word-level bit algorithms.
//!
//! These are the primitives every [`BitVector`](crate::BitVector) operation
//! is built from: population count, lowest-set-bit scan and the span masks
//! used to walk a bit range word by word.

use crate::macros::bitpos;

const M1: u64 = 0x5555_5555_5555_5555;
const M2: u64 = 0x3333_3333_3333_3333;
const M4: u64 = 0x0f0f_0f0f_0f0f_0f0f;

/// 64-bit De Bruijn sequence B(2, 6).
const DEBRUIJN64: u64 = 0x03f7_9d71_b4cb_0a89;

/// Maps the top six bits of `isolated * DEBRUIJN64` back to the bit position.
const DEBRUIJN_TABLE: [u8; 64] = debruijn_table();

const fn debruijn_table() -> [u8; 64] {
    let mut table = [0u8; 64];
    let mut i = 0;
    while i < 64 {
        table[((1u64 << i).wrapping_mul(DEBRUIJN64) >> 58) as usize] = i as u8;
        i += 1;
    }
    table
}

/// Counts the set bits of `x` (Hamming weight).
///
/// Uses the masked shift-and-add reduction: pair sums, then nibble and byte
/// sums, folded into 16-, 32- and 64-bit totals.
///
/// # Examples
///
/// ```
/// use smol_bitvec::bits::hamming_weight;
///
/// assert_eq!(hamming_weight(0), 0);
/// assert_eq!(hamming_weight(0b1011), 3);
/// assert_eq!(hamming_weight(u64::MAX), 64);
/// ```
#[inline]
#[must_use]
pub const fn hamming_weight(mut x: u64) -> u32 {
    x -= (x >> 1) & M1;
    x = (x & M2) + ((x >> 2) & M2);
    x = (x + (x >> 4)) & M4;
    x += x >> 8;
    x += x >> 16;
    x += x >> 32;
    (x & 0x7f) as u32
}

/// Returns the position of the lowest set bit of `x`, or `None` if `x == 0`.
///
/// The lowest bit is isolated with `x & -x`, multiplied by a De Bruijn
/// constant, and the top six bits of the product index a lookup table.
///
/// # Examples
///
/// ```
/// use smol_bitvec::bits::lowest_set_bit;
///
/// assert_eq!(lowest_set_bit(0), None);
/// assert_eq!(lowest_set_bit(0b1000), Some(3));
/// assert_eq!(lowest_set_bit(1 << 63), Some(63));
/// ```
#[inline]
#[must_use]
pub const fn lowest_set_bit(x: u64) -> Option<u32> {
    if x == 0 {
        return None;
    }
    let isolated = x & x.wrapping_neg();
    Some(DEBRUIJN_TABLE[(isolated.wrapping_mul(DEBRUIJN64) >> 58) as usize] as u32)
}

/// Mask covering bits `[lo, hi)` of a single word. Requires `lo < hi <= 64`.
#[inline(always)]
pub(crate) const fn span_mask(lo: usize, hi: usize) -> u64 {
    debug_assert!(lo < hi && hi <= 64);
    (!0u64 >> (64 - (hi - lo))) << lo
}

/// Mask of the meaningful bits in the last word of a `len`-bit vector.
#[inline(always)]
pub(crate) const fn tail_mask(len: usize) -> u64 {
    match len & 63 {
        0 => !0,
        rem => (1u64 << rem) - 1,
    }
}

/// Number of 64-bit words needed to hold `len` bits.
#[inline(always)]
pub(crate) const fn words_for(len: usize) -> usize {
    len.div_ceil(64)
}

/// Splits the bit range `[beg, end)` into `(word index, mask)` pairs: a
/// partial first word, whole interior words and a partial last word.
#[allow(clippy::reversed_empty_ranges)]
pub(crate) fn spans(beg: usize, end: usize) -> impl Iterator<Item = (usize, u64)> {
    let (first_wi, first_bi) = bitpos!(beg);
    let (last_wi, last_bi) = bitpos!(end.saturating_sub(1));
    let words = if beg < end { first_wi..=last_wi } else { 1..=0 };
    words.map(move |wi| {
        let lo = if wi == first_wi { first_bi } else { 0 };
        let hi = if wi == last_wi { last_bi + 1 } else { 64 };
        (wi, span_mask(lo, hi))
    })
}

/// Finds the first bit at or after `beg` (and below `len`) that is set, or
/// clear when `invert` is true.
pub(crate) fn scan_forward(words: &[u64], len: usize, beg: usize, invert: bool) -> Option<usize> {
    if beg >= len {
        return None;
    }
    let flip = if invert { !0 } else { 0 };
    let (mut wi, bi) = bitpos!(beg);

    // first partial word
    let mut w = (words[wi] ^ flip) & (!0u64 << bi);
    loop {
        if let Some(rel) = lowest_set_bit(w) {
            let idx = wi * 64 + rel as usize;
            return (idx < len).then_some(idx);
        }
        wi += 1;
        if wi >= words.len() {
            return None;
        }
        w = words[wi] ^ flip;
    }
}
