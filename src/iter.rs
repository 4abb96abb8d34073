//! Iterator implementations for `BitVector`.

use core::iter::FusedIterator;

use crate::{BitVector, bits::scan_forward, macros::bitpos};

/// A lazy iterator over the bit values of a [`BitVector`].
///
/// This struct is created by the [`iter`](BitVector::iter) method. It yields
/// one `bool` per bit, index 0 first, and reads a backing word only when it
/// first needs a bit from it. It is double-ended, so `.rev()` walks from the
/// last index down.
#[derive(Clone)]
pub struct Iter<'a> {
    bits: &'a BitVector,
    front: usize,
    back: usize,
    front_word: Option<(usize, u64)>,
    back_word: Option<(usize, u64)>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(bits: &'a BitVector) -> Self {
        Self {
            bits,
            front: 0,
            back: bits.len(),
            front_word: None,
            back_word: None,
        }
    }

    #[inline]
    fn bit(bits: &BitVector, cache: &mut Option<(usize, u64)>, idx: usize) -> bool {
        let (wi, bi) = bitpos!(idx);
        let word = match *cache {
            Some((cached, word)) if cached == wi => word,
            _ => {
                let word = bits.storage.load_word(wi);
                *cache = Some((wi, word));
                word
            }
        };
        (word >> bi) & 1 != 0
    }
}

impl Iterator for Iter<'_> {
    type Item = bool;

    #[inline]
    fn next(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        let bit = Self::bit(self.bits, &mut self.front_word, self.front);
        self.front += 1;
        Some(bit)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<bool> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(Self::bit(self.bits, &mut self.back_word, self.back))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a BitVector {
    type Item = bool;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the indices of set bits in a [`BitVector`].
///
/// Created by [`iter_ones`](BitVector::iter_ones). Each step performs a
/// forward bit scan from the position after the previous hit.
#[derive(Clone)]
pub struct Ones<'a> {
    bits: &'a BitVector,
    next: usize,
}

impl<'a> Ones<'a> {
    pub(crate) fn new(bits: &'a BitVector) -> Self {
        Self { bits, next: 0 }
    }
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let len = self.bits.len();
        let found = self
            .bits
            .read(|words| scan_forward(words, len, self.next, false));
        self.next = found.map_or(len, |idx| idx + 1);
        found
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.bits.len().saturating_sub(self.next)))
    }
}

impl FusedIterator for Ones<'_> {}
