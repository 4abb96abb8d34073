//! Set algebra for `BitVector`.
//!
//! Every operation here reads a second vector. Its words are copied out
//! under its own guard, the guard is released, and only then is the
//! receiver's guard taken. No thread ever holds two vector locks, so
//! `a.and(&b)` racing with `b.and(&a)` cannot deadlock and `a.and(&a)` is
//! fine.

use alloc::vec::Vec;

use crate::{
    BitVector,
    bits::tail_mask,
    error::{BitVectorError, Result},
};

impl BitVector {
    #[inline]
    fn check_same_len(&self, other: &Self) -> Result<()> {
        if self.len() != other.len() {
            return Err(BitVectorError::LengthMismatch {
                left: self.len(),
                right: other.len(),
            });
        }
        Ok(())
    }

    fn combine(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Result<Self> {
        self.check_same_len(other)?;
        let rhs = other.to_words();
        let out: Vec<u64> = self.read(|lhs| lhs.iter().zip(&rhs).map(|(&a, &b)| op(a, b)).collect());
        Ok(Self::from_parts(self.len(), out))
    }

    fn combine_in_place(&self, other: &Self, op: impl Fn(u64, u64) -> u64) -> Result<()> {
        self.check_same_len(other)?;
        let rhs = other.to_words();
        self.storage.update(|lhs| {
            for (a, &b) in lhs.iter_mut().zip(&rhs) {
                *a = op(*a, b);
            }
        });
        Ok(())
    }

    /// Returns the bitwise AND of `self` and `other` as a new vector.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let a: BitVector = "1100".parse()?;
    /// let b: BitVector = "1010".parse()?;
    /// assert_eq!(a.and(&b)?.to_string(), "1000");
    ///
    /// let c = BitVector::new(5)?;
    /// assert!(a.and(&c).is_err());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn and(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| a & b)
    }

    /// Returns the bitwise OR of `self` and `other` as a new vector.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let a: BitVector = "1100".parse()?;
    /// let b: BitVector = "1010".parse()?;
    /// assert_eq!(a.or(&b)?.to_string(), "1110");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn or(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| a | b)
    }

    /// Returns the bitwise XOR of `self` and `other` as a new vector.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let a: BitVector = "1100".parse()?;
    /// let b: BitVector = "1010".parse()?;
    /// assert_eq!(a.xor(&b)?.to_string(), "0110");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn xor(&self, other: &Self) -> Result<Self> {
        self.combine(other, |a, b| a ^ b)
    }

    /// Returns the bitwise complement as a new vector.
    ///
    /// Bits beyond the length stay clear.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let a: BitVector = "1100".parse()?;
    /// assert_eq!(a.not().to_string(), "0011");
    /// assert_eq!(a.not().count_set_bits(), 2);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[must_use]
    pub fn not(&self) -> Self {
        let out: Vec<u64> = self.read(|words| words.iter().map(|&w| !w).collect());
        Self::from_parts(self.len(), out)
    }

    /// In-place AND: `self[i] &= other[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    pub fn and_assign(&self, other: &Self) -> Result<()> {
        self.combine_in_place(other, |a, b| a & b)
    }

    /// In-place OR: `self[i] |= other[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    pub fn or_assign(&self, other: &Self) -> Result<()> {
        self.combine_in_place(other, |a, b| a | b)
    }

    /// In-place XOR: `self[i] ^= other[i]`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::BitVector;
    ///
    /// let a = BitVector::filled(100, true)?;
    /// a.xor_assign(&a)?;
    /// assert!(a.none());
    /// # Ok::<(), smol_bitvec::BitVectorError>(())
    /// ```
    pub fn xor_assign(&self, other: &Self) -> Result<()> {
        self.combine_in_place(other, |a, b| a ^ b)
    }

    /// Flips every bit in place.
    pub fn invert(&self) {
        let tail = tail_mask(self.len());
        self.storage.update(|words| {
            for w in words.iter_mut() {
                *w = !*w;
            }
            if let Some(last) = words.last_mut() {
                *last &= tail;
            }
        });
    }

    /// Returns `true` if every bit set in `self` is also set in `other`.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    pub fn is_subset(&self, other: &Self) -> Result<bool> {
        self.check_same_len(other)?;
        let rhs = other.to_words();
        Ok(self.read(|lhs| lhs.iter().zip(&rhs).all(|(&a, &b)| a & !b == 0)))
    }

    /// Returns `true` if `self` and `other` share no set bit.
    ///
    /// # Errors
    ///
    /// [`LengthMismatch`](BitVectorError::LengthMismatch) if the lengths
    /// differ.
    pub fn is_disjoint(&self, other: &Self) -> Result<bool> {
        self.check_same_len(other)?;
        let rhs = other.to_words();
        Ok(self.read(|lhs| lhs.iter().zip(&rhs).all(|(&a, &b)| a & b == 0)))
    }
}
