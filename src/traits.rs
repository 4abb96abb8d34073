//! Trait implementations for `BitVector`.

use alloc::vec::Vec;
use core::{
    fmt::{self, Write},
    hash::{Hash, Hasher},
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Shl, Shr},
    ptr,
    str::FromStr,
};

use crate::{
    BitVector,
    error::{BitVectorError, ParseBitVectorError},
    storage::Storage,
};

impl Clone for BitVector {
    /// Deep-copies the words; the clone never shares storage with `self`.
    fn clone(&self) -> Self {
        Self::from_parts(self.len(), self.to_words())
    }
}

impl fmt::Display for BitVector {
    /// Renders one `'0'` or `'1'` per bit, index 0 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self {
            f.write_char(if bit { '1' } else { '0' })?;
        }
        Ok(())
    }
}

impl fmt::Binary for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0b")?;
        }
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Debug for BitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitVector")
            .field("len", &self.len())
            .field("spilled", &self.is_spilled())
            .field("bits", &format_args!("{self}"))
            .finish()
    }
}

impl FromStr for BitVector {
    type Err = ParseBitVectorError;

    /// Parses a string of `'0'` and `'1'` characters, index 0 first.
    /// Underscores are ignored as separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use smol_bitvec::{BitVector, ParseBitVectorError};
    ///
    /// let bits: BitVector = "1010_0001".parse()?;
    /// assert_eq!(bits.len(), 8);
    /// assert!(bits.get(0)?);
    /// assert!(bits.get(7)?);
    ///
    /// assert_eq!(
    ///     "10x".parse::<BitVector>().unwrap_err(),
    ///     ParseBitVectorError::InvalidChar { ch: 'x', pos: 2 }
    /// );
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bools = Vec::with_capacity(s.len());
        for (pos, ch) in s.chars().enumerate() {
            match ch {
                '0' => bools.push(false),
                '1' => bools.push(true),
                '_' => {}
                _ => return Err(ParseBitVectorError::InvalidChar { ch, pos }),
            }
        }
        Self::from_bools(&bools).map_err(|_| ParseBitVectorError::Empty)
    }
}

impl PartialEq for BitVector {
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        if self.len() != other.len() {
            return false;
        }
        let rhs = other.to_words();
        self.read(|lhs| lhs == rhs.as_slice())
    }
}

impl Eq for BitVector {}

impl Hash for BitVector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        self.read(|words| words.hash(state));
    }
}

// ============================================================================
// Operators
// ============================================================================

/// Unwraps the result of an operator whose operands must have equal length.
#[track_caller]
fn expect_same_len<T>(result: Result<T, BitVectorError>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => panic!("{e}"),
    }
}

impl BitAnd for &BitVector {
    type Output = BitVector;

    /// # Panics
    ///
    /// Panics if the lengths differ; use [`BitVector::and`] to get an error
    /// instead.
    fn bitand(self, rhs: Self) -> BitVector {
        expect_same_len(self.and(rhs))
    }
}

impl BitOr for &BitVector {
    type Output = BitVector;

    /// # Panics
    ///
    /// Panics if the lengths differ; use [`BitVector::or`] to get an error
    /// instead.
    fn bitor(self, rhs: Self) -> BitVector {
        expect_same_len(self.or(rhs))
    }
}

impl BitXor for &BitVector {
    type Output = BitVector;

    /// # Panics
    ///
    /// Panics if the lengths differ; use [`BitVector::xor`] to get an error
    /// instead.
    fn bitxor(self, rhs: Self) -> BitVector {
        expect_same_len(self.xor(rhs))
    }
}

impl Not for &BitVector {
    type Output = BitVector;

    fn not(self) -> BitVector {
        BitVector::not(self)
    }
}

impl BitAndAssign<&BitVector> for BitVector {
    fn bitand_assign(&mut self, rhs: &BitVector) {
        expect_same_len(self.and_assign(rhs));
    }
}

impl BitOrAssign<&BitVector> for BitVector {
    fn bitor_assign(&mut self, rhs: &BitVector) {
        expect_same_len(self.or_assign(rhs));
    }
}

impl BitXorAssign<&BitVector> for BitVector {
    fn bitxor_assign(&mut self, rhs: &BitVector) {
        expect_same_len(self.xor_assign(rhs));
    }
}

impl Shl<usize> for &BitVector {
    type Output = BitVector;

    fn shl(self, n: usize) -> BitVector {
        self.left_shift(n)
    }
}

impl Shr<usize> for &BitVector {
    type Output = BitVector;

    fn shr(self, n: usize) -> BitVector {
        self.right_shift(n)
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl TryFrom<&[bool]> for BitVector {
    type Error = BitVectorError;

    fn try_from(bools: &[bool]) -> Result<Self, Self::Error> {
        Self::from_bools(bools)
    }
}

impl TryFrom<Vec<bool>> for BitVector {
    type Error = BitVectorError;

    fn try_from(bools: Vec<bool>) -> Result<Self, Self::Error> {
        Self::from_bools(&bools)
    }
}

impl TryFrom<&[u8]> for BitVector {
    type Error = BitVectorError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<&BitVector> for Vec<bool> {
    fn from(bits: &BitVector) -> Self {
        bits.to_bools()
    }
}

impl From<&BitVector> for Vec<u8> {
    fn from(bits: &BitVector) -> Self {
        bits.to_bytes()
    }
}

impl From<BitVector> for Vec<u64> {
    fn from(bits: BitVector) -> Self {
        match bits.storage {
            Storage::Inline(word) => alloc::vec![word.into_inner()],
            Storage::Heap(lock) => lock.into_inner().into_vec(),
        }
    }
}
