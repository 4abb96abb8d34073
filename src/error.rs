//! Error types for [`BitVector`](crate::BitVector) operations.

use thiserror::Error;

/// Errors raised by fallible [`BitVector`](crate::BitVector) operations.
///
/// Every operation validates its arguments before touching storage, so a
/// returned error means the vector was left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BitVectorError {
    /// A vector was requested with a length of zero.
    #[error("invalid bit vector length {len}: length must be at least 1")]
    InvalidLength {
        /// The rejected length
        len: usize,
    },

    /// A bit index fell outside `[0, len)`.
    #[error("index out of range: {index} >= {len}")]
    IndexOutOfRange {
        /// The offending index
        index: usize,
        /// Length of the vector
        len: usize,
    },

    /// A bit range extended past the end of the vector.
    #[error("range out of bounds: {start} + {count} exceeds length {len}")]
    RangeOutOfBounds {
        /// First bit of the range
        start: usize,
        /// Number of bits in the range
        count: usize,
        /// Length of the vector
        len: usize,
    },

    /// A binary operation was applied to vectors of different lengths.
    #[error("length mismatch: {left} != {right}")]
    LengthMismatch {
        /// Length of the receiver
        left: usize,
        /// Length of the argument
        right: usize,
    },
}

/// Errors that can occur when parsing a binary string into a
/// [`BitVector`](crate::BitVector).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBitVectorError {
    /// Invalid character found in the binary string.
    #[error("invalid character '{ch}' at position {pos} in binary string")]
    InvalidChar {
        /// The invalid character found
        ch: char,
        /// The position of the invalid character
        pos: usize,
    },

    /// The string contained no bits.
    #[error("cannot parse bit vector from empty string")]
    Empty,
}

/// Result alias used throughout the crate.
pub type Result<T, E = BitVectorError> = core::result::Result<T, E>;
