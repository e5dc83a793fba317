//! Error types for raw codeword construction

use crate::encoder::tables::BlockSpec;
use crate::models::ECLevel;
use thiserror::Error;

/// Errors that can occur while building the RS blocks of a symbol
///
/// All of them are raised at construction time. A [`CodewordStream`]
/// built from valid blocks never fails.
///
/// [`CodewordStream`]: crate::encoder::codeword_stream::CodewordStream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawCodeError {
    /// No data codewords were supplied
    #[error("null input string")]
    EmptyInput,

    /// Version/level combination has no entry in the block tables
    #[error("unsupported symbol spec: version {version}, level {level:?}")]
    UnsupportedSpec {
        /// Requested symbol version
        version: u8,
        /// Requested error correction level
        level: ECLevel,
    },

    /// Block partition breaks the two-group layout the interleave relies on
    #[error("invalid block spec: {spec:?}")]
    InvalidBlockSpec {
        /// The rejected partition
        spec: BlockSpec,
    },

    /// Reed-Solomon generator could not be configured for a block group
    #[error("block alloc error: cannot configure RS code for {data_len} data and {ecc_len} parity bytes")]
    Allocation {
        /// Data codewords per block
        data_len: usize,
        /// Parity codewords per block
        ecc_len: usize,
    },

    /// Data buffer length does not match the symbol capacity
    #[error("codeword count mismatch: got {actual}, expected {expected}")]
    LengthMismatch {
        /// Codewords the symbol needs
        expected: usize,
        /// Codewords supplied
        actual: usize,
    },
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, RawCodeError>;
