//! RustQR rawcode - QR code RS block builder and codeword interleaver
//!
//! Takes the data codewords produced by a QR bit stream encoder, splits
//! them into Reed-Solomon blocks for the symbol's version and error
//! correction level, computes each block's parity and reads everything
//! back in the interleaved order the matrix placement stage expects.
//!
//! # Example
//! ```
//! use rust_qr_rawcode::{ECLevel, RawCode};
//!
//! // Version 1-M "01234567"
//! let data = [
//!     0x10, 0x20, 0x0C, 0x56, 0x61, 0x80, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11, 0xEC, 0x11,
//!     0xEC, 0x11,
//! ];
//! let raw = RawCode::from_bytes(&data, 1, ECLevel::M).unwrap();
//! let codewords = raw.interleaved();
//! assert_eq!(codewords.len(), 26);
//! assert_eq!(&codewords[..16], &data);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Raw codeword construction (block tables, RS parity, interleaving)
pub mod encoder;
/// Crate error type
pub mod error;
/// Core data structures (Version, ECLevel)
pub mod models;

pub use encoder::codeword_stream::{CodewordStream, Phase, deinterleave};
pub use encoder::raw_code::RawCode;
pub use encoder::rs_block::{RsBlock, RsBlocks};
pub use encoder::tables::{BlockSpec, block_spec};
pub use error::{RawCodeError, Result};
pub use models::{ECLevel, Version};

/// Interleave the data codewords of a symbol with their RS parity
///
/// # Arguments
/// * `data` - Data codewords (exactly the symbol's data capacity)
/// * `version` - Symbol version (1-40)
/// * `level` - Error correction level
///
/// # Returns
/// The data and ECC codewords in placement order
pub fn interleave(data: &[u8], version: u8, level: ECLevel) -> Result<Vec<u8>> {
    RawCode::from_bytes(data, version, level).map(|raw| raw.interleaved())
}
