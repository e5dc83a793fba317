//! QR code raw codeword construction
//!
//! This module turns the data codewords of a symbol into the final
//! codeword sequence placed in the matrix:
//! - Block partition tables (ISO/IEC 18004 Model 2)
//! - Reed-Solomon parity generation
//! - RS block building and column-major interleaving

/// Interleaved codeword reader and its inverse
pub mod codeword_stream;
/// Environment-driven tuning knobs
pub mod config;
/// Symbol-level owner of spec, blocks and streams
pub mod raw_code;
/// Reed-Solomon parity generation over GF(256)
pub mod reed_solomon;
/// RS block partitioning and parity buffers
pub mod rs_block;
/// QR specification tables (block partition per version/level)
pub mod tables;
