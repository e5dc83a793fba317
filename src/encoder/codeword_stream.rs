//! Interleaved codeword reader
//!
//! Codewords are read column by column across all blocks: first the data
//! codewords (skipping short blocks in the final column), then the ECC
//! codewords. Past the end the stream yields zero bytes, which the
//! matrix stage uses for remainder bits.
//!
//! A stream owns its cursor and nothing else. It is not thread-safe; wrap
//! it in a mutex or confine it to one thread if it has to be shared. Any
//! number of independent streams can read the same [`RsBlocks`].

use crate::encoder::rs_block::{RsBlock, RsBlocks};
use crate::encoder::tables::BlockSpec;
use crate::error::{RawCodeError, Result};

/// Which part of the symbol the cursor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Interleaved data codewords
    Data,
    /// Interleaved ECC codewords
    Ecc,
    /// Past the last codeword; reads return 0
    Pad,
}

/// Sequential reader over the interleaved codewords of a set of RS blocks
#[derive(Debug, Clone)]
pub struct CodewordStream<'a> {
    blocks: Vec<RsBlock<'a>>,
    b1: usize,
    data_length: usize,
    ecc_length: usize,
    cursor: usize,
}

impl<'a> CodewordStream<'a> {
    /// Create a stream positioned at the first data codeword
    pub fn new(rs_blocks: &'a RsBlocks) -> Self {
        Self {
            blocks: rs_blocks.blocks().collect(),
            b1: rs_blocks.b1(),
            data_length: rs_blocks.data_length(),
            ecc_length: rs_blocks.ecc_length(),
            cursor: 0,
        }
    }

    /// Return the codeword at the cursor and advance by one
    pub fn next_codeword(&mut self) -> u8 {
        let count = self.cursor;
        let block_count = self.blocks.len();

        let ret = if count < self.data_length {
            let mut row = count % block_count;
            let col = count / block_count;
            // Group-1 blocks are exhausted in the last column; only group 2 remains
            if col >= self.blocks[0].data_length() {
                row += self.b1;
            }
            self.blocks[row].data()[col]
        } else if count < self.data_length + self.ecc_length {
            let offset = count - self.data_length;
            let row = offset % block_count;
            let col = offset / block_count;
            self.blocks[row].ecc()[col]
        } else {
            0
        };

        self.cursor = self.cursor.saturating_add(1);
        ret
    }

    /// Number of codewords read so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Data plus ECC codewords, i.e. reads before padding starts
    pub fn total_len(&self) -> usize {
        self.data_length + self.ecc_length
    }

    /// Real codewords left before padding starts
    pub fn remaining(&self) -> usize {
        self.total_len().saturating_sub(self.cursor)
    }

    /// Phase the next read falls into
    pub fn phase(&self) -> Phase {
        if self.cursor < self.data_length {
            Phase::Data
        } else if self.cursor < self.total_len() {
            Phase::Ecc
        } else {
            Phase::Pad
        }
    }

    /// Number of RS blocks being interleaved
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Never exhausted: after the last real codeword every item is `0`.
/// Use `take(total_len())` to collect the symbol's codewords.
impl Iterator for CodewordStream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        Some(self.next_codeword())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// Undo the interleave of a codeword sequence
///
/// Returns the data buffer and ECC buffer in block order, i.e. exactly the
/// buffers the blocks were built from. Codewords past the symbol's total
/// (padding) are ignored.
pub fn deinterleave(codewords: &[u8], spec: &BlockSpec) -> Result<(Vec<u8>, Vec<u8>)> {
    spec.validate()?;
    let total = spec.total_codewords();
    if codewords.len() < total {
        return Err(RawCodeError::LengthMismatch {
            expected: total,
            actual: codewords.len(),
        });
    }

    let num_blocks = spec.block_count();
    let mut data = vec![0u8; spec.data_length()];
    let mut ecc = vec![0u8; spec.ecc_length()];

    let mut idx = 0;
    for i in 0..spec.max_block_data_length() {
        for b in 0..num_blocks {
            let range = spec.block_data_range(b);
            if i < range.len() {
                data[range.start + i] = codewords[idx];
                idx += 1;
            }
        }
    }

    for i in 0..spec.el1 {
        for b in 0..num_blocks {
            let range = spec.block_ecc_range(b);
            ecc[range.start + i] = codewords[idx];
            idx += 1;
        }
    }

    Ok((data, ecc))
}
