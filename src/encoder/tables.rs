use crate::error::{RawCodeError, Result};
use crate::models::ECLevel;
use log::debug;
use std::ops::Range;

/// Reed-Solomon block partition of one (version, level) pair
///
/// Group 1 holds `n1` blocks of `dl1` data codewords, group 2 holds `n2`
/// blocks of `dl2 = dl1 + 1`. Every block carries the same number of
/// parity codewords.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    /// Number of group-1 blocks
    pub n1: usize,
    /// Data codewords per group-1 block
    pub dl1: usize,
    /// ECC codewords per group-1 block
    pub el1: usize,
    /// Number of group-2 blocks
    pub n2: usize,
    /// Data codewords per group-2 block
    pub dl2: usize,
    /// ECC codewords per group-2 block
    pub el2: usize,
}

impl BlockSpec {
    /// Total number of RS blocks
    pub fn block_count(&self) -> usize {
        self.n1 + self.n2
    }

    /// Total number of data codewords
    pub fn data_length(&self) -> usize {
        self.n1 * self.dl1 + self.n2 * self.dl2
    }

    /// Total number of ECC codewords
    pub fn ecc_length(&self) -> usize {
        self.n1 * self.el1 + self.n2 * self.el2
    }

    /// Total number of codewords in the symbol
    pub fn total_codewords(&self) -> usize {
        self.data_length() + self.ecc_length()
    }

    /// Check the layout the interleave depends on
    ///
    /// At least one group-1 block, non-empty blocks, equal parity length in
    /// both groups and group-2 blocks exactly one codeword longer.
    pub fn validate(&self) -> Result<()> {
        let ok = self.n1 >= 1
            && self.dl1 >= 1
            && self.el1 >= 1
            && (self.n2 == 0 || (self.dl2 == self.dl1 + 1 && self.el2 == self.el1));
        if ok {
            Ok(())
        } else {
            Err(RawCodeError::InvalidBlockSpec { spec: *self })
        }
    }

    /// Data length of the longest block (the column count of the data phase)
    pub fn max_block_data_length(&self) -> usize {
        if self.n2 > 0 { self.dl2 } else { self.dl1 }
    }

    /// Both block groups, group 1 first
    pub fn groups(&self) -> [BlockGroup; 2] {
        [
            BlockGroup {
                number: 1,
                count: self.n1,
                data_len: self.dl1,
                ecc_len: self.el1,
            },
            BlockGroup {
                number: 2,
                count: self.n2,
                data_len: self.dl2,
                ecc_len: self.el2,
            },
        ]
    }

    /// Range of block `index` inside the concatenated data buffer
    pub fn block_data_range(&self, index: usize) -> Range<usize> {
        if index < self.n1 {
            let start = index * self.dl1;
            start..start + self.dl1
        } else {
            let start = self.n1 * self.dl1 + (index - self.n1) * self.dl2;
            start..start + self.dl2
        }
    }

    /// Range of block `index` inside the concatenated ECC buffer
    pub fn block_ecc_range(&self, index: usize) -> Range<usize> {
        if index < self.n1 {
            let start = index * self.el1;
            start..start + self.el1
        } else {
            let start = self.n1 * self.el1 + (index - self.n1) * self.el2;
            start..start + self.el2
        }
    }
}

/// One group of equally sized blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockGroup {
    /// 1 or 2
    pub number: usize,
    /// Number of blocks in the group
    pub count: usize,
    /// Data codewords per block
    pub data_len: usize,
    /// ECC codewords per block
    pub ecc_len: usize,
}

// Tables from the QR Code specification (Model 2) via Nayuki QR Code generator.
// Index: [ec_level][version]
const ECC_CODEWORDS_PER_BLOCK: [[i8; 41]; 4] = [
    [
        -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28,
        30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Low
    [
        -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28,
        28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    ], // Medium
    [
        -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30,
        30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // Quartile
    [
        -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24,
        30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ], // High
];

const NUM_ERROR_CORRECTION_BLOCKS: [[i8; 41]; 4] = [
    [
        -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12,
        13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ], // Low
    [
        -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21,
        23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ], // Medium
    [
        -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27,
        29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ], // Quartile
    [
        -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32,
        35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ], // High
];

/// Resolve the block partition for a version and error correction level
pub fn block_spec(version: u8, ec_level: ECLevel) -> Result<BlockSpec> {
    if !(1..=40).contains(&version) {
        return Err(RawCodeError::UnsupportedSpec {
            version,
            level: ec_level,
        });
    }
    let idx = ec_level.index();
    let ecc = ECC_CODEWORDS_PER_BLOCK[idx][version as usize];
    let blocks = NUM_ERROR_CORRECTION_BLOCKS[idx][version as usize];
    debug_assert!(ecc > 0 && blocks > 0);
    let ecc = ecc as usize;
    let blocks = blocks as usize;

    let total = total_codewords(version);
    let n2 = total % blocks;
    let n1 = blocks - n2;
    let dl1 = total / blocks - ecc;

    let spec = BlockSpec {
        n1,
        dl1,
        el1: ecc,
        n2,
        dl2: dl1 + 1,
        el2: ecc,
    };
    debug!(
        "block spec {}-{:?}: {}x{} + {}x{} data, {} ecc per block",
        version, ec_level, n1, dl1, n2, spec.dl2, ecc
    );
    Ok(spec)
}

/// Number of data codewords a symbol can carry
pub fn max_data_length(version: u8, ec_level: ECLevel) -> Result<usize> {
    block_spec(version, ec_level).map(|spec| spec.data_length())
}

/// Total codewords (data + ECC) of a version
pub fn total_codewords(version: u8) -> usize {
    raw_data_modules(version) / 8
}

/// Zero bits appended after the last codeword to fill the symbol
pub fn remainder_bits(version: u8) -> usize {
    match version {
        2..=6 => 7,
        14..=20 | 28..=34 => 3,
        21..=27 => 4,
        _ => 0,
    }
}

// Modules left for codewords once function patterns and format/version
// areas are removed.
fn raw_data_modules(version: u8) -> usize {
    let ver = version as usize;
    let mut result = (16 * ver + 128) * ver + 64;
    if ver >= 2 {
        let num_align = ver / 7 + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if ver >= 7 {
            result -= 36;
        }
    }
    result
}
