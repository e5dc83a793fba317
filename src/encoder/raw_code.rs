use crate::encoder::codeword_stream::CodewordStream;
use crate::encoder::config;
use crate::encoder::reed_solomon::ReedSolomonEncoder;
use crate::encoder::rs_block::RsBlocks;
use crate::encoder::tables::{BlockSpec, block_spec, remainder_bits};
use crate::error::{RawCodeError, Result};
use crate::models::{ECLevel, Version};
use log::debug;

/// Data codewords of one symbol split into RS blocks, ready to interleave
#[derive(Debug, Clone)]
pub struct RawCode {
    version: Version,
    level: ECLevel,
    blocks: RsBlocks,
}

impl RawCode {
    /// Build the RS blocks for the data codewords of a symbol
    ///
    /// # Arguments
    /// * `data` - Data codewords from the bit stream encoder; `None` fails with `EmptyInput`
    /// * `version` - Symbol version (1-40)
    /// * `level` - Error correction level
    pub fn new(data: Option<&[u8]>, version: u8, level: ECLevel) -> Result<Self> {
        let data = data.ok_or(RawCodeError::EmptyInput)?;
        let ver = Version::new(version).ok_or(RawCodeError::UnsupportedSpec { version, level })?;
        let spec = block_spec(version, level)?;

        let blocks = if spec.block_count() >= config::par_min_blocks() {
            debug!("building {} blocks in parallel", spec.block_count());
            RsBlocks::build_par::<ReedSolomonEncoder>(data, spec)?
        } else {
            RsBlocks::build::<ReedSolomonEncoder>(data, spec)?
        };

        Ok(Self {
            version: ver,
            level,
            blocks,
        })
    }

    /// Same as [`RawCode::new`] for data that is known to be present
    pub fn from_bytes(data: &[u8], version: u8, level: ECLevel) -> Result<Self> {
        Self::new(Some(data), version, level)
    }

    /// Symbol version
    pub fn version(&self) -> Version {
        self.version
    }

    /// Error correction level
    pub fn level(&self) -> ECLevel {
        self.level
    }

    /// Block partition of this symbol
    pub fn spec(&self) -> &BlockSpec {
        self.blocks.spec()
    }

    /// The RS blocks backing the stream
    pub fn blocks(&self) -> &RsBlocks {
        &self.blocks
    }

    /// Zero bits the matrix stage appends after the last codeword
    pub fn remainder_bits(&self) -> usize {
        remainder_bits(self.version.number())
    }

    /// Start a new interleaved reader at the first codeword
    pub fn stream(&self) -> CodewordStream<'_> {
        self.blocks.stream()
    }

    /// Collect the full interleaved codeword sequence (data then ECC)
    pub fn interleaved(&self) -> Vec<u8> {
        let stream = self.stream();
        let total = stream.total_len();
        stream.take(total).collect()
    }
}
