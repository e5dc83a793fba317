//! Reed-Solomon block partitioning
//!
//! The data codewords of a symbol are split into two groups of blocks,
//! group 2's blocks one codeword longer than group 1's. Each block gets
//! its parity written into one shared, pre-allocated ECC buffer; blocks
//! themselves are only views into the data and ECC buffers.

use crate::encoder::codeword_stream::CodewordStream;
use crate::encoder::reed_solomon::{ParityEncoder, syndromes};
use crate::encoder::tables::{BlockGroup, BlockSpec};
use crate::error::{RawCodeError, Result};
use log::{debug, trace, warn};
use rayon::prelude::*;

/// A single RS block: a view into the shared data and ECC buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsBlock<'a> {
    index: usize,
    group: usize,
    data: &'a [u8],
    ecc: &'a [u8],
}

impl<'a> RsBlock<'a> {
    /// Row of this block in the interleave (group 1 blocks first)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Block group (1 or 2)
    pub fn group(&self) -> usize {
        self.group
    }

    /// Data codewords of this block
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Parity codewords of this block
    pub fn ecc(&self) -> &'a [u8] {
        self.ecc
    }

    /// Number of data codewords in this block
    pub fn data_length(&self) -> usize {
        self.data.len()
    }

    /// Number of parity codewords in this block
    pub fn ecc_length(&self) -> usize {
        self.ecc.len()
    }

    /// True if the parity matches the data under the QR generator polynomial
    pub fn is_consistent(&self) -> bool {
        let mut codeword = Vec::with_capacity(self.data.len() + self.ecc.len());
        codeword.extend_from_slice(self.data);
        codeword.extend_from_slice(self.ecc);
        syndromes(&codeword, self.ecc.len()).iter().all(|&s| s == 0)
    }
}

/// All RS blocks of a symbol together with the buffers they view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsBlocks {
    spec: BlockSpec,
    data: Vec<u8>,
    ecc: Vec<u8>,
}

impl RsBlocks {
    /// Partition `data` into blocks and compute every block's parity
    ///
    /// `data` must hold exactly `spec.data_length()` codewords. The
    /// encoder is configured once per group; a configuration failure in
    /// either group aborts construction.
    pub fn build<E: ParityEncoder>(data: &[u8], spec: BlockSpec) -> Result<Self> {
        Self::build_with::<E, _>(data, spec, |rs, group, data, ecc| {
            for (block, parity) in data
                .chunks(group.data_len)
                .zip(ecc.chunks_mut(group.ecc_len))
            {
                rs.encode_into(block, parity);
            }
        })
    }

    /// Same as [`RsBlocks::build`], computing block parity in parallel
    ///
    /// Every block writes into its own disjoint slice of the ECC buffer,
    /// so the result is byte-identical to the sequential build.
    pub fn build_par<E: ParityEncoder + Sync>(data: &[u8], spec: BlockSpec) -> Result<Self> {
        Self::build_with::<E, _>(data, spec, |rs, group, data, ecc| {
            ecc.par_chunks_mut(group.ecc_len)
                .zip(data.par_chunks(group.data_len))
                .for_each(|(parity, block)| rs.encode_into(block, parity));
        })
    }

    fn build_with<E, F>(data: &[u8], spec: BlockSpec, encode_group: F) -> Result<Self>
    where
        E: ParityEncoder,
        F: Fn(&E, &BlockGroup, &[u8], &mut [u8]),
    {
        if data.is_empty() {
            return Err(RawCodeError::EmptyInput);
        }
        spec.validate()?;
        let expected = spec.data_length();
        if data.len() != expected {
            return Err(RawCodeError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }

        let data = data.to_vec();
        let mut ecc = vec![0u8; spec.ecc_length()];
        let mut data_pos = 0;
        let mut ecc_pos = 0;

        for group in spec.groups() {
            if group.count == 0 {
                continue;
            }
            let rs = E::configure(group.data_len, group.ecc_len).inspect_err(|err| {
                warn!("RS block group {}: {}", group.number, err);
            })?;

            let data_end = data_pos + group.count * group.data_len;
            let ecc_end = ecc_pos + group.count * group.ecc_len;
            encode_group(
                &rs,
                &group,
                &data[data_pos..data_end],
                &mut ecc[ecc_pos..ecc_end],
            );
            trace!(
                "group {}: {} blocks, data {}..{}, ecc {}..{}",
                group.number, group.count, data_pos, data_end, ecc_pos, ecc_end
            );

            data_pos = data_end;
            ecc_pos = ecc_end;
        }

        debug!(
            "built {} RS blocks ({} data, {} ecc codewords)",
            spec.block_count(),
            data_pos,
            ecc_pos
        );
        Ok(Self { spec, data, ecc })
    }

    /// Block partition these blocks were built from
    pub fn spec(&self) -> &BlockSpec {
        &self.spec
    }

    /// Number of blocks
    pub fn len(&self) -> usize {
        self.spec.block_count()
    }

    /// Always false for blocks that passed construction
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of group-1 (short) blocks
    pub fn b1(&self) -> usize {
        self.spec.n1
    }

    /// Total data codewords across all blocks
    pub fn data_length(&self) -> usize {
        self.data.len()
    }

    /// Total ECC codewords across all blocks
    pub fn ecc_length(&self) -> usize {
        self.ecc.len()
    }

    /// Concatenated data codewords, in block order
    pub fn data_buffer(&self) -> &[u8] {
        &self.data
    }

    /// Concatenated parity codewords, in block order
    pub fn ecc_buffer(&self) -> &[u8] {
        &self.ecc
    }

    /// Get block `index`, or `None` when out of range
    pub fn block(&self, index: usize) -> Option<RsBlock<'_>> {
        if index >= self.len() {
            return None;
        }
        Some(RsBlock {
            index,
            group: if index < self.spec.n1 { 1 } else { 2 },
            data: &self.data[self.spec.block_data_range(index)],
            ecc: &self.ecc[self.spec.block_ecc_range(index)],
        })
    }

    /// Iterate over the blocks, group 1 first
    pub fn blocks(&self) -> impl Iterator<Item = RsBlock<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.block(i))
    }

    /// Start a new interleaved reader at the first codeword
    pub fn stream(&self) -> CodewordStream<'_> {
        CodewordStream::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::reed_solomon::ReedSolomonEncoder;
    use crate::encoder::tables::block_spec;
    use crate::models::ECLevel;

    /// Parity is the block's data length followed by its first byte
    struct MarkerEncoder;

    impl ParityEncoder for MarkerEncoder {
        fn configure(_data_len: usize, _ecc_len: usize) -> Result<Self> {
            Ok(MarkerEncoder)
        }

        fn encode_into(&self, data: &[u8], parity: &mut [u8]) {
            parity.fill(data[0]);
            parity[0] = data.len() as u8;
        }
    }

    /// Refuses to configure blocks of `N` data codewords
    struct RejectLen<const N: usize>;

    impl<const N: usize> ParityEncoder for RejectLen<N> {
        fn configure(data_len: usize, ecc_len: usize) -> Result<Self> {
            if data_len == N {
                Err(RawCodeError::Allocation { data_len, ecc_len })
            } else {
                Ok(RejectLen)
            }
        }

        fn encode_into(&self, _data: &[u8], parity: &mut [u8]) {
            parity.fill(0);
        }
    }

    fn sequential(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn test_build_version5_quartile() {
        let spec = block_spec(5, ECLevel::Q).unwrap();
        let data = sequential(spec.data_length());
        let blocks = RsBlocks::build::<MarkerEncoder>(&data, spec).unwrap();

        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks.b1(), 2);
        let lens: Vec<usize> = blocks.blocks().map(|b| b.data_length()).collect();
        assert_eq!(lens, vec![15, 15, 16, 16]);
        let groups: Vec<usize> = blocks.blocks().map(|b| b.group()).collect();
        assert_eq!(groups, vec![1, 1, 2, 2]);

        let third = blocks.block(2).unwrap();
        assert_eq!(third.data()[0], 30);
        assert_eq!(third.ecc().len(), 18);
        assert_eq!(third.ecc()[0], 16);
        assert_eq!(third.ecc()[1], 30);
        assert!(blocks.block(4).is_none());
    }

    #[test]
    fn test_block_lengths_sum_to_spec() {
        for version in 1..=40u8 {
            for level in ECLevel::ALL {
                let spec = block_spec(version, level).unwrap();
                let data = vec![0u8; spec.data_length()];
                let blocks = RsBlocks::build::<MarkerEncoder>(&data, spec).unwrap();
                let data_sum: usize = blocks.blocks().map(|b| b.data_length()).sum();
                let ecc_sum: usize = blocks.blocks().map(|b| b.ecc_length()).sum();
                assert_eq!(data_sum, spec.data_length());
                assert_eq!(ecc_sum, spec.ecc_length());
                assert_eq!(blocks.blocks().count(), spec.block_count());
            }
        }
    }

    #[test]
    fn test_single_group_spec() {
        let spec = block_spec(1, ECLevel::L).unwrap();
        let data = sequential(19);
        let blocks = RsBlocks::build::<ReedSolomonEncoder>(&data, spec).unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks.block(0).unwrap().data(), &data[..]);
        assert_eq!(blocks.ecc_buffer().len(), 7);
    }

    #[test]
    fn test_rs_parity_is_consistent() {
        let spec = block_spec(7, ECLevel::H).unwrap();
        let data: Vec<u8> = (0..spec.data_length()).map(|i| (i * 37 + 11) as u8).collect();
        let blocks = RsBlocks::build::<ReedSolomonEncoder>(&data, spec).unwrap();
        assert!(blocks.blocks().all(|b| b.is_consistent()));
        assert_eq!(blocks.data_buffer(), &data[..]);
    }

    #[test]
    fn test_parallel_build_matches_sequential() {
        let spec = block_spec(40, ECLevel::H).unwrap();
        let data: Vec<u8> = (0..spec.data_length()).map(|i| (i ^ 0x5A) as u8).collect();
        let seq = RsBlocks::build::<ReedSolomonEncoder>(&data, spec).unwrap();
        let par = RsBlocks::build_par::<ReedSolomonEncoder>(&data, spec).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn test_empty_input() {
        let spec = block_spec(1, ECLevel::M).unwrap();
        assert_eq!(
            RsBlocks::build::<ReedSolomonEncoder>(&[], spec),
            Err(RawCodeError::EmptyInput)
        );
    }

    #[test]
    fn test_length_mismatch() {
        let spec = block_spec(1, ECLevel::M).unwrap();
        assert_eq!(
            RsBlocks::build::<ReedSolomonEncoder>(&[0u8; 15], spec),
            Err(RawCodeError::LengthMismatch {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_group1_configure_failure() {
        let spec = block_spec(5, ECLevel::Q).unwrap();
        let data = vec![0u8; spec.data_length()];
        assert_eq!(
            RsBlocks::build::<RejectLen<15>>(&data, spec),
            Err(RawCodeError::Allocation {
                data_len: 15,
                ecc_len: 18
            })
        );
        assert!(RsBlocks::build_par::<RejectLen<15>>(&data, spec).is_err());
    }

    #[test]
    fn test_group2_configure_failure() {
        let spec = block_spec(5, ECLevel::Q).unwrap();
        let data = vec![0u8; spec.data_length()];
        assert_eq!(
            RsBlocks::build::<RejectLen<16>>(&data, spec),
            Err(RawCodeError::Allocation {
                data_len: 16,
                ecc_len: 18
            })
        );
        assert_eq!(
            RsBlocks::build_par::<RejectLen<16>>(&data, spec),
            Err(RawCodeError::Allocation {
                data_len: 16,
                ecc_len: 18
            })
        );
    }

    #[test]
    fn test_overlong_group2_rejected() {
        // Group 2 two codewords longer would send the last column past the block list
        let spec = BlockSpec {
            n1: 1,
            dl1: 3,
            el1: 2,
            n2: 1,
            dl2: 5,
            el2: 2,
        };
        let data = vec![1u8; spec.data_length()];
        assert_eq!(
            RsBlocks::build::<MarkerEncoder>(&data, spec),
            Err(RawCodeError::InvalidBlockSpec { spec })
        );
        assert!(RsBlocks::build_par::<MarkerEncoder>(&data, spec).is_err());
    }

    #[test]
    fn test_missing_group1_rejected() {
        let spec = BlockSpec {
            n1: 0,
            dl1: 3,
            el1: 2,
            n2: 2,
            dl2: 4,
            el2: 2,
        };
        let data = vec![1u8; spec.data_length()];
        assert_eq!(
            RsBlocks::build::<MarkerEncoder>(&data, spec),
            Err(RawCodeError::InvalidBlockSpec { spec })
        );
    }

    #[test]
    fn test_mismatched_parity_length_rejected() {
        let spec = BlockSpec {
            n1: 1,
            dl1: 3,
            el1: 2,
            n2: 1,
            dl2: 4,
            el2: 3,
        };
        let data = vec![1u8; spec.data_length()];
        assert_eq!(
            RsBlocks::build::<MarkerEncoder>(&data, spec),
            Err(RawCodeError::InvalidBlockSpec { spec })
        );
    }

    #[test]
    fn test_hand_built_spec_streams_fully() {
        let spec = BlockSpec {
            n1: 1,
            dl1: 3,
            el1: 2,
            n2: 1,
            dl2: 4,
            el2: 2,
        };
        let data: Vec<u8> = (10..17).collect();
        let blocks = RsBlocks::build::<MarkerEncoder>(&data, spec).unwrap();
        let out: Vec<u8> = blocks.stream().take(spec.total_codewords() + 2).collect();
        assert_eq!(out, vec![10, 13, 11, 14, 12, 15, 16, 3, 4, 10, 13, 0, 0]);
    }

    #[test]
    fn test_group2_never_configured_without_blocks() {
        // 1-L has no group 2, so a 20-byte rejection never triggers
        let spec = block_spec(1, ECLevel::L).unwrap();
        let data = vec![0u8; spec.data_length()];
        assert!(RsBlocks::build::<RejectLen<20>>(&data, spec).is_ok());
    }
}
