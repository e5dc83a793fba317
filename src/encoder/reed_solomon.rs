//! Reed-Solomon parity generation for QR codes
//! QR codes use RS over GF(256) with primitive polynomial x^8 + x^4 + x^3 + x^2 + 1

use crate::error::{RawCodeError, Result};

/// GF(256) field operations using log/exp tables
pub struct Gf256;

static LOG_TABLE: [u8; 256] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

static EXP_TABLE: [u8; 256] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1,
];

impl Gf256 {
    /// Multiply two field elements
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        let log_b = LOG_TABLE[b as usize] as usize;
        EXP_TABLE[(log_a + log_b) % 255]
    }

    /// alpha^n, reduced modulo the multiplicative group order
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }
}

/// Parity generator configured once per block group
///
/// `configure` may fail when the group's code parameters cannot be
/// represented; `encode_into` then fills exactly `ecc_len` bytes.
pub trait ParityEncoder: Sized {
    /// Set up the generator for blocks of `data_len` data and `ecc_len` parity bytes
    fn configure(data_len: usize, ecc_len: usize) -> Result<Self>;

    /// Compute the parity of `data` into `parity`
    ///
    /// `parity` is expected to be `ecc_len` bytes long, as passed to
    /// `configure`; [`RsBlocks`](crate::encoder::rs_block::RsBlocks) always
    /// hands out slices of that length. Implementations must not panic on
    /// any other length.
    fn encode_into(&self, data: &[u8], parity: &mut [u8]);
}

/// Systematic Reed-Solomon encoder for QR codes
///
/// First consecutive root alpha^0, primitive element alpha = 2.
#[derive(Debug, Clone)]
pub struct ReedSolomonEncoder {
    data_len: usize,
    // Descending coefficients of g(x) without the leading 1
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Number of parity bytes produced per block
    pub fn ecc_len(&self) -> usize {
        self.generator.len()
    }

    /// Number of data bytes expected per block
    pub fn data_len(&self) -> usize {
        self.data_len
    }

    /// Encode a block and return its parity bytes
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let mut parity = vec![0u8; self.generator.len()];
        self.encode_into(data, &mut parity);
        parity
    }

    fn build_generator(ecc_len: usize) -> Vec<u8> {
        // g(x) = prod (x + alpha^i), i = 0..ecc_len
        let mut gpoly = Vec::with_capacity(ecc_len + 1);
        gpoly.push(1u8);
        for i in 0..ecc_len {
            let root = Gf256::exp(i);
            gpoly.push(0);
            for j in (1..gpoly.len()).rev() {
                gpoly[j] ^= Gf256::mul(gpoly[j - 1], root);
            }
        }
        gpoly.remove(0);
        gpoly
    }
}

impl ParityEncoder for ReedSolomonEncoder {
    fn configure(data_len: usize, ecc_len: usize) -> Result<Self> {
        if data_len == 0 || ecc_len == 0 || data_len + ecc_len > 255 {
            return Err(RawCodeError::Allocation { data_len, ecc_len });
        }
        Ok(Self {
            data_len,
            generator: Self::build_generator(ecc_len),
        })
    }

    fn encode_into(&self, data: &[u8], parity: &mut [u8]) {
        let ecc_len = self.generator.len();
        if parity.len() != ecc_len {
            // Leading parity bytes, zero-filled past ecc_len
            let full = self.encode(data);
            let n = full.len().min(parity.len());
            parity[..n].copy_from_slice(&full[..n]);
            parity[n..].fill(0);
            return;
        }
        parity.fill(0);

        // Polynomial division: data * x^ecc_len mod g(x)
        for &d in data {
            let factor = d ^ parity[0];
            parity.copy_within(1.., 0);
            parity[ecc_len - 1] = 0;
            if factor != 0 {
                for (p, &g) in parity.iter_mut().zip(&self.generator) {
                    *p ^= Gf256::mul(g, factor);
                }
            }
        }
    }
}

/// Evaluate a data+parity codeword at alpha^0 .. alpha^(ecc_len-1)
///
/// Every syndrome is zero for an unmodified codeword.
pub fn syndromes(codeword: &[u8], ecc_len: usize) -> Vec<u8> {
    (0..ecc_len)
        .map(|i| {
            let x = Gf256::exp(i);
            // Descending convention: codeword[0] is the coefficient of x^(n-1)
            codeword
                .iter()
                .fold(0u8, |acc, &c| Gf256::mul(acc, x) ^ c)
        })
        .collect()
}
