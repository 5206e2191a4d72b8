use std::fmt;
use std::str::FromStr;

use crate::error::HuffmanError;

/// A sequence of bits packed most-significant-bit first.
///
/// Bits past `bit_count` in the last byte are always zero, so two vectors
/// holding the same logical bits compare and hash equal.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitVec {
    bits: Vec<u8>,
    bit_count: usize,
}

impl BitVec {
    pub fn new() -> Self {
        BitVec {
            bits: Vec::new(),
            bit_count: 0,
        }
    }

    pub fn with_capacity(bit_capacity: usize) -> Self {
        BitVec {
            bits: Vec::with_capacity(bit_capacity.div_ceil(8)),
            bit_count: 0,
        }
    }

    /// Rebuilds a vector from packed bytes, keeping only the first `bit_count` bits.
    ///
    /// Returns `None` if `bytes` is too short to hold `bit_count` bits.
    pub fn from_packed(bytes: &[u8], bit_count: usize) -> Option<Self> {
        let needed = bit_count.div_ceil(8);
        if bytes.len() < needed {
            return None;
        }
        let mut bits = bytes[..needed].to_vec();
        let tail = bit_count % 8;
        if tail != 0 {
            if let Some(last) = bits.last_mut() {
                *last &= 0xFFu8 << (8 - tail);
            }
        }
        Some(BitVec { bits, bit_count })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bit_count
    }

    pub fn is_empty(&self) -> bool {
        self.bit_count == 0
    }

    pub fn clear(&mut self) {
        self.bits.clear();
        self.bit_count = 0;
    }

    pub fn push_bit(&mut self, bit: bool) {
        let byte_index = self.bit_count / 8;
        let bit_offset = self.bit_count % 8;

        if byte_index >= self.bits.len() {
            self.bits.push(0);
        }

        if bit {
            self.bits[byte_index] |= 1 << (7 - bit_offset);
        }

        self.bit_count += 1;
    }

    /// Appends the low `bit_length` bits of `code`, highest first.
    pub fn push_bits(&mut self, code: u64, bit_length: usize) {
        debug_assert!(bit_length <= 64);
        for bit_pos in (0..bit_length).rev() {
            let bit = (code >> bit_pos) & 1;
            self.push_bit(bit != 0);
        }
    }

    pub fn extend_from_bitvec(&mut self, other: &BitVec) {
        if self.bit_count % 8 == 0 {
            // byte aligned: copy whole bytes
            self.bits.truncate(self.bit_count / 8);
            self.bits.extend_from_slice(&other.bits);
            self.bit_count += other.bit_count;
            return;
        }
        for bit in other.iter() {
            self.push_bit(bit);
        }
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.bit_count {
            return None;
        }
        Some(self.bits[index / 8] & (1 << (7 - index % 8)) != 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.bit_count).map(move |i| self.bits[i / 8] & (1 << (7 - i % 8)) != 0)
    }

    /// True if `self` is a prefix of `other`.
    pub fn is_prefix_of(&self, other: &BitVec) -> bool {
        self.bit_count <= other.bit_count && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitVec {
    type Err = HuffmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bits = BitVec::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => bits.push_bit(false),
                '1' => bits.push_bit(true),
                other => {
                    return Err(HuffmanError::invalid_table(format!(
                        "bit string contains {other:?}"
                    )))
                }
            }
        }
        Ok(bits)
    }
}

impl FromIterator<bool> for BitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut bits = BitVec::new();
        for bit in iter {
            bits.push_bit(bit);
        }
        bits
    }
}
