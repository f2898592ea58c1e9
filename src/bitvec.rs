/// Fixed-length bit vectors for integrity puzzles.
///
/// A `BitVector` is the atomic entity of the corruption-repair family:
/// an ordered sequence of bits with a stable identity label. Length is
/// fixed at construction; individual bits are mutated in place.

use crate::error::{AgoraError, AgoraResult};

/// A fixed-length sequence of bits with an identity label.
///
/// `Clone` produces a deep copy with the same id — mutation of either
/// copy never affects the other.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct BitVector {
    id: String,
    bits: Vec<bool>,
}

impl BitVector {
    /// Create a vector from a literal bit sequence.
    ///
    /// Fails with [`AgoraError::BlankId`] if `id` is empty or whitespace,
    /// or [`AgoraError::EmptyBits`] if `bits` is empty.
    pub fn from_bits(id: impl Into<String>, bits: Vec<bool>) -> AgoraResult<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AgoraError::BlankId);
        }
        if bits.is_empty() {
            return Err(AgoraError::EmptyBits);
        }
        Ok(BitVector { id, bits })
    }

    /// Create a vector from a binary string like `"10100101"`.
    ///
    /// Fails with [`AgoraError::InvalidBitChar`] for any character other
    /// than `'0'` or `'1'`, identifying the offending index and character.
    pub fn from_bit_string(id: impl Into<String>, s: &str) -> AgoraResult<Self> {
        if s.is_empty() {
            return Err(AgoraError::EmptyBits);
        }
        let mut bits = Vec::with_capacity(s.len());
        for (index, ch) in s.chars().enumerate() {
            match ch {
                '0' => bits.push(false),
                '1' => bits.push(true),
                _ => return Err(AgoraError::InvalidBitChar { index, ch }),
            }
        }
        Self::from_bits(id, bits)
    }

    /// The identity label.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false` — construction rejects empty vectors.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Read the bit at `index`.
    pub fn get(&self, index: usize) -> AgoraResult<bool> {
        self.check_index(index)?;
        Ok(self.bits[index])
    }

    /// Set the bit at `index` to `value`.
    pub fn set(&mut self, index: usize, value: bool) -> AgoraResult<()> {
        self.check_index(index)?;
        self.bits[index] = value;
        Ok(())
    }

    /// Flip the bit at `index`.
    pub fn flip(&mut self, index: usize) -> AgoraResult<()> {
        self.check_index(index)?;
        self.bits[index] = !self.bits[index];
        Ok(())
    }

    /// Serialize as a binary string, `'1'` for true and `'0'` for false,
    /// in index order.
    pub fn to_bit_string(&self) -> String {
        self.bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    fn check_index(&self, index: usize) -> AgoraResult<()> {
        if index >= self.bits.len() {
            return Err(AgoraError::IndexOutOfRange {
                index,
                len: self.bits.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for BitVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.id, self.to_bit_string())
    }
}
