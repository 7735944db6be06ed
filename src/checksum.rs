//! Checksum algorithms used by vendor System Exclusive formats
//!
//! Every algorithm folds a non-empty run of data bytes (all `<= 0x7F`) into a single 7-bit value.
//! Callers are expected to hand in the payload region only, never the `0xF0` status byte, the
//! checksum itself or the trailing `0xF7`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mask for the 7 data bits of a MIDI byte
const DATA_MASK: u8 = 0x7F;

/// The checksum scheme a vendor format uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Checksum {
    /// Sum of all bytes modulo 128
    Additive,
    /// Roland style checksum, `(128 - sum) % 128`. Adding it to the payload sum yields 0 mod 128
    Roland,
    /// Bitwise exclusive-or of all bytes
    Xor,
    /// 7-bit one's complement of the additive sum, `127 - sum % 128`.
    /// Only the E-mu Proteus 2000 preset dump uses this one
    OnesComplement,
}

impl Checksum {
    /// Computes the checksum of `bytes` with this algorithm
    pub fn compute(self, bytes: &[u8]) -> u8 {
        match self {
            Self::Additive => additive(bytes),
            Self::Roland => roland(bytes),
            Self::Xor => xor(bytes),
            Self::OnesComplement => DATA_MASK - additive(bytes),
        }
    }
}

/// Sum of all bytes, modulo 128
pub fn additive(bytes: &[u8]) -> u8 {
    debug_assert!(!bytes.is_empty(), "checksum over an empty range");
    // 128 divides 256, so wrapping in u8 keeps the low 7 bits exact
    bytes.iter().fold(0u8, |sum, byte| sum.wrapping_add(*byte)) & DATA_MASK
}

/// Roland style checksum: `(128 - additive) % 128`
pub fn roland(bytes: &[u8]) -> u8 {
    (0x80 - additive(bytes)) & DATA_MASK
}

/// Exclusive-or of all bytes, left to right
pub fn xor(bytes: &[u8]) -> u8 {
    debug_assert!(!bytes.is_empty(), "checksum over an empty range");
    bytes.iter().fold(0, |acc, byte| acc ^ byte)
}
