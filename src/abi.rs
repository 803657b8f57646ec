//! Keccak-256 hashing and 32-byte word encoding.
//!
//! Typed digests, domain separators and pair addresses all hash
//! concatenations of 32-byte big-endian words.  [`WordEncoder`] builds
//! those preimages.

use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
///
/// # Examples
///
/// ```
/// use hydra_dex::abi::keccak256;
///
/// let empty = keccak256(b"");
/// assert_eq!(
///     hex::encode(empty),
///     "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
/// );
/// ```
#[must_use]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Big-endian 32-byte word holding a `u64`.
#[must_use]
pub fn u64_word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

/// Accumulates 32-byte words and hashes the result.
#[derive(Debug, Default, Clone)]
pub struct WordEncoder {
    buf: Vec<u8>,
}

impl WordEncoder {
    /// Empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one word.
    #[must_use]
    pub fn word(mut self, word: [u8; 32]) -> Self {
        self.buf.extend_from_slice(&word);
        self
    }

    /// Encoded bytes so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Keccak-256 of the encoded words.
    #[must_use]
    pub fn hash(&self) -> [u8; 32] {
        keccak256(&self.buf)
    }
}
