//! Twenty-byte account and contract identity.

use core::fmt;

use crate::error::DexError;

/// An account or contract address on the ledger.
///
/// Wraps a fixed `[u8; 20]`.  Ordering is lexicographic over the bytes,
/// which equals numeric ordering of the big-endian value; pairs use it to
/// put the lower address first.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Address;
///
/// let addr = Address::from_low_u64(0x10);
/// assert!(!addr.is_zero());
/// assert!(Address::ZERO < addr);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The null account.  Locked liquidity is minted here.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20 bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Returns `true` for the null account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Builds an address whose last eight bytes hold `value` big-endian.
    ///
    /// Handy for well-known fixture accounts.
    #[must_use]
    pub fn from_low_u64(value: u64) -> Self {
        let mut bytes = [0u8; 20];
        bytes[12..].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Takes the trailing 20 bytes of a 32-byte hash.
    #[must_use]
    pub fn from_hash(hash: &[u8; 32]) -> Self {
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// Parses a `0x`-prefixed (or bare) 40-digit hex string.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if the string is not
    /// exactly 20 bytes of hex.
    pub fn from_hex(text: &str) -> Result<Self, DexError> {
        let digits = text.strip_prefix("0x").unwrap_or(text);
        let decoded = hex::decode(digits)
            .map_err(|_| DexError::InvalidConfiguration("address is not valid hex"))?;
        let bytes: [u8; 20] = decoded
            .try_into()
            .map_err(|_| DexError::InvalidConfiguration("address must be 20 bytes"))?;
        Ok(Self(bytes))
    }

    /// Left-pads the address into a 32-byte ABI word.
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&self.0);
        word
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address(0x{})", hex::encode(self.0))
    }
}
