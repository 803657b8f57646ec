//! Token decimal places.

use crate::error::DexError;

/// Maximum allowed decimal places.
const MAX_DECIMALS: u8 = 18;

/// Display precision of a token ledger.
///
/// Valid range is `0..=18`.  Ledger arithmetic never looks at decimals;
/// they are metadata for wallets and front ends.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Decimals;
///
/// let d = Decimals::new(6).expect("6 is valid");
/// assert_eq!(d.get(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Decimals(u8);

impl Default for Decimals {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Decimals {
    /// Eighteen decimals, the ledger default.
    pub const STANDARD: Self = Self(MAX_DECIMALS);

    /// Creates a new `Decimals` value after validating the range.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `value` exceeds 18.
    pub const fn new(value: u8) -> Result<Self, DexError> {
        if value > MAX_DECIMALS {
            return Err(DexError::InvalidConfiguration("decimals must be 0..=18"));
        }
        Ok(Self(value))
    }

    /// Returns the raw decimal count.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_validated() {
        assert!(Decimals::new(0).is_ok());
        assert!(Decimals::new(18).is_ok());
        assert!(Decimals::new(19).is_err());
    }

    #[test]
    fn default_is_eighteen() {
        assert_eq!(Decimals::default().get(), 18);
    }
}
