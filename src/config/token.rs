//! Configuration for fungible token ledgers.

use crate::domain::{Amount, Decimals};
use crate::error::DexError;

/// Metadata and genesis supply of a token ledger.
///
/// # Validation
///
/// - `name` and `symbol` must be non-empty.
/// - `decimals` is validated at [`Decimals`] construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    name: String,
    symbol: String,
    decimals: Decimals,
    initial_supply: Amount,
}

impl TokenConfig {
    /// Creates a new `TokenConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `name` or `symbol`
    /// is empty.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: Decimals,
        initial_supply: Amount,
    ) -> Result<Self, DexError> {
        let config = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            initial_supply,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `name` or `symbol`
    /// is empty.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.name.trim().is_empty() {
            return Err(DexError::InvalidConfiguration("token name must be non-empty"));
        }
        if self.symbol.trim().is_empty() {
            return Err(DexError::InvalidConfiguration("token symbol must be non-empty"));
        }
        Ok(())
    }

    /// Human-readable name; also hashed into the domain separator.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Supply minted to the deployer-chosen holder at genesis.
    pub const fn initial_supply(&self) -> Amount {
        self.initial_supply
    }
}
