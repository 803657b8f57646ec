//! Configuration for the execution substrate.

use crate::error::DexError;

/// Block environment a [`Chain`](crate::chain::Chain) starts from.
///
/// The chain id is bound into every ledger's domain separator, so two
/// chains with different ids never accept each other's permits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    chain_id: u64,
    genesis_timestamp: u64,
}

impl ChainConfig {
    /// Creates a new `ChainConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `chain_id` is zero.
    pub fn new(chain_id: u64, genesis_timestamp: u64) -> Result<Self, DexError> {
        let config = Self {
            chain_id,
            genesis_timestamp,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `chain_id` is zero.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.chain_id == 0 {
            return Err(DexError::InvalidConfiguration("chain id must be non-zero"));
        }
        Ok(())
    }

    /// Chain identity bound into permit digests.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Block timestamp at genesis, in seconds.
    #[must_use]
    pub const fn genesis_timestamp(&self) -> u64 {
        self.genesis_timestamp
    }
}

impl Default for ChainConfig {
    /// Chain id 1 starting at timestamp zero.
    fn default() -> Self {
        Self {
            chain_id: 1,
            genesis_timestamp: 0,
        }
    }
}
