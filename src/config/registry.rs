//! Configuration for the pair registry.

use crate::domain::{Address, FeeTier};
use crate::error::DexError;

/// Default protocol fee share: one sixth of invariant growth.
pub const DEFAULT_PROTOCOL_FEE_SHARE: u8 = 6;

/// Parameters of a [`PairRegistry`](crate::factory::PairRegistry).
///
/// # Validation
///
/// - `fee_to_setter` must not be the null account.
/// - `fee_tier` must be below 100%.
/// - `protocol_fee_share` (the `n` in "1/n of growth") must be at least 1.
///
/// # Examples
///
/// ```
/// use hydra_dex::config::RegistryConfig;
/// use hydra_dex::domain::{Address, BasisPoints, FeeTier};
///
/// let owner = Address::from_low_u64(0xa11ce);
/// let cfg = RegistryConfig::new(owner)
///     .expect("non-zero setter")
///     .with_fee_tier(FeeTier::new(BasisPoints::new(25)))
///     .expect("valid fee");
/// assert_eq!(cfg.fee_tier().basis_points().get(), 25);
/// assert_eq!(cfg.protocol_fee_share(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    fee_to_setter: Address,
    fee_tier: FeeTier,
    protocol_fee_share: u8,
}

impl RegistryConfig {
    /// Creates a config with the default 30 bp fee and 1/6 protocol share.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::ZeroAddress`] if `fee_to_setter` is null.
    pub fn new(fee_to_setter: Address) -> Result<Self, DexError> {
        let config = Self {
            fee_to_setter,
            fee_tier: FeeTier::DEFAULT,
            protocol_fee_share: DEFAULT_PROTOCOL_FEE_SHARE,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replaces the trading fee.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] for a fee of 100% or more.
    pub fn with_fee_tier(mut self, fee_tier: FeeTier) -> Result<Self, DexError> {
        self.fee_tier = fee_tier;
        self.validate()?;
        Ok(self)
    }

    /// Replaces the protocol fee share denominator.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `share` is zero.
    pub fn with_protocol_fee_share(mut self, share: u8) -> Result<Self, DexError> {
        self.protocol_fee_share = share;
        self.validate()?;
        Ok(self)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// - [`DexError::ZeroAddress`] if the fee setter is null.
    /// - [`DexError::InvalidConfiguration`] for an untradable fee or a
    ///   zero protocol share.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.fee_to_setter.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        if !self.fee_tier.is_tradable() {
            return Err(DexError::InvalidConfiguration("fee tier must be below 100%"));
        }
        if self.protocol_fee_share == 0 {
            return Err(DexError::InvalidConfiguration(
                "protocol fee share must be at least 1",
            ));
        }
        Ok(())
    }

    /// Account allowed to change fee settings.
    #[must_use]
    pub const fn fee_to_setter(&self) -> Address {
        self.fee_to_setter
    }

    /// Trading fee applied by every pair the registry creates.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// `n` such that the protocol collects `1/n` of invariant growth.
    #[must_use]
    pub const fn protocol_fee_share(&self) -> u8 {
        self.protocol_fee_share
    }
}
