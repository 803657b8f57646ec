//! Generic construction from configuration.
//!
//! [`FromConfig`] gives a uniform way to build a value from its validated
//! blueprint.  There is no blanket implementation; each pairing of target
//! and config type is written out explicitly.

use crate::error::DexError;

/// Construction from a configuration blueprint.
///
/// # Validation Contract
///
/// Implementations re-validate the configuration, so a successfully
/// constructed value always starts in a valid state.
///
/// # Implementors
///
/// - `impl FromConfig<ChainConfig> for Chain`
///
/// # Examples
///
/// ```
/// use hydra_dex::chain::Chain;
/// use hydra_dex::config::ChainConfig;
/// use hydra_dex::traits::FromConfig;
///
/// let config = ChainConfig::new(1, 1_000).expect("valid");
/// let chain = Chain::from_config(&config).expect("chain");
/// assert_eq!(chain.timestamp(), 1_000);
/// ```
pub trait FromConfig<C> {
    /// Creates a new instance from `config`.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidConfiguration`] (or a more specific variant) if
    /// the configuration is invalid.
    fn from_config(config: &C) -> Result<Self, DexError>
    where
        Self: Sized;
}
