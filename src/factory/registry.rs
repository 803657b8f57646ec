//! Registry state: fee settings and the set of created pairs.

use std::collections::BTreeMap;

use super::address::pair_code_hash;
use crate::config::RegistryConfig;
use crate::domain::{Address, FeeTier, TokenPair};
use crate::error::{DexError, Result};

/// Sole authority over which pairs exist.
///
/// Lookups are order-independent: every pair is stored under both
/// `(token0, token1)` and `(token1, token0)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRegistry {
    address: Address,
    fee_to: Option<Address>,
    fee_to_setter: Address,
    fee_tier: FeeTier,
    protocol_fee_share: u8,
    pairs: BTreeMap<(Address, Address), Address>,
    all_pairs: Vec<Address>,
}

impl PairRegistry {
    /// Empty registry at `address`.
    #[must_use]
    pub fn new(address: Address, config: &RegistryConfig) -> Self {
        Self {
            address,
            fee_to: None,
            fee_to_setter: config.fee_to_setter(),
            fee_tier: config.fee_tier(),
            protocol_fee_share: config.protocol_fee_share(),
            pairs: BTreeMap::new(),
            all_pairs: Vec::new(),
        }
    }

    /// Registry address.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Protocol fee recipient, if the protocol fee is on.
    #[must_use]
    pub const fn fee_to(&self) -> Option<Address> {
        self.fee_to
    }

    /// Account allowed to change fee settings.
    #[must_use]
    pub const fn fee_to_setter(&self) -> Address {
        self.fee_to_setter
    }

    /// Trading fee of every pair created here.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// `n` such that the protocol collects `1/n` of invariant growth.
    #[must_use]
    pub const fn protocol_fee_share(&self) -> u8 {
        self.protocol_fee_share
    }

    /// Pair of `token_a` and `token_b`, in either order.
    #[must_use]
    pub fn get_pair(&self, token_a: Address, token_b: Address) -> Option<Address> {
        self.pairs.get(&(token_a, token_b)).copied()
    }

    /// The `index`-th pair ever created (zero-based).
    #[must_use]
    pub fn all_pairs(&self, index: usize) -> Option<Address> {
        self.all_pairs.get(index).copied()
    }

    /// Number of pairs created.
    #[must_use]
    pub fn all_pairs_length(&self) -> usize {
        self.all_pairs.len()
    }

    /// Fingerprint hashed into pair addresses.
    #[must_use]
    pub fn pair_code_hash(&self) -> [u8; 32] {
        pair_code_hash()
    }

    /// Turns the protocol fee on (recipient) or off (null account).
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Forbidden`] unless `caller` is the fee setter.
    pub fn set_fee_to(&mut self, caller: Address, fee_to: Address) -> Result<()> {
        self.authorize(caller)?;
        self.fee_to = (!fee_to.is_zero()).then_some(fee_to);
        Ok(())
    }

    /// Hands the fee-setter role to `new_setter`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Forbidden`] unless `caller` is the fee setter.
    pub fn set_fee_to_setter(&mut self, caller: Address, new_setter: Address) -> Result<()> {
        self.authorize(caller)?;
        self.fee_to_setter = new_setter;
        Ok(())
    }

    fn authorize(&self, caller: Address) -> Result<()> {
        if caller != self.fee_to_setter {
            return Err(DexError::Forbidden);
        }
        Ok(())
    }

    /// Records a new pair; returns the pair count after the append.
    pub(crate) fn register(&mut self, tokens: TokenPair, pair: Address) -> Result<u64> {
        let (t0, t1) = (tokens.first(), tokens.second());
        if self.pairs.contains_key(&(t0, t1)) {
            return Err(DexError::PairExists);
        }
        self.pairs.insert((t0, t1), pair);
        self.pairs.insert((t1, t0), pair);
        self.all_pairs.push(pair);
        u64::try_from(self.all_pairs.len()).map_err(|_| DexError::Overflow("pair count"))
    }
}
