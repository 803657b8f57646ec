//! Pair registry and deterministic pair placement.
//!
//! The [`PairRegistry`] is the only place pairs come from.  Creating a
//! pair is two-phase: an empty [`PairEngine`] shell is placed at the
//! create2-style address from [`pair_address`], then the registry
//! initialises it with its tokens.
//!
//! # Usage
//!
//! ```rust
//! use hydra_dex::chain::Chain;
//! use hydra_dex::config::RegistryConfig;
//! use hydra_dex::domain::Address;
//! use hydra_dex::factory::pair_address;
//!
//! let owner = Address::from_low_u64(0xa11ce);
//! let mut chain = Chain::default();
//! let registry = chain
//!     .deploy_registry(owner, &RegistryConfig::new(owner).expect("valid"))
//!     .expect("deployed");
//!
//! let (a, b) = (Address::from_low_u64(0x10), Address::from_low_u64(0x20));
//! let predicted = pair_address(registry, a, b).expect("valid tokens");
//! let pair = chain.create_pair(registry, owner, b, a).expect("created");
//! assert_eq!(pair, predicted);
//! ```

mod address;
mod registry;

pub use address::{create2_address, create_address, pair_address, pair_code_hash};
pub(crate) use address::pair_address_sorted;
pub use registry::PairRegistry;

use tracing::info;

use crate::chain::{Chain, Event};
use crate::config::RegistryConfig;
use crate::domain::{Address, TokenPair};
use crate::error::{DexError, Result};
use crate::pair::PairEngine;

impl Chain {
    /// Deploys an empty registry.
    ///
    /// # Errors
    ///
    /// Propagates validation errors from `config`.
    pub fn deploy_registry(&mut self, deployer: Address, config: &RegistryConfig) -> Result<Address> {
        config.validate()?;
        self.transact("deploy_registry", |chain| {
            let address = chain.next_address(deployer);
            chain
                .state_mut()
                .registries
                .insert(address, PairRegistry::new(address, config));
            info!(
                %address,
                fee_to_setter = %config.fee_to_setter(),
                fee = %config.fee_tier(),
                "registry deployed"
            );
            Ok(address)
        })
    }

    /// The registry at `registry`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if none lives there.
    pub fn registry(&self, registry: Address) -> Result<&PairRegistry> {
        self.state()
            .registries
            .get(&registry)
            .ok_or(DexError::UnknownContract(registry))
    }

    fn registry_mut(&mut self, registry: Address) -> Result<&mut PairRegistry> {
        self.state_mut()
            .registries
            .get_mut(&registry)
            .ok_or(DexError::UnknownContract(registry))
    }

    /// Pair of `token_a` and `token_b` under `registry`, in either order.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if `registry` does not exist.
    pub fn get_pair(&self, registry: Address, token_a: Address, token_b: Address) -> Result<Option<Address>> {
        Ok(self.registry(registry)?.get_pair(token_a, token_b))
    }

    /// Creates the pair of `token_a` and `token_b`.  Anyone may call it.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if the tokens are equal.
    /// - [`DexError::ZeroAddress`] if either is the null account.
    /// - [`DexError::PairExists`] if the pair is already registered.
    pub fn create_pair(
        &mut self,
        registry: Address,
        caller: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address> {
        self.transact("create_pair", |chain| {
            chain.create_pair_inner(registry, caller, token_a, token_b)
        })
    }

    pub(crate) fn create_pair_inner(
        &mut self,
        registry: Address,
        caller: Address,
        token_a: Address,
        token_b: Address,
    ) -> Result<Address> {
        let tokens = TokenPair::new(token_a, token_b)?;
        let reg = self.registry(registry)?;
        if reg.get_pair(tokens.first(), tokens.second()).is_some() {
            return Err(DexError::PairExists);
        }
        let fee_tier = reg.fee_tier();
        let pair = pair_address_sorted(registry, &tokens);
        if self.state().is_contract(pair) {
            return Err(DexError::PairExists);
        }

        let mut engine = PairEngine::shell(pair, registry, self.chain_id());
        engine.initialize(registry, tokens, fee_tier)?;
        self.state_mut().pairs.insert(pair, engine);
        let index = self.registry_mut(registry)?.register(tokens, pair)?;

        self.emit(
            registry,
            Event::PairCreated {
                token0: tokens.first(),
                token1: tokens.second(),
                pair,
                index,
            },
        );
        info!(%pair, token0 = %tokens.first(), token1 = %tokens.second(), index, %caller, "pair created");
        Ok(pair)
    }

    /// Turns the protocol fee on (recipient) or off (null account).
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Forbidden`] unless `caller` is the fee setter.
    pub fn set_fee_to(&mut self, registry: Address, caller: Address, fee_to: Address) -> Result<()> {
        self.transact("set_fee_to", |chain| {
            chain.registry_mut(registry)?.set_fee_to(caller, fee_to)?;
            info!(%registry, %fee_to, "protocol fee recipient changed");
            Ok(())
        })
    }

    /// Hands the fee-setter role to `new_setter`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Forbidden`] unless `caller` is the fee setter.
    pub fn set_fee_to_setter(
        &mut self,
        registry: Address,
        caller: Address,
        new_setter: Address,
    ) -> Result<()> {
        self.transact("set_fee_to_setter", |chain| {
            chain
                .registry_mut(registry)?
                .set_fee_to_setter(caller, new_setter)?;
            info!(%registry, %new_setter, "fee setter changed");
            Ok(())
        })
    }
}
