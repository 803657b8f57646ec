//! Stateless router composing pair operations.
//!
//! A [`Router`] is a fixed pair of references (registry, wrapped-native
//! ledger) plus the registry's fee tier.  It never holds funds across
//! calls: every entry point pulls what it needs from the caller, routes it
//! through one or more pairs and pays out in the same transaction.
//!
//! # Usage
//!
//! ```rust
//! use hydra_dex::chain::Chain;
//! use hydra_dex::config::RegistryConfig;
//! use hydra_dex::domain::{Address, Amount};
//!
//! let owner = Address::from_low_u64(0xa11ce);
//! let mut chain = Chain::default();
//! let registry = chain
//!     .deploy_registry(owner, &RegistryConfig::new(owner).expect("valid"))
//!     .expect("registry");
//! let wrapped = chain.deploy_wrapped_native(owner).expect("wrapped");
//! let router = chain.deploy_router(owner, registry, wrapped).expect("router");
//!
//! let view = chain.router(router).expect("deployed");
//! let out = view
//!     .get_amount_out(Amount::from(10u64), Amount::from(1_000u64), Amount::from(1_000u64))
//!     .expect("priced");
//! assert_eq!(out, Amount::from(9u64));
//! ```

mod liquidity;
mod params;
mod swap;

pub use params::{
    AddLiquidity, AddLiquidityNative, PermitArgs, RemoveLiquidity, RemoveLiquidityNative,
    SwapExactIn, SwapExactOut,
};

use tracing::info;

use crate::chain::Chain;
use crate::domain::{Address, Amount, FeeTier, TokenPair};
use crate::error::{DexError, Result};
use crate::factory::pair_address_sorted;
use crate::math;

/// Router configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Router {
    address: Address,
    registry: Address,
    wrapped_native: Address,
    fee_tier: FeeTier,
}

impl Router {
    /// Router account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Registry whose pairs it routes through.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// Wrapped-native ledger used by the native variants.
    #[must_use]
    pub const fn wrapped_native(&self) -> Address {
        self.wrapped_native
    }

    /// Fee tier used by the pure pricing views.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// Predicted pair address for `token_a`/`token_b`; no state is read.
    ///
    /// # Errors
    ///
    /// [`DexError::IdenticalAssets`] or [`DexError::ZeroAddress`].
    pub fn pair_for(&self, token_a: Address, token_b: Address) -> Result<Address> {
        let tokens = TokenPair::new(token_a, token_b)?;
        Ok(pair_address_sorted(self.registry, &tokens))
    }

    /// See [`math::quote`].
    ///
    /// # Errors
    ///
    /// Propagates errors from [`math::quote`].
    pub fn quote(&self, amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
        math::quote(amount_a, reserve_a, reserve_b)
    }

    /// See [`math::get_amount_out`], at this router's fee tier.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`math::get_amount_out`].
    pub fn get_amount_out(&self, amount_in: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
        math::get_amount_out(amount_in, reserve_in, reserve_out, self.fee_tier)
    }

    /// See [`math::get_amount_in`], at this router's fee tier.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`math::get_amount_in`].
    pub fn get_amount_in(&self, amount_out: Amount, reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
        math::get_amount_in(amount_out, reserve_in, reserve_out, self.fee_tier)
    }
}

/// Reserves of one hop, oriented from input to output.
#[derive(Debug, Clone, Copy)]
struct Hop {
    reserve_in: Amount,
    reserve_out: Amount,
    fee_tier: FeeTier,
}

impl Chain {
    /// Deploys a router over `registry` and `wrapped_native`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if either reference does not
    /// point at a registry or a wrapped-native ledger respectively.
    pub fn deploy_router(
        &mut self,
        deployer: Address,
        registry: Address,
        wrapped_native: Address,
    ) -> Result<Address> {
        self.transact("deploy_router", |chain| {
            let fee_tier = chain.registry(registry)?.fee_tier();
            chain.wrapped_ledger(wrapped_native)?;
            let address = chain.next_address(deployer);
            chain.state_mut().routers.insert(
                address,
                Router {
                    address,
                    registry,
                    wrapped_native,
                    fee_tier,
                },
            );
            info!(%address, %registry, %wrapped_native, "router deployed");
            Ok(address)
        })
    }

    /// The router at `router`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if none lives there.
    pub fn router(&self, router: Address) -> Result<&Router> {
        self.state()
            .routers
            .get(&router)
            .ok_or(DexError::UnknownContract(router))
    }

    /// Output of every hop along `path` for an exact `amount_in`.
    ///
    /// The first element is `amount_in`, the last is what `path`'s final
    /// token pays out.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] for fewer than two tokens.
    /// - [`DexError::PairNotFound`] if a hop has no pair.
    /// - Pricing errors from [`math::get_amount_out`].
    pub fn get_amounts_out(&self, router: Address, amount_in: Amount, path: &[Address]) -> Result<Vec<Amount>> {
        let router = *self.router(router)?;
        self.amounts_out(&router, amount_in, path)
    }

    /// Input of every hop along `path` for an exact final `amount_out`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] for fewer than two tokens.
    /// - [`DexError::PairNotFound`] if a hop has no pair.
    /// - Pricing errors from [`math::get_amount_in`].
    pub fn get_amounts_in(&self, router: Address, amount_out: Amount, path: &[Address]) -> Result<Vec<Amount>> {
        let router = *self.router(router)?;
        self.amounts_in(&router, amount_out, path)
    }

    // -- Shared helpers -------------------------------------------------------

    pub(crate) fn amounts_out(&self, router: &Router, amount_in: Amount, path: &[Address]) -> Result<Vec<Amount>> {
        check_path(path)?;
        let mut amounts = Vec::with_capacity(path.len());
        amounts.push(amount_in);
        for (i, hop) in path.windows(2).enumerate() {
            let Hop {
                reserve_in,
                reserve_out,
                fee_tier,
            } = self.hop(router, hop[0], hop[1])?;
            amounts.push(math::get_amount_out(amounts[i], reserve_in, reserve_out, fee_tier)?);
        }
        Ok(amounts)
    }

    pub(crate) fn amounts_in(&self, router: &Router, amount_out: Amount, path: &[Address]) -> Result<Vec<Amount>> {
        check_path(path)?;
        let mut amounts = vec![Amount::ZERO; path.len()];
        let last = path.len() - 1;
        amounts[last] = amount_out;
        for i in (1..path.len()).rev() {
            let Hop {
                reserve_in,
                reserve_out,
                fee_tier,
            } = self.hop(router, path[i - 1], path[i])?;
            amounts[i - 1] = math::get_amount_in(amounts[i], reserve_in, reserve_out, fee_tier)?;
        }
        Ok(amounts)
    }

    /// Reserves of the `input`/`output` pair, oriented as `(input, output)`.
    fn hop(&self, router: &Router, input: Address, output: Address) -> Result<Hop> {
        let tokens = TokenPair::new(input, output)?;
        let pair = pair_address_sorted(router.registry, &tokens);
        let engine = self.state().pairs.get(&pair).ok_or(DexError::PairNotFound)?;
        let (reserve0, reserve1, _) = engine.reserves();
        let (reserve_in, reserve_out) = if tokens.is_first(input) {
            (reserve0, reserve1)
        } else {
            (reserve1, reserve0)
        };
        Ok(Hop {
            reserve_in,
            reserve_out,
            fee_tier: engine.fee_tier(),
        })
    }

    /// Reserves of the `token_a`/`token_b` pair as `(a, b)`, or zeros if the
    /// pair has not been created yet.
    pub(crate) fn reserves_for(&self, router: &Router, token_a: Address, token_b: Address) -> Result<(Amount, Amount)> {
        match self.hop(router, token_a, token_b) {
            Ok(hop) => Ok((hop.reserve_in, hop.reserve_out)),
            Err(DexError::PairNotFound) => Ok((Amount::ZERO, Amount::ZERO)),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn router_for_call(&self, router: Address, deadline: u64) -> Result<Router> {
        let router = *self.router(router)?;
        if self.timestamp() > deadline {
            return Err(DexError::Expired);
        }
        Ok(router)
    }

    /// Moves native value attached to a router call into the router.
    pub(crate) fn attach_native(&mut self, router: &Router, caller: Address, value: Amount) -> Result<()> {
        self.transfer_native(caller, router.address, value)
    }

    /// Returns unspent attached native value.
    pub(crate) fn refund_native(&mut self, router: &Router, caller: Address, value: Amount, spent: Amount) -> Result<()> {
        let dust = value.checked_sub(&spent).ok_or(DexError::Underflow("native refund"))?;
        if dust.is_zero() {
            return Ok(());
        }
        self.transfer_native(router.address, caller, dust)
    }
}

fn check_path(path: &[Address]) -> Result<()> {
    if path.len() < 2 {
        return Err(DexError::InvalidPath);
    }
    Ok(())
}
