//! Router liquidity operations.

use tracing::debug;

use super::{AddLiquidity, AddLiquidityNative, PermitArgs, RemoveLiquidity, RemoveLiquidityNative, Router};
use crate::chain::Chain;
use crate::domain::{Address, Amount, TokenPair};
use crate::error::{DexError, Result};
use crate::math;

/// Desired and minimum amounts on both sides of a deposit.
struct Deposit {
    token_a: Address,
    token_b: Address,
    a_desired: Amount,
    b_desired: Amount,
    a_min: Amount,
    b_min: Amount,
}

impl Chain {
    /// Deposits at the pair's current ratio and mints shares to `params.to`.
    ///
    /// Creates the pair on first use, in which case the desired amounts set
    /// the initial price.  Tokens are pulled from `caller` with the router
    /// as spender, so `caller` must have approved the router.
    ///
    /// Returns `(amount_a, amount_b, liquidity)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::InsufficientAmountA`] / [`DexError::InsufficientAmountB`]
    ///   if the ratio pushes a side below its minimum.
    /// - Any error from the token transfers or [`Chain::mint`].
    pub fn add_liquidity(
        &mut self,
        router: Address,
        caller: Address,
        params: &AddLiquidity,
    ) -> Result<(Amount, Amount, Amount)> {
        self.transact("add_liquidity", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            let (amount_a, amount_b) = chain.optimal_deposit(
                &router,
                &Deposit {
                    token_a: params.token_a,
                    token_b: params.token_b,
                    a_desired: params.amount_a_desired,
                    b_desired: params.amount_b_desired,
                    a_min: params.amount_a_min,
                    b_min: params.amount_b_min,
                },
            )?;
            let pair = router.pair_for(params.token_a, params.token_b)?;
            chain.transfer_from_inner(params.token_a, router.address(), caller, pair, amount_a)?;
            chain.transfer_from_inner(params.token_b, router.address(), caller, pair, amount_b)?;
            let liquidity = chain.mint_inner(pair, router.address(), params.to)?;
            debug!(%pair, %amount_a, %amount_b, %liquidity, "router added liquidity");
            Ok((amount_a, amount_b, liquidity))
        })
    }

    /// [`add_liquidity`](Self::add_liquidity) against the token/wrapped-native
    /// pair, paying the native side from the attached `params.value`.
    ///
    /// Returns `(amount_token, amount_native, liquidity)`.
    ///
    /// # Errors
    ///
    /// As [`add_liquidity`](Self::add_liquidity), plus
    /// [`DexError::InsufficientBalance`] if `caller` cannot attach `value`.
    pub fn add_liquidity_native(
        &mut self,
        router: Address,
        caller: Address,
        params: &AddLiquidityNative,
    ) -> Result<(Amount, Amount, Amount)> {
        self.transact("add_liquidity_native", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            chain.attach_native(&router, caller, params.value)?;
            let wrapped = router.wrapped_native();
            let (amount_token, amount_native) = chain.optimal_deposit(
                &router,
                &Deposit {
                    token_a: params.token,
                    token_b: wrapped,
                    a_desired: params.amount_token_desired,
                    b_desired: params.value,
                    a_min: params.amount_token_min,
                    b_min: params.amount_native_min,
                },
            )?;
            let pair = router.pair_for(params.token, wrapped)?;
            chain.transfer_from_inner(params.token, router.address(), caller, pair, amount_token)?;
            chain.deposit_inner(wrapped, router.address(), amount_native)?;
            chain.transfer_inner(wrapped, router.address(), pair, amount_native)?;
            let liquidity = chain.mint_inner(pair, router.address(), params.to)?;
            chain.refund_native(&router, caller, params.value, amount_native)?;
            debug!(%pair, %amount_token, %amount_native, %liquidity, "router added native liquidity");
            Ok((amount_token, amount_native, liquidity))
        })
    }

    /// Burns `params.liquidity` shares taken from `caller` and sends both
    /// tokens to `params.to`.
    ///
    /// Returns `(amount_a, amount_b)` in the caller's token order.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::PairNotFound`] if the pair does not exist.
    /// - [`DexError::InsufficientAmountA`] / [`DexError::InsufficientAmountB`]
    ///   below the minimums.
    /// - [`DexError::InsufficientAllowance`] unless `caller` approved the
    ///   router for the shares.
    pub fn remove_liquidity(
        &mut self,
        router: Address,
        caller: Address,
        params: &RemoveLiquidity,
    ) -> Result<(Amount, Amount)> {
        self.transact("remove_liquidity", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            chain.remove_liquidity_with(&router, caller, params)
        })
    }

    /// [`remove_liquidity`](Self::remove_liquidity) from the token/wrapped-
    /// native pair, unwrapping the native side for `params.to`.
    ///
    /// Returns `(amount_token, amount_native)`.
    ///
    /// # Errors
    ///
    /// As [`remove_liquidity`](Self::remove_liquidity).
    pub fn remove_liquidity_native(
        &mut self,
        router: Address,
        caller: Address,
        params: &RemoveLiquidityNative,
    ) -> Result<(Amount, Amount)> {
        self.transact("remove_liquidity_native", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            chain.remove_liquidity_native_with(&router, caller, params)
        })
    }

    /// Applies a signed share approval for the router, then removes
    /// liquidity, in one transaction.
    ///
    /// # Errors
    ///
    /// As [`remove_liquidity`](Self::remove_liquidity), plus permit errors
    /// ([`DexError::Expired`], [`DexError::InvalidSignature`]).
    pub fn remove_liquidity_with_permit(
        &mut self,
        router: Address,
        caller: Address,
        params: &RemoveLiquidity,
        permit: &PermitArgs,
    ) -> Result<(Amount, Amount)> {
        self.transact("remove_liquidity_with_permit", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            let pair = router.pair_for(params.token_a, params.token_b)?;
            chain.permit_router(&router, pair, caller, params.liquidity, params.deadline, permit)?;
            chain.remove_liquidity_with(&router, caller, params)
        })
    }

    /// Native counterpart of
    /// [`remove_liquidity_with_permit`](Self::remove_liquidity_with_permit).
    ///
    /// # Errors
    ///
    /// As [`remove_liquidity_with_permit`](Self::remove_liquidity_with_permit).
    pub fn remove_liquidity_native_with_permit(
        &mut self,
        router: Address,
        caller: Address,
        params: &RemoveLiquidityNative,
        permit: &PermitArgs,
    ) -> Result<(Amount, Amount)> {
        self.transact("remove_liquidity_native_with_permit", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            let pair = router.pair_for(params.token, router.wrapped_native())?;
            chain.permit_router(&router, pair, caller, params.liquidity, params.deadline, permit)?;
            chain.remove_liquidity_native_with(&router, caller, params)
        })
    }

    // -- Implementation -------------------------------------------------------

    /// Amounts to deposit so the pair's ratio is preserved, creating the
    /// pair if it does not exist yet.
    fn optimal_deposit(&mut self, router: &Router, deposit: &Deposit) -> Result<(Amount, Amount)> {
        let registry = router.registry();
        if self.registry(registry)?.get_pair(deposit.token_a, deposit.token_b).is_none() {
            self.create_pair_inner(registry, router.address(), deposit.token_a, deposit.token_b)?;
        }
        let (reserve_a, reserve_b) = self.reserves_for(router, deposit.token_a, deposit.token_b)?;
        if reserve_a.is_zero() && reserve_b.is_zero() {
            return Ok((deposit.a_desired, deposit.b_desired));
        }

        let b_optimal = math::quote(deposit.a_desired, reserve_a, reserve_b)?;
        if b_optimal <= deposit.b_desired {
            if b_optimal < deposit.b_min {
                return Err(DexError::InsufficientAmountB);
            }
            return Ok((deposit.a_desired, b_optimal));
        }
        let a_optimal = math::quote(deposit.b_desired, reserve_b, reserve_a)?;
        // b_optimal > b_desired implies a_optimal <= a_desired
        if a_optimal > deposit.a_desired || a_optimal < deposit.a_min {
            return Err(DexError::InsufficientAmountA);
        }
        Ok((a_optimal, deposit.b_desired))
    }

    fn remove_liquidity_with(
        &mut self,
        router: &Router,
        caller: Address,
        params: &RemoveLiquidity,
    ) -> Result<(Amount, Amount)> {
        let tokens = TokenPair::new(params.token_a, params.token_b)?;
        let pair = router.pair_for(params.token_a, params.token_b)?;
        if !self.state().pairs.contains_key(&pair) {
            return Err(DexError::PairNotFound);
        }
        self.transfer_from_inner(pair, router.address(), caller, pair, params.liquidity)?;
        let (amount0, amount1) = self.burn_inner(pair, router.address(), params.to)?;
        let (amount_a, amount_b) = if tokens.is_first(params.token_a) {
            (amount0, amount1)
        } else {
            (amount1, amount0)
        };
        if amount_a < params.amount_a_min {
            return Err(DexError::InsufficientAmountA);
        }
        if amount_b < params.amount_b_min {
            return Err(DexError::InsufficientAmountB);
        }
        debug!(%pair, %amount_a, %amount_b, liquidity = %params.liquidity, "router removed liquidity");
        Ok((amount_a, amount_b))
    }

    fn remove_liquidity_native_with(
        &mut self,
        router: &Router,
        caller: Address,
        params: &RemoveLiquidityNative,
    ) -> Result<(Amount, Amount)> {
        let wrapped = router.wrapped_native();
        let (amount_token, amount_native) = self.remove_liquidity_with(
            router,
            caller,
            &RemoveLiquidity {
                token_a: params.token,
                token_b: wrapped,
                liquidity: params.liquidity,
                amount_a_min: params.amount_token_min,
                amount_b_min: params.amount_native_min,
                to: router.address(),
                deadline: params.deadline,
            },
        )?;
        self.transfer_inner(params.token, router.address(), params.to, amount_token)?;
        self.withdraw_inner(wrapped, router.address(), amount_native)?;
        self.transfer_native(router.address(), params.to, amount_native)?;
        Ok((amount_token, amount_native))
    }

    fn permit_router(
        &mut self,
        router: &Router,
        pair: Address,
        owner: Address,
        liquidity: Amount,
        deadline: u64,
        permit: &PermitArgs,
    ) -> Result<()> {
        let value = if permit.approve_max { Amount::MAX } else { liquidity };
        self.permit_inner(pair, owner, router.address(), value, deadline, &permit.signature)
    }
}
