//! Capability-bound handle given to flash-swap callees.

use super::Chain;
use crate::domain::{Address, Amount};
use crate::error::Result;
use crate::router::{SwapExactIn, SwapExactOut};

/// What a flash-swap callee may do while a pair is mid-swap.
///
/// Every state-changing call acts as the callee's own address: it can
/// spend its own balances and allowances, but it cannot name another
/// account as the payer or caller.  Administrative and deployment calls
/// are not reachable at all.  Read-only views go through
/// [`chain`](Self::chain).
pub struct CalleeContext<'a> {
    chain: &'a mut Chain,
    callee: Address,
}

impl<'a> CalleeContext<'a> {
    pub(crate) fn new(chain: &'a mut Chain, callee: Address) -> Self {
        Self { chain, callee }
    }

    /// Address every call is made from.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.callee
    }

    /// Read-only view of the world.
    #[must_use]
    pub fn chain(&self) -> &Chain {
        self.chain
    }

    // -- Tokens ---------------------------------------------------------------

    /// Transfers the callee's own tokens.
    ///
    /// # Errors
    ///
    /// As [`Chain::transfer`].
    pub fn transfer(&mut self, token: Address, to: Address, value: Amount) -> Result<()> {
        self.chain.transfer(token, self.callee, to, value)
    }

    /// Approves `spender` over the callee's tokens.
    ///
    /// # Errors
    ///
    /// As [`Chain::approve`].
    pub fn approve(&mut self, token: Address, spender: Address, value: Amount) -> Result<()> {
        self.chain.approve(token, self.callee, spender, value)
    }

    /// Spends an allowance granted to the callee.
    ///
    /// # Errors
    ///
    /// As [`Chain::transfer_from`].
    pub fn transfer_from(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        self.chain.transfer_from(token, self.callee, from, to, value)
    }

    /// Wraps the callee's native balance.
    ///
    /// # Errors
    ///
    /// As [`Chain::deposit`].
    pub fn deposit(&mut self, wrapped: Address, value: Amount) -> Result<()> {
        self.chain.deposit(wrapped, self.callee, value)
    }

    /// Unwraps the callee's wrapped balance.
    ///
    /// # Errors
    ///
    /// As [`Chain::withdraw`].
    pub fn withdraw(&mut self, wrapped: Address, value: Amount) -> Result<()> {
        self.chain.withdraw(wrapped, self.callee, value)
    }

    /// Sends the callee's native value.
    ///
    /// # Errors
    ///
    /// As [`Chain::send_native`].
    pub fn send_native(&mut self, to: Address, amount: Amount) -> Result<()> {
        self.chain.send_native(self.callee, to, amount)
    }

    // -- Pairs ----------------------------------------------------------------

    /// Calls [`Chain::swap`] with the callee as caller.
    ///
    /// # Errors
    ///
    /// As [`Chain::swap`].
    pub fn swap(
        &mut self,
        pair: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
        data: &[u8],
    ) -> Result<()> {
        self.chain
            .swap(pair, self.callee, amount0_out, amount1_out, to, data)
    }

    /// Calls [`Chain::mint`] with the callee as caller.
    ///
    /// # Errors
    ///
    /// As [`Chain::mint`].
    pub fn mint(&mut self, pair: Address, to: Address) -> Result<Amount> {
        self.chain.mint(pair, self.callee, to)
    }

    /// Calls [`Chain::burn`] with the callee as caller.
    ///
    /// # Errors
    ///
    /// As [`Chain::burn`].
    pub fn burn(&mut self, pair: Address, to: Address) -> Result<(Amount, Amount)> {
        self.chain.burn(pair, self.callee, to)
    }

    /// # Errors
    ///
    /// As [`Chain::skim`].
    pub fn skim(&mut self, pair: Address, to: Address) -> Result<()> {
        self.chain.skim(pair, to)
    }

    /// # Errors
    ///
    /// As [`Chain::sync`].
    pub fn sync(&mut self, pair: Address) -> Result<()> {
        self.chain.sync(pair)
    }

    // -- Router ---------------------------------------------------------------

    /// Sells the callee's tokens along `params.path`.
    ///
    /// # Errors
    ///
    /// As [`Chain::swap_exact_tokens_for_tokens`].
    pub fn swap_exact_tokens_for_tokens(
        &mut self,
        router: Address,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>> {
        self.chain
            .swap_exact_tokens_for_tokens(router, self.callee, params)
    }

    /// Buys along `params.path` with the callee's tokens.
    ///
    /// # Errors
    ///
    /// As [`Chain::swap_tokens_for_exact_tokens`].
    pub fn swap_tokens_for_exact_tokens(
        &mut self,
        router: Address,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>> {
        self.chain
            .swap_tokens_for_exact_tokens(router, self.callee, params)
    }
}
