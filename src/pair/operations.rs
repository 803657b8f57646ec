//! Token-moving pair operations: mint, burn, swap, skim and sync.
//!
//! All of them follow the optimistic-transfer pattern: callers move tokens
//! into the pair first, and the pair only trusts its live balances, never
//! amounts it is told about.

use ethereum_types::U512;
use tracing::debug;

use crate::chain::{Chain, Event};
use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::math::{isqrt, CheckedArithmetic};
use crate::pair::MINIMUM_LIQUIDITY;
use crate::traits::FlashSwapCall;

/// `10⁴ × 10⁴`, the basis-point scale of the squared invariant check.
const BPS_SQUARED: u64 = 100_000_000;

/// What the pair needs to know before moving tokens.
struct Snapshot {
    token0: Address,
    token1: Address,
    reserve0: Amount,
    reserve1: Amount,
}

impl Chain {
    /// Issues liquidity shares to `to` for tokens already sent to `pair`.
    ///
    /// Returns the number of shares minted.
    ///
    /// # Errors
    ///
    /// - [`DexError::Locked`] on reentry.
    /// - [`DexError::InsufficientLiquidityMinted`] if the deposit is worth
    ///   zero shares (or, on the first deposit, no more than the locked
    ///   minimum).
    /// - [`DexError::Overflow`] if a reserve would exceed 112 bits.
    pub fn mint(&mut self, pair: Address, caller: Address, to: Address) -> Result<Amount> {
        self.transact("mint", |chain| chain.mint_inner(pair, caller, to))
    }

    /// Burns the shares held by `pair` itself and pays the underlying
    /// tokens to `to`.
    ///
    /// Returns `(amount0, amount1)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Locked`] on reentry.
    /// - [`DexError::InsufficientLiquidityBurned`] if either payout rounds
    ///   to zero.
    pub fn burn(&mut self, pair: Address, caller: Address, to: Address) -> Result<(Amount, Amount)> {
        self.transact("burn", |chain| chain.burn_inner(pair, caller, to))
    }

    /// Pays out `amount0_out`/`amount1_out` to `to`, optionally calls back
    /// into `to` with `data`, then checks the invariant on live balances.
    ///
    /// # Errors
    ///
    /// - [`DexError::Locked`] on reentry.
    /// - [`DexError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`DexError::InsufficientLiquidity`] if an output reaches its
    ///   reserve.
    /// - [`DexError::InvalidRecipient`] if `to` is one of the pair's tokens.
    /// - [`DexError::InvalidCallee`] if `data` is non-empty and `to` has no
    ///   callback.
    /// - [`DexError::InsufficientInputAmount`] if nothing was paid in.
    /// - [`DexError::KInvariantViolated`] if the fee-adjusted product
    ///   shrank.
    pub fn swap(
        &mut self,
        pair: Address,
        caller: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
        data: &[u8],
    ) -> Result<()> {
        self.transact("swap", |chain| {
            chain.swap_inner(pair, caller, amount0_out, amount1_out, to, data)
        })
    }

    /// Sends any balance above the reserves to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::Locked`] on reentry.
    pub fn skim(&mut self, pair: Address, to: Address) -> Result<()> {
        self.transact("skim", |chain| chain.skim_inner(pair, to))
    }

    /// Sets the reserves to the live balances.
    ///
    /// # Errors
    ///
    /// - [`DexError::Locked`] on reentry.
    /// - [`DexError::Overflow`] if a balance exceeds 112 bits.
    pub fn sync(&mut self, pair: Address) -> Result<()> {
        self.transact("sync", |chain| chain.sync_inner(pair))
    }

    // -- Implementation -------------------------------------------------------

    fn enter_pair(&mut self, pair: Address) -> Result<Snapshot> {
        let engine = self.pair_mut(pair)?;
        engine.enter()?;
        let (reserve0, reserve1, _) = engine.reserves();
        Ok(Snapshot {
            token0: engine.token0(),
            token1: engine.token1(),
            reserve0,
            reserve1,
        })
    }

    fn exit_pair(&mut self, pair: Address) -> Result<()> {
        self.pair_mut(pair)?.exit();
        Ok(())
    }

    fn pair_balances(&self, pair: Address, snap: &Snapshot) -> Result<(Amount, Amount)> {
        Ok((
            self.balance_of(snap.token0, pair)?,
            self.balance_of(snap.token1, pair)?,
        ))
    }

    fn update_reserves(&mut self, pair: Address, balance0: Amount, balance1: Amount) -> Result<()> {
        let now = self.timestamp();
        let event = self.pair_mut(pair)?.update(balance0, balance1, now)?;
        debug!(%pair, reserve0 = %balance0, reserve1 = %balance1, "reserves synced");
        self.emit(pair, event);
        Ok(())
    }

    fn mint_shares(&mut self, pair: Address, to: Address, value: Amount) -> Result<()> {
        let event = self.pair_mut(pair)?.shares_mut().mint(to, value)?;
        self.emit(pair, event);
        Ok(())
    }

    /// Mints the protocol's cut of invariant growth to the fee recipient.
    ///
    /// Returns whether the protocol fee is on.  When it is off, a stale
    /// checkpoint is cleared so switching it back on later starts fresh.
    fn mint_protocol_fee(&mut self, pair: Address) -> Result<bool> {
        let engine = self.pair(pair)?;
        let registry = self.registry(engine.registry())?;
        let fee_to = registry.fee_to();
        let share = registry.protocol_fee_share();
        match fee_to {
            Some(fee_to) => {
                let liquidity = engine.protocol_fee_liquidity(share)?;
                if !liquidity.is_zero() {
                    self.mint_shares(pair, fee_to, liquidity)?;
                    debug!(%pair, %fee_to, %liquidity, "protocol fee minted");
                }
                Ok(true)
            }
            None => {
                if !engine.k_last().is_zero() {
                    self.pair_mut(pair)?.set_k_last(Amount::ZERO);
                }
                Ok(false)
            }
        }
    }

    fn checkpoint_k(&mut self, pair: Address) -> Result<()> {
        let engine = self.pair_mut(pair)?;
        let k = engine.invariant()?;
        engine.set_k_last(k);
        Ok(())
    }

    pub(crate) fn mint_inner(&mut self, pair: Address, caller: Address, to: Address) -> Result<Amount> {
        let snap = self.enter_pair(pair)?;
        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        let amount0 = balance0.safe_sub(&snap.reserve0)?;
        let amount1 = balance1.safe_sub(&snap.reserve1)?;

        let fee_on = self.mint_protocol_fee(pair)?;
        let total_supply = self.pair(pair)?.shares().total_supply();
        let liquidity = if total_supply.is_zero() {
            let root = Amount::new(isqrt(amount0.safe_mul(&amount1)?.get()));
            let issued = root
                .checked_sub(&MINIMUM_LIQUIDITY)
                .ok_or(DexError::InsufficientLiquidityMinted)?;
            self.mint_shares(pair, Address::ZERO, MINIMUM_LIQUIDITY)?;
            issued
        } else {
            let by0 = amount0.mul_div(&total_supply, &snap.reserve0)?;
            let by1 = amount1.mul_div(&total_supply, &snap.reserve1)?;
            by0.min(by1)
        };
        if liquidity.is_zero() {
            return Err(DexError::InsufficientLiquidityMinted);
        }
        self.mint_shares(pair, to, liquidity)?;

        self.update_reserves(pair, balance0, balance1)?;
        if fee_on {
            self.checkpoint_k(pair)?;
        }
        self.emit(
            pair,
            Event::Mint {
                sender: caller,
                amount0,
                amount1,
            },
        );
        debug!(%pair, %to, %liquidity, %amount0, %amount1, "liquidity minted");
        self.exit_pair(pair)?;
        Ok(liquidity)
    }

    pub(crate) fn burn_inner(
        &mut self,
        pair: Address,
        caller: Address,
        to: Address,
    ) -> Result<(Amount, Amount)> {
        let snap = self.enter_pair(pair)?;
        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        let liquidity = self.balance_of(pair, pair)?;

        let fee_on = self.mint_protocol_fee(pair)?;
        let total_supply = self.pair(pair)?.shares().total_supply();
        if total_supply.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }
        // live balances, so anything not yet skimmed is paid out pro rata
        let amount0 = liquidity.safe_mul(&balance0)?.safe_div(&total_supply)?;
        let amount1 = liquidity.safe_mul(&balance1)?.safe_div(&total_supply)?;
        if amount0.is_zero() || amount1.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }

        let event = self.pair_mut(pair)?.shares_mut().burn(pair, liquidity)?;
        self.emit(pair, event);
        self.transfer_inner(snap.token0, pair, to, amount0)?;
        self.transfer_inner(snap.token1, pair, to, amount1)?;

        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        self.update_reserves(pair, balance0, balance1)?;
        if fee_on {
            self.checkpoint_k(pair)?;
        }
        self.emit(
            pair,
            Event::Burn {
                sender: caller,
                amount0,
                amount1,
                to,
            },
        );
        debug!(%pair, %to, %liquidity, %amount0, %amount1, "liquidity burned");
        self.exit_pair(pair)?;
        Ok((amount0, amount1))
    }

    pub(crate) fn swap_inner(
        &mut self,
        pair: Address,
        caller: Address,
        amount0_out: Amount,
        amount1_out: Amount,
        to: Address,
        data: &[u8],
    ) -> Result<()> {
        let snap = self.enter_pair(pair)?;
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(DexError::InsufficientOutputAmount);
        }
        if amount0_out >= snap.reserve0 || amount1_out >= snap.reserve1 {
            return Err(DexError::InsufficientLiquidity);
        }
        if to == snap.token0 || to == snap.token1 {
            return Err(DexError::InvalidRecipient);
        }

        if !amount0_out.is_zero() {
            self.transfer_inner(snap.token0, pair, to, amount0_out)?;
        }
        if !amount1_out.is_zero() {
            self.transfer_inner(snap.token1, pair, to, amount1_out)?;
        }
        if !data.is_empty() {
            self.invoke_callee(&FlashSwapCall {
                callee: to,
                pair,
                sender: caller,
                amount0: amount0_out,
                amount1: amount1_out,
                data,
            })?;
        }

        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        let amount0_in = net_input(balance0, snap.reserve0, amount0_out);
        let amount1_in = net_input(balance1, snap.reserve1, amount1_out);
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(DexError::InsufficientInputAmount);
        }

        let fee = self.pair(pair)?.fee_tier();
        let scale = Amount::from(u64::from(crate::domain::BPS_DENOMINATOR));
        let rate = Amount::new(fee.rate());
        let adjusted0 = balance0.safe_mul(&scale)?.safe_sub(&amount0_in.safe_mul(&rate)?)?;
        let adjusted1 = balance1.safe_mul(&scale)?.safe_sub(&amount1_in.safe_mul(&rate)?)?;
        let lhs = adjusted0.get().full_mul(adjusted1.get());
        let rhs = snap.reserve0.get().full_mul(snap.reserve1.get()) * U512::from(BPS_SQUARED);
        if lhs < rhs {
            return Err(DexError::KInvariantViolated);
        }

        self.update_reserves(pair, balance0, balance1)?;
        self.emit(
            pair,
            Event::Swap {
                sender: caller,
                amount0_in,
                amount1_in,
                amount0_out,
                amount1_out,
                to,
            },
        );
        debug!(
            %pair, %to,
            %amount0_in, %amount1_in, %amount0_out, %amount1_out,
            flash = !data.is_empty(),
            "swap executed"
        );
        self.exit_pair(pair)
    }

    pub(crate) fn skim_inner(&mut self, pair: Address, to: Address) -> Result<()> {
        let snap = self.enter_pair(pair)?;
        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        let excess0 = balance0.safe_sub(&snap.reserve0)?;
        let excess1 = balance1.safe_sub(&snap.reserve1)?;
        self.transfer_inner(snap.token0, pair, to, excess0)?;
        self.transfer_inner(snap.token1, pair, to, excess1)?;
        self.exit_pair(pair)
    }

    pub(crate) fn sync_inner(&mut self, pair: Address) -> Result<()> {
        let snap = self.enter_pair(pair)?;
        let (balance0, balance1) = self.pair_balances(pair, &snap)?;
        self.update_reserves(pair, balance0, balance1)?;
        self.exit_pair(pair)
    }
}

/// Input the pair received on one side: whatever the balance exceeds
/// `reserve − out` by.
fn net_input(balance: Amount, reserve: Amount, out: Amount) -> Amount {
    // out < reserve was checked before any transfer
    let floor = reserve.checked_sub(&out).unwrap_or_default();
    balance.checked_sub(&floor).unwrap_or_default()
}
