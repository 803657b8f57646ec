//! State of one constant-product pair.

use ethereum_types::U256;

use crate::chain::Event;
use crate::domain::{Address, Amount, Decimals, FeeTier, TokenPair};
use crate::error::{DexError, Result};
use crate::math::{isqrt, CheckedArithmetic, PriceCumulative, Uq112x112, MAX_U112};
use crate::token::{LedgerKind, TokenLedger};

/// Shares permanently locked at the null account by the first mint.
pub const MINIMUM_LIQUIDITY: Amount = Amount::from_u128(1_000);

/// Name of every liquidity-share ledger.
pub const SHARE_NAME: &str = "Hydra LP";

/// Symbol of every liquidity-share ledger.
pub const SHARE_SYMBOL: &str = "HYDRA-LP";

/// Reentrancy guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LockState {
    /// Ready to accept a mutating call.
    #[default]
    Unlocked,
    /// A mutating call is in progress.
    Locked,
}

/// Reserves, oracle accumulators, fee checkpoint and share ledger of a
/// pair.
///
/// A pair is created as an empty shell owned by its registry and then
/// initialised exactly once with its two tokens.  The token-moving
/// operations live on [`Chain`](crate::chain::Chain); this type only holds
/// the state they read and write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairEngine {
    address: Address,
    registry: Address,
    token0: Address,
    token1: Address,
    fee_tier: FeeTier,
    reserve0: Amount,
    reserve1: Amount,
    block_timestamp_last: u32,
    price0_cumulative_last: PriceCumulative,
    price1_cumulative_last: PriceCumulative,
    k_last: Amount,
    lock: LockState,
    shares: TokenLedger,
}

impl PairEngine {
    /// Uninitialised pair at `address`, owned by `registry`.
    #[must_use]
    pub fn shell(address: Address, registry: Address, chain_id: u64) -> Self {
        Self {
            address,
            registry,
            token0: Address::ZERO,
            token1: Address::ZERO,
            fee_tier: FeeTier::DEFAULT,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            block_timestamp_last: 0,
            price0_cumulative_last: PriceCumulative::ZERO,
            price1_cumulative_last: PriceCumulative::ZERO,
            k_last: Amount::ZERO,
            lock: LockState::Unlocked,
            shares: TokenLedger::new(
                address,
                SHARE_NAME,
                SHARE_SYMBOL,
                Decimals::STANDARD,
                LedgerKind::LiquidityShare,
                chain_id,
            ),
        }
    }

    /// Binds the shell to its tokens.  One-time, registry only.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Forbidden`] if `caller` is not the registry or
    /// the pair is already initialised.
    pub fn initialize(&mut self, caller: Address, tokens: TokenPair, fee_tier: FeeTier) -> Result<()> {
        if caller != self.registry || self.is_initialized() {
            return Err(DexError::Forbidden);
        }
        self.token0 = tokens.first();
        self.token1 = tokens.second();
        self.fee_tier = fee_tier;
        Ok(())
    }

    // -- Views ----------------------------------------------------------------

    /// `true` once [`initialize`](Self::initialize) has run.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        !self.token0.is_zero()
    }

    /// Pair address, also the address of its share ledger.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Registry that created the pair.
    #[must_use]
    pub const fn registry(&self) -> Address {
        self.registry
    }

    /// Lower-sorted token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Higher-sorted token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Trading fee charged on net input.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }

    /// `(reserve0, reserve1, block_timestamp_last)`.
    #[must_use]
    pub const fn reserves(&self) -> (Amount, Amount, u32) {
        (self.reserve0, self.reserve1, self.block_timestamp_last)
    }

    /// Σ `reserve1/reserve0 × seconds`, wrapping.
    #[must_use]
    pub const fn price0_cumulative_last(&self) -> PriceCumulative {
        self.price0_cumulative_last
    }

    /// Σ `reserve0/reserve1 × seconds`, wrapping.
    #[must_use]
    pub const fn price1_cumulative_last(&self) -> PriceCumulative {
        self.price1_cumulative_last
    }

    /// `reserve0 × reserve1` as of the last liquidity event, or zero while
    /// the protocol fee is off.
    pub const fn k_last(&self) -> Amount {
        self.k_last
    }

    /// Reentrancy guard state.
    #[must_use]
    pub const fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Liquidity-share ledger.
    #[must_use]
    pub const fn shares(&self) -> &TokenLedger {
        &self.shares
    }

    pub(crate) fn shares_mut(&mut self) -> &mut TokenLedger {
        &mut self.shares
    }

    // -- Lock -----------------------------------------------------------------

    pub(crate) fn enter(&mut self) -> Result<()> {
        if self.lock == LockState::Locked {
            return Err(DexError::Locked);
        }
        self.lock = LockState::Locked;
        Ok(())
    }

    pub(crate) fn exit(&mut self) {
        self.lock = LockState::Unlocked;
    }

    // -- Reserves and oracle --------------------------------------------------

    /// Records new reserves and advances the price accumulators.
    ///
    /// Accumulates only when time has passed and both old reserves are
    /// non-zero.  Timestamps are taken modulo 2^32 and elapsed time uses
    /// wrapping subtraction.
    pub(crate) fn update(&mut self, balance0: Amount, balance1: Amount, now: u64) -> Result<Event> {
        if balance0.get() > MAX_U112 || balance1.get() > MAX_U112 {
            return Err(DexError::Overflow("reserve exceeds 112 bits"));
        }
        // truncation to 32 bits is the point
        #[allow(clippy::cast_possible_truncation)]
        let timestamp = now as u32;
        let elapsed = timestamp.wrapping_sub(self.block_timestamp_last);
        if elapsed > 0 && !self.reserve0.is_zero() && !self.reserve1.is_zero() {
            let price0 = Uq112x112::ratio(self.reserve1, self.reserve0)?;
            let price1 = Uq112x112::ratio(self.reserve0, self.reserve1)?;
            self.price0_cumulative_last = self.price0_cumulative_last.accumulate(price0, elapsed);
            self.price1_cumulative_last = self.price1_cumulative_last.accumulate(price1, elapsed);
        }
        self.reserve0 = balance0;
        self.reserve1 = balance1;
        self.block_timestamp_last = timestamp;
        Ok(Event::Sync {
            reserve0: balance0,
            reserve1: balance1,
        })
    }

    /// `reserve0 × reserve1`; cannot overflow for 112-bit reserves.
    pub(crate) fn invariant(&self) -> Result<Amount> {
        self.reserve0.safe_mul(&self.reserve1)
    }

    pub(crate) fn set_k_last(&mut self, k: Amount) {
        self.k_last = k;
    }

    /// Shares owed to the protocol for invariant growth since the last
    /// checkpoint, at a `1/share` cut.
    ///
    /// `supply × (√k − √kLast) / ((share − 1)·√k + √kLast)`, zero when
    /// `k_last` is zero or `k` has not grown.
    pub(crate) fn protocol_fee_liquidity(&self, share: u8) -> Result<Amount> {
        if self.k_last.is_zero() {
            return Ok(Amount::ZERO);
        }
        let root_k = Amount::new(isqrt(self.invariant()?.get()));
        let root_k_last = Amount::new(isqrt(self.k_last.get()));
        if root_k <= root_k_last {
            return Ok(Amount::ZERO);
        }
        let numerator = self
            .shares
            .total_supply()
            .safe_mul(&root_k.safe_sub(&root_k_last)?)?;
        let weight = Amount::new(U256::from(share.saturating_sub(1)));
        let denominator = root_k.safe_mul(&weight)?.safe_add(&root_k_last)?;
        numerator.safe_div(&denominator)
    }
}
