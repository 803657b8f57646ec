//! In-process execution substrate.
//!
//! A [`Chain`] owns the single canonical world state: token ledgers, pairs,
//! registries, routers, native balances and the event log.  Every public
//! state-changing call runs inside [`Chain::transact`], which snapshots the
//! state and restores it if the call fails, so no failure is ever partially
//! applied.
//!
//! Contract modules (`token`, `pair`, `factory`, `router`) extend `Chain`
//! with their own operations.  Each public operation has a crate-private
//! `*_inner` twin that skips the snapshot, used when one operation calls
//! another inside the same transaction.

mod context;
mod events;
mod state;

use std::collections::BTreeMap;
use std::fmt;

use tracing::{debug, info, warn};

pub use context::CalleeContext;
pub use events::{Event, EventLog, LogEntry};
pub(crate) use state::WorldState;

use crate::config::ChainConfig;
use crate::domain::{Address, Amount};
use crate::error::{DexError, Result};
use crate::factory::create_address;
use crate::math::CheckedArithmetic;
use crate::pair::PairEngine;
use crate::token::TokenLedger;
use crate::traits::{FlashSwapCall, FromConfig, SwapCallee};

/// The world: state, registered flash-swap callees, call depth.
pub struct Chain {
    state: WorldState,
    callees: BTreeMap<Address, Box<dyn SwapCallee>>,
    depth: usize,
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("chain_id", &self.state.block.chain_id)
            .field("timestamp", &self.state.block.timestamp)
            .field("tokens", &self.state.tokens.len())
            .field("pairs", &self.state.pairs.len())
            .field("callees", &self.callees.keys().collect::<Vec<_>>())
            .field("events", &self.state.events.len())
            .finish()
    }
}

impl FromConfig<ChainConfig> for Chain {
    fn from_config(config: &ChainConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(*config))
    }
}

impl Default for Chain {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

impl Chain {
    /// Genesis state for `config`.
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        Self {
            state: WorldState::new(config.chain_id(), config.genesis_timestamp()),
            callees: BTreeMap::new(),
            depth: 0,
        }
    }

    /// Runs `body` atomically.
    ///
    /// On `Err` the world state (events included) is restored to what it
    /// was before `body` ran.  Nested calls take their own snapshot, so a
    /// failing inner call that its caller recovers from only reverts
    /// itself.  Callee objects are outside the world state and keep any
    /// changes they made to themselves.
    ///
    /// # Errors
    ///
    /// Returns whatever `body` returns.
    pub fn transact<T>(
        &mut self,
        op: &'static str,
        body: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        let snapshot = self.state.clone();
        self.depth += 1;
        let result = body(self);
        self.depth -= 1;
        if let Err(err) = &result {
            self.state = snapshot;
            if self.depth == 0 {
                warn!(op, reason = err.reason(), error = %err, "transaction reverted");
            } else {
                debug!(op, reason = err.reason(), depth = self.depth, "nested call reverted");
            }
        }
        result
    }

    // -- Block environment ----------------------------------------------------

    /// Chain identity bound into permit digests.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.state.block.chain_id
    }

    /// Current block timestamp in seconds.
    #[must_use]
    pub fn timestamp(&self) -> u64 {
        self.state.block.timestamp
    }

    /// Moves the clock to `timestamp`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidTimestamp`] if `timestamp` is in the past.
    pub fn set_timestamp(&mut self, timestamp: u64) -> Result<()> {
        if timestamp < self.state.block.timestamp {
            return Err(DexError::InvalidTimestamp);
        }
        self.state.block.timestamp = timestamp;
        Ok(())
    }

    /// Moves the clock forward by `seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the clock would pass `u64::MAX`.
    pub fn advance_time(&mut self, seconds: u64) -> Result<()> {
        let next = self
            .state
            .block
            .timestamp
            .checked_add(seconds)
            .ok_or(DexError::Overflow("block timestamp"))?;
        self.state.block.timestamp = next;
        Ok(())
    }

    /// The event log.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.state.events
    }

    pub(crate) fn emit(&mut self, emitter: Address, event: Event) {
        self.state.events.push(emitter, event);
    }

    pub(crate) fn state(&self) -> &WorldState {
        &self.state
    }

    pub(crate) fn state_mut(&mut self) -> &mut WorldState {
        &mut self.state
    }

    // -- Native asset ---------------------------------------------------------

    /// Native balance of `account`.
    #[must_use]
    pub fn native_balance(&self, account: Address) -> Amount {
        self.state.native.get(&account).copied().unwrap_or_default()
    }

    /// Credits `account` with fresh native value (genesis allocation).
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the balance would exceed 2^256 − 1.
    pub fn fund_native(&mut self, account: Address, amount: Amount) -> Result<()> {
        let balance = self.native_balance(account).safe_add(&amount)?;
        self.state.native.insert(account, balance);
        Ok(())
    }

    /// Moves native value between accounts.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` cannot cover
    /// `amount`.
    pub fn send_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.transact("send_native", |chain| chain.transfer_native(from, to, amount))
    }

    pub(crate) fn transfer_native(&mut self, from: Address, to: Address, amount: Amount) -> Result<()> {
        let debited = self
            .native_balance(from)
            .checked_sub(&amount)
            .ok_or(DexError::InsufficientBalance)?;
        self.state.native.insert(from, debited);
        let credited = self.native_balance(to).safe_add(&amount)?;
        self.state.native.insert(to, credited);
        Ok(())
    }

    // -- Deployment -----------------------------------------------------------

    /// Next create-style address for `deployer`; bumps its nonce.
    pub(crate) fn next_address(&mut self, deployer: Address) -> Address {
        let nonce = self.state.deploy_nonces.entry(deployer).or_insert(0);
        let address = create_address(deployer, *nonce);
        *nonce += 1;
        address
    }

    /// Registers a flash-swap counterparty and returns its address.
    pub fn deploy_callee(&mut self, deployer: Address, callee: Box<dyn SwapCallee>) -> Address {
        let address = self.next_address(deployer);
        self.callees.insert(address, callee);
        info!(%address, %deployer, "callee deployed");
        address
    }

    /// `true` if a flash-swap callee is registered at `address`.
    #[must_use]
    pub fn has_callee(&self, address: Address) -> bool {
        self.callees.contains_key(&address)
    }

    /// Hands control to the callee registered at `call.callee`.
    ///
    /// The callee is taken out of the registry for the duration of the
    /// call, so a callee that re-enters a swap naming itself as the
    /// recipient again sees [`DexError::InvalidCallee`].  The callee only
    /// gets a [`CalleeContext`], which acts as `call.callee` and nobody else.
    pub(crate) fn invoke_callee(&mut self, call: &FlashSwapCall<'_>) -> Result<()> {
        let mut callee = self
            .callees
            .remove(&call.callee)
            .ok_or(DexError::InvalidCallee)?;
        let result = callee.on_flash_swap(&mut CalleeContext::new(self, call.callee), call);
        self.callees.insert(call.callee, callee);
        result
    }

    // -- Contract lookup ------------------------------------------------------

    /// Any token ledger, including a pair's liquidity-share ledger.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if no ledger lives at `token`.
    pub fn ledger(&self, token: Address) -> Result<&TokenLedger> {
        self.state
            .tokens
            .get(&token)
            .or_else(|| self.state.pairs.get(&token).map(PairEngine::shares))
            .ok_or(DexError::UnknownContract(token))
    }

    pub(crate) fn ledger_mut(&mut self, token: Address) -> Result<&mut TokenLedger> {
        if let Some(ledger) = self.state.tokens.get_mut(&token) {
            return Ok(ledger);
        }
        self.state
            .pairs
            .get_mut(&token)
            .map(PairEngine::shares_mut)
            .ok_or(DexError::UnknownContract(token))
    }

    /// The pair engine at `pair`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`] if no pair lives there.
    pub fn pair(&self, pair: Address) -> Result<&PairEngine> {
        self.state.pairs.get(&pair).ok_or(DexError::UnknownContract(pair))
    }

    pub(crate) fn pair_mut(&mut self, pair: Address) -> Result<&mut PairEngine> {
        self.state
            .pairs
            .get_mut(&pair)
            .ok_or(DexError::UnknownContract(pair))
    }
}
