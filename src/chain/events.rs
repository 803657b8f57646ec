//! Ordered, append-only event log.

use crate::domain::{Address, Amount};

/// A notification emitted by a ledger, pair, registry or wrapped-native
/// contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Balance moved between accounts; mints come from and burns go to
    /// [`Address::ZERO`].
    Transfer {
        /// Debited account.
        from: Address,
        /// Credited account.
        to: Address,
        /// Amount moved.
        value: Amount,
    },
    /// Allowance set, by `approve` or `permit`.
    Approval {
        /// Account whose balance may be spent.
        owner: Address,
        /// Account allowed to spend.
        spender: Address,
        /// New allowance.
        value: Amount,
    },
    /// Liquidity added to a pair.
    Mint {
        /// Caller of `mint`.
        sender: Address,
        /// Token0 deposited.
        amount0: Amount,
        /// Token1 deposited.
        amount1: Amount,
    },
    /// Liquidity removed from a pair.
    Burn {
        /// Caller of `burn`.
        sender: Address,
        /// Token0 released.
        amount0: Amount,
        /// Token1 released.
        amount1: Amount,
        /// Recipient of both amounts.
        to: Address,
    },
    /// Trade executed by a pair.
    Swap {
        /// Caller of `swap`.
        sender: Address,
        /// Net token0 received.
        amount0_in: Amount,
        /// Net token1 received.
        amount1_in: Amount,
        /// Token0 paid out.
        amount0_out: Amount,
        /// Token1 paid out.
        amount1_out: Amount,
        /// Recipient of the outputs.
        to: Address,
    },
    /// Reserves updated to match balances.
    Sync {
        /// New token0 reserve.
        reserve0: Amount,
        /// New token1 reserve.
        reserve1: Amount,
    },
    /// Registry deployed a new pair.
    PairCreated {
        /// Lower-sorted asset.
        token0: Address,
        /// Higher-sorted asset.
        token1: Address,
        /// Address of the new pair.
        pair: Address,
        /// Number of pairs after this one was added.
        index: u64,
    },
    /// Native asset wrapped.
    Deposit {
        /// Account credited with wrapped tokens.
        owner: Address,
        /// Amount wrapped.
        value: Amount,
    },
    /// Wrapped tokens redeemed for the native asset.
    Withdrawal {
        /// Account debited.
        owner: Address,
        /// Amount unwrapped.
        value: Amount,
    },
}

impl Event {
    /// Event name as an indexer would key it.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "Transfer",
            Self::Approval { .. } => "Approval",
            Self::Mint { .. } => "Mint",
            Self::Burn { .. } => "Burn",
            Self::Swap { .. } => "Swap",
            Self::Sync { .. } => "Sync",
            Self::PairCreated { .. } => "PairCreated",
            Self::Deposit { .. } => "Deposit",
            Self::Withdrawal { .. } => "Withdrawal",
        }
    }
}

/// An event together with the contract that emitted it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Emitting contract.
    pub emitter: Address,
    /// Payload.
    pub event: Event,
}

/// Append-only sequence of [`LogEntry`] values.
///
/// Rolled back together with the rest of the world state when a
/// transaction fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub(crate) fn push(&mut self, emitter: Address, event: Event) {
        self.entries.push(LogEntry { emitter, event });
    }

    /// All entries in emission order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries emitted after the first `mark` entries.
    ///
    /// Take `mark` from [`len`](Self::len) before a call to get exactly
    /// what that call emitted.
    #[must_use]
    pub fn since(&self, mark: usize) -> &[LogEntry] {
        self.entries.get(mark..).unwrap_or(&[])
    }

    /// Entries emitted by `emitter`, in order.
    pub fn emitted_by(&self, emitter: Address) -> impl Iterator<Item = &LogEntry> + '_ {
        self.entries.iter().filter(move |e| e.emitter == emitter)
    }
}
