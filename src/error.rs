//! Unified error types for the exchange.
//!
//! Every fallible operation returns [`DexError`].  A failing operation
//! aborts its enclosing transaction: [`Chain::transact`](crate::chain::Chain::transact)
//! restores the world state captured before the call, so callers never
//! observe partial effects.  [`DexError::reason`] exposes the short
//! machine-readable tag a rejected transaction carries.

use crate::domain::Address;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, DexError>;

/// Every way a ledger, pair, registry or router call can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DexError {
    /// Debit exceeds the account's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// `transfer_from` exceeds the spender's allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A mint would issue zero liquidity shares.
    #[error("insufficient liquidity minted")]
    InsufficientLiquidityMinted,

    /// A burn would release zero of either asset.
    #[error("insufficient liquidity burned")]
    InsufficientLiquidityBurned,

    /// Requested output is zero or below the caller's minimum.
    #[error("insufficient output amount")]
    InsufficientOutputAmount,

    /// Swap received no input, or a quote was asked for zero input.
    #[error("insufficient input amount")]
    InsufficientInputAmount,

    /// Reserves cannot cover the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// `quote` was asked to price a zero amount.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// Optimal amount of the first asset fell below its minimum.
    #[error("insufficient amount of asset A")]
    InsufficientAmountA,

    /// Optimal amount of the second asset fell below its minimum.
    #[error("insufficient amount of asset B")]
    InsufficientAmountB,

    /// Exact-output swap would need more input than the caller allows.
    #[error("excessive input amount")]
    ExcessiveInputAmount,

    /// Swap recipient is one of the pair's own assets.
    #[error("invalid recipient")]
    InvalidRecipient,

    /// Post-swap balances violate the constant-product invariant.
    #[error("constant-product invariant violated")]
    KInvariantViolated,

    /// Caller lacks the privilege the operation requires.
    #[error("forbidden")]
    Forbidden,

    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAssets,

    /// An asset address is the null account.
    #[error("zero address")]
    ZeroAddress,

    /// The asset pair is already registered.
    #[error("pair exists")]
    PairExists,

    /// No pair is deployed for the requested assets.
    #[error("pair not found")]
    PairNotFound,

    /// Deadline or permit deadline has passed.
    #[error("expired")]
    Expired,

    /// Delegated-approval signature does not belong to the owner.
    #[error("invalid signature")]
    InvalidSignature,

    /// Re-entrant call into a pair that is mid-operation.
    #[error("locked")]
    Locked,

    /// Router path is too short or does not start/end where required.
    #[error("invalid path")]
    InvalidPath,

    /// No contract of the expected kind lives at the address.
    #[error("unknown contract {0}")]
    UnknownContract(Address),

    /// Flash-swap data was supplied but the recipient has no callback.
    #[error("recipient cannot receive a flash-swap callback")]
    InvalidCallee,

    /// Block clock asked to move backwards.
    #[error("timestamp must not decrease")]
    InvalidTimestamp,

    /// A configuration blueprint failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

impl DexError {
    /// Short machine-readable reason tag carried by a rejected transaction.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::InsufficientBalance => "INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance => "INSUFFICIENT_ALLOWANCE",
            Self::InsufficientLiquidityMinted => "INSUFFICIENT_LIQUIDITY_MINTED",
            Self::InsufficientLiquidityBurned => "INSUFFICIENT_LIQUIDITY_BURNED",
            Self::InsufficientOutputAmount => "INSUFFICIENT_OUTPUT_AMOUNT",
            Self::InsufficientInputAmount => "INSUFFICIENT_INPUT_AMOUNT",
            Self::InsufficientLiquidity => "INSUFFICIENT_LIQUIDITY",
            Self::InsufficientAmount => "INSUFFICIENT_AMOUNT",
            Self::InsufficientAmountA => "INSUFFICIENT_A_AMOUNT",
            Self::InsufficientAmountB => "INSUFFICIENT_B_AMOUNT",
            Self::ExcessiveInputAmount => "EXCESSIVE_INPUT_AMOUNT",
            Self::InvalidRecipient => "INVALID_TO",
            Self::KInvariantViolated => "K",
            Self::Forbidden => "FORBIDDEN",
            Self::IdenticalAssets => "IDENTICAL_ADDRESSES",
            Self::ZeroAddress => "ZERO_ADDRESS",
            Self::PairExists => "PAIR_EXISTS",
            Self::PairNotFound => "PAIR_NOT_FOUND",
            Self::Expired => "EXPIRED",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::Locked => "LOCKED",
            Self::InvalidPath => "INVALID_PATH",
            Self::UnknownContract(_) => "UNKNOWN_CONTRACT",
            Self::InvalidCallee => "INVALID_CALLEE",
            Self::InvalidTimestamp => "INVALID_TIMESTAMP",
            Self::InvalidConfiguration(_) => "INVALID_CONFIGURATION",
            Self::Overflow(_) => "OVERFLOW",
            Self::Underflow(_) => "UNDERFLOW",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
        }
    }
}
