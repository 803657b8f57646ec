//! Constant-product pair engine.
//!
//! [`PairEngine`] holds a pair's reserves, TWAP accumulators, protocol-fee
//! checkpoint, reentrancy lock and liquidity-share ledger.  The operations
//! that move tokens (`mint`, `burn`, `swap`, `skim`, `sync`) are methods on
//! [`Chain`](crate::chain::Chain), because they touch the token ledgers as
//! well as the pair.
//!
//! # Invariants
//!
//! - Reserves never exceed `2^112 − 1`.
//! - After any swap, `(b0·10⁴ − in0·fee)·(b1·10⁴ − in1·fee) ≥ r0·r1·10⁸`.
//! - Once the first mint has happened, at least [`MINIMUM_LIQUIDITY`]
//!   shares exist and are held by the null account.

mod engine;
mod operations;

#[cfg(test)]
mod proptest_properties;

pub use engine::{LockState, PairEngine, MINIMUM_LIQUIDITY, SHARE_NAME, SHARE_SYMBOL};
