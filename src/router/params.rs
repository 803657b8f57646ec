//! Request structs for router entry points.
//!
//! Every request carries a `deadline` (inclusive, in block seconds) and
//! slippage bounds; the router rejects the call rather than execute outside
//! them.

use crate::domain::{Address, Amount};
use crate::token::PermitSignature;

/// Deposit into the `token_a`/`token_b` pair, creating it if needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidity {
    /// First token, in caller order.
    pub token_a: Address,
    /// Second token, in caller order.
    pub token_b: Address,
    /// Upper bound on `token_a` deposited.
    pub amount_a_desired: Amount,
    /// Upper bound on `token_b` deposited.
    pub amount_b_desired: Amount,
    /// Lower bound on `token_a` deposited once the ratio is applied.
    pub amount_a_min: Amount,
    /// Lower bound on `token_b` deposited once the ratio is applied.
    pub amount_b_min: Amount,
    /// Receives the liquidity shares.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
}

/// Deposit into the `token`/wrapped-native pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityNative {
    /// The non-native side of the pair.
    pub token: Address,
    /// Upper bound on `token` deposited.
    pub amount_token_desired: Amount,
    /// Lower bound on `token` deposited once the ratio is applied.
    pub amount_token_min: Amount,
    /// Lower bound on native value deposited once the ratio is applied.
    pub amount_native_min: Amount,
    /// Receives the liquidity shares.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
    /// Native value attached to the call; whatever the ratio leaves unused
    /// is refunded.
    pub value: Amount,
}

/// Burn `liquidity` shares of the `token_a`/`token_b` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidity {
    /// First token, in caller order.
    pub token_a: Address,
    /// Second token, in caller order.
    pub token_b: Address,
    /// Shares pulled from the caller and burned.
    pub liquidity: Amount,
    /// Lower bound on `token_a` received.
    pub amount_a_min: Amount,
    /// Lower bound on `token_b` received.
    pub amount_b_min: Amount,
    /// Receives both underlying tokens.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
}

/// Burn shares of the `token`/wrapped-native pair and receive native value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityNative {
    /// The non-native side of the pair.
    pub token: Address,
    /// Shares pulled from the caller and burned.
    pub liquidity: Amount,
    /// Lower bound on `token` received.
    pub amount_token_min: Amount,
    /// Lower bound on native value received.
    pub amount_native_min: Amount,
    /// Receives the token and the unwrapped native value.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
}

/// Signed share approval submitted together with a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitArgs {
    /// Approve `Amount::MAX` instead of exactly the shares being removed.
    pub approve_max: bool,
    /// Owner's signature over the permit digest.
    pub signature: PermitSignature,
}

/// Sell exactly `amount_in` along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactIn {
    /// Input sold; for the native-input variant, the attached native value.
    pub amount_in: Amount,
    /// Lower bound on the final output.
    pub amount_out_min: Amount,
    /// Tokens visited in order, at least two.
    pub path: Vec<Address>,
    /// Receives the final output.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
}

/// Buy exactly `amount_out` along `path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapExactOut {
    /// Output bought.
    pub amount_out: Amount,
    /// Upper bound on the input spent; for the native-input variant, the
    /// attached native value, with the unspent part refunded.
    pub amount_in_max: Amount,
    /// Tokens visited in order, at least two.
    pub path: Vec<Address>,
    /// Receives the final output.
    pub to: Address,
    /// Last accepted block timestamp.
    pub deadline: u64,
}
