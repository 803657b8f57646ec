//! Constant-product pricing library.
//!
//! Pure functions shared by the router and by anyone who wants to predict
//! what a pair will pay.  Outputs round down, required inputs round up.

use crate::domain::{Amount, FeeTier};
use crate::error::DexError;
use crate::math::CheckedArithmetic;

fn bps_scale() -> Amount {
    Amount::from(u64::from(crate::domain::BPS_DENOMINATOR))
}

/// Amount of B worth `amount_a` of A at the current reserve ratio.
///
/// `floor(amount_a × reserve_b / reserve_a)`, no fee.
///
/// # Errors
///
/// - [`DexError::InsufficientAmount`] if `amount_a` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::Overflow`] if the product overflows.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
/// use hydra_dex::math::quote;
///
/// let b = quote(Amount::from(10u64), Amount::from(100u64), Amount::from(250u64));
/// assert_eq!(b, Ok(Amount::from(25u64)));
/// ```
pub fn quote(amount_a: Amount, reserve_a: Amount, reserve_b: Amount) -> Result<Amount, DexError> {
    if amount_a.is_zero() {
        return Err(DexError::InsufficientAmount);
    }
    if reserve_a.is_zero() || reserve_b.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }
    amount_a.mul_div(&reserve_b, &reserve_a)
}

/// Maximum output for an exact input, net of the trading fee.
///
/// `floor(in × (10⁴ − fee) × reserve_out / (reserve_in × 10⁴ + in × (10⁴ − fee)))`
///
/// # Errors
///
/// - [`DexError::InsufficientInputAmount`] if `amount_in` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
/// - [`DexError::Overflow`] if an intermediate product overflows.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, FeeTier};
/// use hydra_dex::math::get_amount_out;
///
/// let out = get_amount_out(
///     Amount::from(10u64),
///     Amount::from(1_000u64),
///     Amount::from(1_000u64),
///     FeeTier::DEFAULT,
/// );
/// assert_eq!(out, Ok(Amount::from(9u64)));
/// ```
pub fn get_amount_out(
    amount_in: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, DexError> {
    if amount_in.is_zero() {
        return Err(DexError::InsufficientInputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(DexError::InsufficientLiquidity);
    }
    let in_with_fee = amount_in.safe_mul(&Amount::new(fee.retained()))?;
    let numerator = in_with_fee.safe_mul(&reserve_out)?;
    let denominator = reserve_in.safe_mul(&bps_scale())?.safe_add(&in_with_fee)?;
    numerator.safe_div(&denominator)
}

/// Minimum input for an exact output, net of the trading fee.
///
/// `floor(reserve_in × out × 10⁴ / ((reserve_out − out) × (10⁴ − fee))) + 1`
///
/// The `+ 1` is applied even when the division is exact.
///
/// # Errors
///
/// - [`DexError::InsufficientOutputAmount`] if `amount_out` is zero.
/// - [`DexError::InsufficientLiquidity`] if either reserve is zero or
///   `amount_out` would drain `reserve_out`.
/// - [`DexError::DivisionByZero`] for a 100% fee.
/// - [`DexError::Overflow`] if an intermediate product overflows.
pub fn get_amount_in(
    amount_out: Amount,
    reserve_in: Amount,
    reserve_out: Amount,
    fee: FeeTier,
) -> Result<Amount, DexError> {
    if amount_out.is_zero() {
        return Err(DexError::InsufficientOutputAmount);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
        return Err(DexError::InsufficientLiquidity);
    }
    let numerator = reserve_in.safe_mul(&amount_out)?.safe_mul(&bps_scale())?;
    let denominator = reserve_out
        .safe_sub(&amount_out)?
        .safe_mul(&Amount::new(fee.retained()))?;
    numerator
        .safe_div(&denominator)?
        .safe_add(&Amount::ONE)
}
