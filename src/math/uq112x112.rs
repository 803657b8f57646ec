//! Binary fixed-point prices and the wrapping TWAP accumulator.
//!
//! A [`Uq112x112`] holds a non-negative ratio with 112 integer bits and
//! 112 fractional bits.  Because reserves are capped at `2^112 − 1`, the
//! ratio of two reserves always fits in 224 bits, and one such price times
//! a 32-bit elapsed time always fits in 256 bits.
//!
//! [`PriceCumulative`] sums `price × seconds` with intentional modular
//! overflow.  Only differences between two samples carry meaning, and
//! those are exact as long as the samples are less than one full wrap
//! apart.

use core::fmt;

use ethereum_types::{U256, U512};

use crate::domain::Amount;
use crate::error::DexError;

/// Number of fractional bits.
pub const RESOLUTION: usize = 112;

/// Largest value a reserve may hold: `2^112 − 1`.
pub const MAX_U112: U256 = U256([u64::MAX, (1u64 << 48) - 1, 0, 0]);

/// Narrows a 512-bit value, `None` if any high limb is set.
pub(crate) fn narrow(value: U512) -> Option<U256> {
    let limbs = value.0;
    if limbs[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256([limbs[0], limbs[1], limbs[2], limbs[3]]))
}

/// Unsigned fixed-point number, 112.112 binary.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
/// use hydra_dex::math::Uq112x112;
///
/// // reserve1 / reserve0 = 4e18 / 1e18
/// let price = Uq112x112::ratio(Amount::from(4_000u64), Amount::from(1_000u64)).expect("in range");
/// assert_eq!(price.decode(), 4u64.into());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Uq112x112(U256);

impl Uq112x112 {
    /// Lifts an integer into fixed point.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if `value` exceeds `2^112 − 1`.
    pub fn encode(value: Amount) -> Result<Self, DexError> {
        if value.get() > MAX_U112 {
            return Err(DexError::Overflow("uq112x112 encode"));
        }
        Ok(Self(value.get() << RESOLUTION))
    }

    /// `numerator / denominator` in fixed point.
    ///
    /// # Errors
    ///
    /// - [`DexError::Overflow`] if `numerator` exceeds `2^112 − 1`.
    /// - [`DexError::DivisionByZero`] if `denominator` is zero.
    pub fn ratio(numerator: Amount, denominator: Amount) -> Result<Self, DexError> {
        Self::encode(numerator)?.uqdiv(denominator)
    }

    /// Divides by an integer, truncating.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] if `divisor` is zero.
    pub fn uqdiv(self, divisor: Amount) -> Result<Self, DexError> {
        if divisor.is_zero() {
            return Err(DexError::DivisionByZero);
        }
        Ok(Self(self.0 / divisor.get()))
    }

    /// Wraps a raw fixed-point word.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Raw fixed-point word.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Integer part, fraction discarded.
    #[must_use]
    pub fn decode(&self) -> U256 {
        self.0 >> RESOLUTION
    }

    /// `floor(self × amount)` as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the product does not fit 256 bits.
    pub fn mul_decode(&self, amount: Amount) -> Result<Amount, DexError> {
        let wide = self.0.full_mul(amount.get()) >> RESOLUTION;
        narrow(wide)
            .map(Amount::new)
            .ok_or(DexError::Overflow("uq112x112 mul_decode"))
    }
}

impl fmt::Display for Uq112x112 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/2^112", self.0)
    }
}

/// Running sum of `price × seconds`, modulo `2^256`.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
/// use hydra_dex::math::{PriceCumulative, Uq112x112};
///
/// let price = Uq112x112::ratio(Amount::from(2u64), Amount::from(1u64)).expect("in range");
/// let start = PriceCumulative::ZERO;
/// let later = start.accumulate(price, 10);
/// let twap = later.average_since(start, 10).expect("non-zero window");
/// assert_eq!(twap, price);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PriceCumulative(U256);

impl PriceCumulative {
    /// Accumulator at genesis.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// Wraps a raw accumulator word.
    #[must_use]
    pub const fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// Raw accumulator word.
    #[must_use]
    pub const fn raw(&self) -> U256 {
        self.0
    }

    /// Adds `price × elapsed`, wrapping on overflow.
    #[must_use]
    pub fn accumulate(self, price: Uq112x112, elapsed: u32) -> Self {
        let (term, _) = price.raw().overflowing_mul(U256::from(elapsed));
        let (sum, _) = self.0.overflowing_add(term);
        Self(sum)
    }

    /// `self − earlier` modulo `2^256`.
    #[must_use]
    pub fn wrapping_delta(self, earlier: Self) -> U256 {
        self.0.overflowing_sub(earlier.0).0
    }

    /// Time-weighted average price between `earlier` and `self`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] for an empty window.
    pub fn average_since(self, earlier: Self, elapsed: u32) -> Result<Uq112x112, DexError> {
        if elapsed == 0 {
            return Err(DexError::DivisionByZero);
        }
        Ok(Uq112x112(self.wrapping_delta(earlier) / U256::from(elapsed)))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn price(num: u64, den: u64) -> Uq112x112 {
        let Ok(p) = Uq112x112::ratio(Amount::from(num), Amount::from(den)) else {
            panic!("valid ratio");
        };
        p
    }

    // -- Uq112x112 ------------------------------------------------------------

    #[test]
    fn max_u112_is_two_pow_112_minus_one() {
        assert_eq!(MAX_U112, (U256::one() << 112) - 1);
    }

    #[test]
    fn encode_rejects_oversized() {
        let Ok(_) = Uq112x112::encode(Amount::new(MAX_U112)) else {
            panic!("boundary fits");
        };
        let too_big = Amount::new(MAX_U112 + 1);
        assert!(matches!(Uq112x112::encode(too_big), Err(DexError::Overflow(_))));
    }

    #[test]
    fn ratio_matches_shifted_division() {
        // 4e18 / 1e18, as in the encodePrice fixture
        let r0 = Amount::from(1_000_000_000_000_000_000u64);
        let r1 = Amount::from(4_000_000_000_000_000_000u128);
        let Ok(p) = Uq112x112::ratio(r1, r0) else {
            panic!("valid ratio");
        };
        assert_eq!(p.raw(), (r1.get() << 112) / r0.get());
        assert_eq!(p.decode(), U256::from(4u8));
    }

    #[test]
    fn uqdiv_by_zero() {
        assert_eq!(
            Uq112x112::ratio(Amount::ONE, Amount::ZERO),
            Err(DexError::DivisionByZero)
        );
    }

    #[test]
    fn mul_decode_truncates() {
        // 1/3 * 10 = 3.33
        let third = price(1, 3);
        assert_eq!(third.mul_decode(Amount::from(10u64)), Ok(Amount::from(3u64)));
    }

    #[test]
    fn narrow_rejects_high_limbs() {
        assert_eq!(narrow(U512::from(5u8)), Some(U256::from(5u8)));
        assert_eq!(narrow(U512::one() << 256), None);
    }

    // -- PriceCumulative ------------------------------------------------------

    #[test]
    fn accumulate_adds_price_times_elapsed() {
        let p = price(3, 2);
        let acc = PriceCumulative::ZERO.accumulate(p, 7);
        assert_eq!(acc.raw(), p.raw() * 7);
    }

    #[test]
    fn delta_survives_wraparound() {
        let p = price(5, 1);
        // 10 seconds before the accumulator wraps
        let near_top = U256::max_value() - p.raw() * 10 + 1;
        let before = PriceCumulative::from_raw(near_top);
        let after = before.accumulate(p, 25);
        assert!(after.raw() < before.raw(), "accumulator should have wrapped");
        assert_eq!(after.wrapping_delta(before), p.raw() * 25);
        let Ok(twap) = after.average_since(before, 25) else {
            panic!("non-empty window");
        };
        assert_eq!(twap, p);
    }

    #[test]
    fn empty_window_is_rejected() {
        let acc = PriceCumulative::ZERO;
        assert_eq!(acc.average_since(acc, 0), Err(DexError::DivisionByZero));
    }

    proptest! {
        #[test]
        fn delta_is_exact_from_any_start(
            start in any::<[u64; 4]>(),
            num in 1u64..=u64::MAX,
            den in 1u64..=u64::MAX,
            elapsed in 1u32..=u32::MAX,
        ) {
            let p = price(num, den);
            let before = PriceCumulative::from_raw(U256(start));
            let after = before.accumulate(p, elapsed);
            prop_assert_eq!(after.wrapping_delta(before), p.raw() * U256::from(elapsed));
        }
    }
}
