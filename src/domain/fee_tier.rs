//! Trading fee tiers built on [`BasisPoints`].

use core::fmt;

use ethereum_types::U256;

use super::BasisPoints;

/// The swap fee a pair charges on net input, in basis points.
///
/// The fee stays in the pool: the invariant check deducts it from the
/// post-swap balances, so liquidity providers accrue it through reserve
/// growth.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::FeeTier;
///
/// let tier = FeeTier::DEFAULT;
/// assert_eq!(tier.basis_points().get(), 30);
/// assert!(tier.is_tradable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// 0.30%, the fee every registry uses unless configured otherwise.
    pub const DEFAULT: Self = Self(BasisPoints::new(30));

    /// Creates a new `FeeTier` from arbitrary [`BasisPoints`].
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// `true` when some input survives the fee (fee below 100%).
    #[must_use]
    pub const fn is_tradable(&self) -> bool {
        self.0.get() < BasisPoints::MAX_PERCENT.get()
    }

    /// Fee rate as a 256-bit scalar, for invariant arithmetic.
    #[must_use]
    pub fn rate(&self) -> U256 {
        U256::from(self.0.get())
    }

    /// `10_000 − fee` as a 256-bit scalar; zero for fees at or above 100%.
    #[must_use]
    pub fn retained(&self) -> U256 {
        U256::from(self.0.complement().unwrap_or(0))
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}
