//! Raw 256-bit token amount with checked arithmetic.

use core::fmt;

use ethereum_types::U256;

/// A raw token amount in the smallest unit.
///
/// Backed by a 256-bit unsigned integer so balances, allowances and the
/// "unlimited" allowance sentinel ([`Amount::MAX`]) share one type.
/// Arithmetic methods are checked: they return `None` on overflow,
/// underflow, or division by zero instead of panicking.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Amount;
///
/// let a = Amount::from(100u64);
/// let b = Amount::from(200u64);
/// assert_eq!(a.checked_add(&b), Some(Amount::from(300u64)));
/// assert_eq!(b.checked_sub(&a), Some(a));
/// assert_eq!(Amount::from(10u64).checked_div(&Amount::from(3u64)), Some(Amount::from(3u64)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[must_use]
pub struct Amount(U256);

impl Amount {
    /// Zero amount.
    pub const ZERO: Self = Self(U256([0, 0, 0, 0]));

    /// One raw unit.
    pub const ONE: Self = Self(U256([1, 0, 0, 0]));

    /// Maximum representable amount; as an allowance it means unlimited.
    pub const MAX: Self = Self(U256([u64::MAX; 4]));

    /// Wraps a raw 256-bit value.
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Builds an amount from a `u128`.
    pub const fn from_u128(value: u128) -> Self {
        Self(U256([value as u64, (value >> 64) as u64, 0, 0]))
    }

    /// Returns the underlying 256-bit value.
    #[must_use]
    pub const fn get(&self) -> U256 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checked addition. Returns `None` on overflow.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction. Returns `None` on underflow.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Checked multiplication. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        self.0.checked_mul(other.0).map(Self)
    }

    /// Checked floor division. Returns `None` if `divisor` is zero.
    #[must_use]
    pub fn checked_div(&self, divisor: &Self) -> Option<Self> {
        self.0.checked_div(divisor.0).map(Self)
    }

    /// Big-endian 32-byte ABI word.
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        self.0.to_big_endian(&mut word);
        word
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl From<U256> for Amount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
