//! Canonically ordered pair of distinct token addresses.

use super::Address;
use crate::error::DexError;

/// An ordered pair of distinct tokens, sorted by address.
///
/// The lower address is always `first` (`token0`), so `(A, B)` and `(B, A)`
/// collapse to the same key.  The zero address is never a valid member.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Address, TokenPair};
///
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
///
/// let pair = TokenPair::new(b, a).expect("distinct tokens");
/// assert_eq!(pair.first(), a);
/// assert_eq!(pair.second(), b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenPair {
    token0: Address,
    token1: Address,
}

impl TokenPair {
    /// Sorts the two addresses into canonical order.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAssets`] if `a == b`.
    /// - [`DexError::ZeroAddress`] if either address is the null account.
    pub fn new(a: Address, b: Address) -> Result<Self, DexError> {
        if a == b {
            return Err(DexError::IdenticalAssets);
        }
        let (token0, token1) = if a < b { (a, b) } else { (b, a) };
        // the smaller of the two is zero iff either is
        if token0.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        Ok(Self { token0, token1 })
    }

    /// Lower address (`token0`).
    #[must_use]
    pub const fn first(&self) -> Address {
        self.token0
    }

    /// Higher address (`token1`).
    #[must_use]
    pub const fn second(&self) -> Address {
        self.token1
    }

    /// `true` when `token` sorts first, i.e. is `token0`.
    #[must_use]
    pub fn is_first(&self, token: Address) -> bool {
        token == self.token0
    }

    /// `token0 ‖ token1`, the preimage of the pair salt.
    #[must_use]
    pub fn packed(&self) -> [u8; 40] {
        let mut out = [0u8; 40];
        out[..20].copy_from_slice(&self.token0.as_bytes());
        out[20..].copy_from_slice(&self.token1.as_bytes());
        out
    }
}
