//! Checked arithmetic trait for domain wrapper types.
//!
//! The [`CheckedArithmetic`] trait provides fallible arithmetic operations
//! that return [`Result<Self, DexError>`](crate::error::DexError) instead
//! of panicking on overflow, underflow, or division by zero.
//!
//! # Examples
//!
//! ```
//! use hydra_dex::domain::Amount;
//! use hydra_dex::math::CheckedArithmetic;
//!
//! let a = Amount::from(100u64);
//! let b = Amount::from(200u64);
//! assert_eq!(a.safe_add(&b), Ok(Amount::from(300u64)));
//! assert!(a.safe_sub(&b).is_err());
//! ```

use crate::domain::Amount;
use crate::error::DexError;

/// Fallible arithmetic for domain wrapper types.
///
/// Every method returns a specific error variant so callers can tell
/// overflow from underflow from division by zero.  Nothing saturates.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Underflow`] if the result would be negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, DexError>;

    /// Checked floor division.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self) -> Result<Self, DexError>;

    /// `self × numerator / denominator`, rounded down.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`safe_mul`](Self::safe_mul) and
    /// [`safe_div`](Self::safe_div).
    fn mul_div(&self, numerator: &Self, denominator: &Self) -> Result<Self, DexError> {
        self.safe_mul(numerator)?.safe_div(denominator)
    }
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_add(other)
            .ok_or(DexError::Overflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_sub(other)
            .ok_or(DexError::Underflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_mul(other)
            .ok_or(DexError::Overflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self) -> Result<Self, DexError> {
        self.checked_div(other).ok_or(DexError::DivisionByZero)
    }
}
