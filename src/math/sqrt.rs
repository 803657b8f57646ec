//! Integer square root over 256-bit values.

use ethereum_types::U256;

/// `floor(sqrt(y))` by the Babylonian method.
///
/// Used for first-deposit share issuance and for `√k` in the protocol-fee
/// computation.
///
/// # Examples
///
/// ```
/// use ethereum_types::U256;
/// use hydra_dex::math::isqrt;
///
/// assert_eq!(isqrt(U256::from(16u8)), U256::from(4u8));
/// assert_eq!(isqrt(U256::from(17u8)), U256::from(4u8));
/// ```
#[must_use]
pub fn isqrt(y: U256) -> U256 {
    if y > U256::from(3u8) {
        let mut z = y;
        let mut x = y / 2 + 1;
        while x < z {
            z = x;
            x = (y / x + x) / 2;
        }
        z
    } else if y.is_zero() {
        U256::zero()
    } else {
        U256::one()
    }
}
