//! Deterministic contract addresses.
//!
//! Pairs are placed create2-style, purely from the registry address, the
//! sorted token pair and a fingerprint of the pair engine code, so anyone
//! can compute a pair's address without touching state.  Everything else
//! is placed create-style from the deployer and its deployment nonce.

use crate::abi::keccak256;
use crate::domain::{Address, TokenPair};
use crate::error::DexError;

/// Identity of the pair engine code, hashed into every pair address.
const PAIR_CODE_ID: &str = concat!(env!("CARGO_PKG_NAME"), "/pair-engine/", env!("CARGO_PKG_VERSION"));

/// Fingerprint of the pair engine code.
#[must_use]
pub fn pair_code_hash() -> [u8; 32] {
    keccak256(PAIR_CODE_ID.as_bytes())
}

/// `keccak256(0xff ‖ deployer ‖ salt ‖ code_hash)[12..]`.
#[must_use]
pub fn create2_address(deployer: Address, salt: &[u8; 32], code_hash: &[u8; 32]) -> Address {
    let mut preimage = [0u8; 85];
    preimage[0] = 0xff;
    preimage[1..21].copy_from_slice(&deployer.as_bytes());
    preimage[21..53].copy_from_slice(salt);
    preimage[53..].copy_from_slice(code_hash);
    Address::from_hash(&keccak256(&preimage))
}

/// `keccak256("create" ‖ deployer ‖ nonce)[12..]`, nonce as 8 bytes
/// big-endian.
#[must_use]
pub fn create_address(deployer: Address, nonce: u64) -> Address {
    let mut preimage = [0u8; 34];
    preimage[..6].copy_from_slice(b"create");
    preimage[6..26].copy_from_slice(&deployer.as_bytes());
    preimage[26..].copy_from_slice(&nonce.to_be_bytes());
    Address::from_hash(&keccak256(&preimage))
}

/// Address the pair of `token_a` and `token_b` has (or will have) under
/// `registry`.  Argument order does not matter.
///
/// # Errors
///
/// - [`DexError::IdenticalAssets`] if the tokens are equal.
/// - [`DexError::ZeroAddress`] if either is the null account.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Address;
/// use hydra_dex::factory::pair_address;
///
/// let registry = Address::from_low_u64(0xfac);
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
/// assert_eq!(pair_address(registry, a, b), pair_address(registry, b, a));
/// ```
pub fn pair_address(registry: Address, token_a: Address, token_b: Address) -> Result<Address, DexError> {
    let tokens = TokenPair::new(token_a, token_b)?;
    Ok(pair_address_sorted(registry, &tokens))
}

pub(crate) fn pair_address_sorted(registry: Address, tokens: &TokenPair) -> Address {
    let salt = keccak256(&tokens.packed());
    create2_address(registry, &salt, &pair_code_hash())
}
