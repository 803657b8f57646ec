//! Typed-data digests and Ed25519 delegated-approval signatures.
//!
//! A permit authorises `spender` to move `value` of `owner`'s balance
//! without `owner` submitting a transaction.  The signed message is
//!
//! ```text
//! keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖
//!           keccak256(PERMIT_TYPEHASH ‖ owner ‖ spender ‖ value ‖ nonce ‖ deadline))
//! ```
//!
//! where every field is a 32-byte big-endian word.  The domain separator
//! binds ledger name, version, chain id and ledger address, so a signature
//! is only ever valid on the ledger and chain it was made for.

use ed25519_dalek::{Signature, Signer, SigningKey, VerifyingKey};

use crate::abi::{keccak256, u64_word, WordEncoder};
use crate::domain::{Address, Amount};
use crate::error::DexError;

/// Domain type string.
pub const EIP712_DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Permit type string.
pub const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// Version hashed into every domain separator.
pub const DOMAIN_VERSION: &str = "1";

/// `keccak256(PERMIT_TYPE)`.
#[must_use]
pub fn permit_typehash() -> [u8; 32] {
    keccak256(PERMIT_TYPE.as_bytes())
}

/// Domain separator of the ledger `name` at `verifying_contract`.
#[must_use]
pub fn domain_separator(name: &str, chain_id: u64, verifying_contract: Address) -> [u8; 32] {
    WordEncoder::new()
        .word(keccak256(EIP712_DOMAIN_TYPE.as_bytes()))
        .word(keccak256(name.as_bytes()))
        .word(keccak256(DOMAIN_VERSION.as_bytes()))
        .word(u64_word(chain_id))
        .word(verifying_contract.to_word())
        .hash()
}

/// Digest a permit signer signs.
#[must_use]
pub fn permit_digest(
    domain_separator: &[u8; 32],
    owner: Address,
    spender: Address,
    value: Amount,
    nonce: u64,
    deadline: u64,
) -> [u8; 32] {
    let struct_hash = WordEncoder::new()
        .word(permit_typehash())
        .word(owner.to_word())
        .word(spender.to_word())
        .word(value.to_word())
        .word(u64_word(nonce))
        .word(u64_word(deadline))
        .hash();
    let mut preimage = [0u8; 66];
    preimage[0] = 0x19;
    preimage[1] = 0x01;
    preimage[2..34].copy_from_slice(domain_separator);
    preimage[34..].copy_from_slice(&struct_hash);
    keccak256(&preimage)
}

/// Account address controlled by an Ed25519 key: the last 20 bytes of
/// `keccak256(public_key)`.
#[must_use]
pub fn address_of(key: &VerifyingKey) -> Address {
    Address::from_hash(&keccak256(key.as_bytes()))
}

/// A signature plus the public key it claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermitSignature {
    public_key: [u8; 32],
    signature: [u8; 64],
}

impl PermitSignature {
    /// Assembles a signature from raw parts.
    #[must_use]
    pub const fn new(public_key: [u8; 32], signature: [u8; 64]) -> Self {
        Self {
            public_key,
            signature,
        }
    }

    /// Signs `digest` with `key`.
    #[must_use]
    pub fn sign(key: &SigningKey, digest: &[u8; 32]) -> Self {
        Self {
            public_key: key.verifying_key().to_bytes(),
            signature: key.sign(digest).to_bytes(),
        }
    }

    /// Claimed public key.
    #[must_use]
    pub const fn public_key(&self) -> [u8; 32] {
        self.public_key
    }

    /// Raw signature bytes.
    #[must_use]
    pub const fn signature(&self) -> [u8; 64] {
        self.signature
    }

    /// Address derived from the claimed public key.
    #[must_use]
    pub fn signer(&self) -> Address {
        Address::from_hash(&keccak256(&self.public_key))
    }

    /// Checks that this signature was produced by `owner` over `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidSignature`] if the key does not belong to
    /// `owner`, is not a valid curve point, or the signature does not
    /// verify.
    pub fn verify(&self, owner: Address, digest: &[u8; 32]) -> Result<(), DexError> {
        if owner.is_zero() || self.signer() != owner {
            return Err(DexError::InvalidSignature);
        }
        let key =
            VerifyingKey::from_bytes(&self.public_key).map_err(|_| DexError::InvalidSignature)?;
        let signature = Signature::from_bytes(&self.signature);
        key.verify_strict(digest, &signature)
            .map_err(|_| DexError::InvalidSignature)
    }
}
