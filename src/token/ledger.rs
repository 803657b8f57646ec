//! Balance, allowance and nonce bookkeeping for one fungible token.

use std::collections::BTreeMap;

use super::permit::{domain_separator, permit_digest, PermitSignature};
use crate::chain::Event;
use crate::domain::{Address, Amount, Decimals};
use crate::error::{DexError, Result};
use crate::math::CheckedArithmetic;

/// What a ledger is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LedgerKind {
    /// Ordinary token deployed by an account.
    Standard,
    /// 1:1 wrapper around the native asset.
    WrappedNative,
    /// Liquidity shares of a pair; lives at the pair's address.
    LiquidityShare,
}

/// State of one token ledger.
///
/// Operations here are pure bookkeeping: they check, mutate and return
/// the event to emit.  Atomicity and event emission are the caller's
/// job (see [`Chain`](crate::chain::Chain)).  Every failing operation
/// leaves the ledger untouched.
///
/// # Invariants
///
/// - The sum of all balances equals `total_supply`.
/// - An allowance of [`Amount::MAX`] is never decremented.
/// - A nonce only ever increases, by exactly one per accepted permit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenLedger {
    address: Address,
    name: String,
    symbol: String,
    decimals: Decimals,
    kind: LedgerKind,
    total_supply: Amount,
    balances: BTreeMap<Address, Amount>,
    allowances: BTreeMap<(Address, Address), Amount>,
    nonces: BTreeMap<Address, u64>,
    domain_separator: [u8; 32],
}

impl TokenLedger {
    /// Empty ledger at `address` on chain `chain_id`.
    #[must_use]
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: Decimals,
        kind: LedgerKind,
        chain_id: u64,
    ) -> Self {
        let name = name.into();
        let domain_separator = domain_separator(&name, chain_id, address);
        Self {
            address,
            name,
            symbol: symbol.into(),
            decimals,
            kind,
            total_supply: Amount::ZERO,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
            nonces: BTreeMap::new(),
            domain_separator,
        }
    }

    // -- Views ----------------------------------------------------------------

    /// Ledger address; the `verifyingContract` of its permits.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Display precision.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// What the ledger is used for.
    #[must_use]
    pub const fn kind(&self) -> LedgerKind {
        self.kind
    }

    /// Sum of all balances.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Balance of `account`; zero if it never held any.
    pub fn balance_of(&self, account: Address) -> Amount {
        self.balances.get(&account).copied().unwrap_or_default()
    }

    /// Amount `spender` may still move from `owner`.
    pub fn allowance(&self, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Next permit nonce of `owner`.
    #[must_use]
    pub fn nonces(&self, owner: Address) -> u64 {
        self.nonces.get(&owner).copied().unwrap_or_default()
    }

    /// Domain separator bound into this ledger's permits.
    #[must_use]
    pub const fn domain_separator(&self) -> [u8; 32] {
        self.domain_separator
    }

    // -- Supply ---------------------------------------------------------------

    pub(crate) fn mint(&mut self, to: Address, value: Amount) -> Result<Event> {
        let supply = self.total_supply.safe_add(&value)?;
        let balance = self.balance_of(to).safe_add(&value)?;
        self.total_supply = supply;
        self.balances.insert(to, balance);
        Ok(Event::Transfer {
            from: Address::ZERO,
            to,
            value,
        })
    }

    pub(crate) fn burn(&mut self, from: Address, value: Amount) -> Result<Event> {
        let balance = self
            .balance_of(from)
            .checked_sub(&value)
            .ok_or(DexError::InsufficientBalance)?;
        let supply = self.total_supply.safe_sub(&value)?;
        self.balances.insert(from, balance);
        self.total_supply = supply;
        Ok(Event::Transfer {
            from,
            to: Address::ZERO,
            value,
        })
    }

    // -- Transfers and approvals ----------------------------------------------

    /// Moves `value` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less than
    /// `value`.
    pub fn transfer(&mut self, from: Address, to: Address, value: Amount) -> Result<Event> {
        let debited = self
            .balance_of(from)
            .checked_sub(&value)
            .ok_or(DexError::InsufficientBalance)?;
        self.balances.insert(from, debited);
        // cannot overflow: the sum of balances is the total supply
        let credited = self.balance_of(to).safe_add(&value)?;
        self.balances.insert(to, credited);
        Ok(Event::Transfer { from, to, value })
    }

    /// Sets the allowance of `spender` over `owner`'s balance.
    pub fn approve(&mut self, owner: Address, spender: Address, value: Amount) -> Event {
        self.allowances.insert((owner, spender), value);
        Event::Approval {
            owner,
            spender,
            value,
        }
    }

    /// Moves `value` from `from` to `to` on behalf of `spender`.
    ///
    /// An allowance of [`Amount::MAX`] is treated as unlimited and left
    /// as is.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if the allowance is too small.
    /// - [`DexError::InsufficientBalance`] if `from` holds less than `value`.
    pub fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<Event> {
        let allowance = self.allowance(from, spender);
        let remaining = if allowance == Amount::MAX {
            None
        } else {
            Some(
                allowance
                    .checked_sub(&value)
                    .ok_or(DexError::InsufficientAllowance)?,
            )
        };
        if self.balance_of(from) < value {
            return Err(DexError::InsufficientBalance);
        }
        if let Some(remaining) = remaining {
            self.allowances.insert((from, spender), remaining);
        }
        self.transfer(from, to, value)
    }

    /// Grants an allowance on the strength of `owner`'s signature.
    ///
    /// Checks the deadline first, then rebuilds the digest with the
    /// owner's current nonce and verifies `signature` against it.  On
    /// success the nonce advances by one, so the same signature can never
    /// be used again.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] if `now > deadline`.
    /// - [`DexError::InvalidSignature`] if the signature does not belong to
    ///   `owner` or was made for different terms, ledger, chain or nonce.
    pub fn permit(
        &mut self,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: u64,
        signature: &PermitSignature,
        now: u64,
    ) -> Result<Event> {
        if now > deadline {
            return Err(DexError::Expired);
        }
        let nonce = self.nonces(owner);
        let digest = permit_digest(&self.domain_separator, owner, spender, value, nonce, deadline);
        signature.verify(owner, &digest)?;
        let next = nonce.checked_add(1).ok_or(DexError::Overflow("permit nonce"))?;
        self.nonces.insert(owner, next);
        Ok(self.approve(owner, spender, value))
    }
}
