//! Fungible token ledgers with permit-style delegated approval.
//!
//! [`TokenLedger`] holds the bookkeeping for one token.  The methods on
//! [`Chain`] below are the transaction entry points: each runs atomically
//! and appends the ledger's events to the log.

mod ledger;
mod permit;
mod wrapped;

pub use ledger::{LedgerKind, TokenLedger};
pub use permit::{
    address_of, domain_separator, permit_digest, permit_typehash, PermitSignature,
    DOMAIN_VERSION, EIP712_DOMAIN_TYPE, PERMIT_TYPE,
};
pub use wrapped::{WRAPPED_NATIVE_NAME, WRAPPED_NATIVE_SYMBOL};

use tracing::info;

use crate::chain::Chain;
use crate::config::TokenConfig;
use crate::domain::{Address, Amount};
use crate::error::Result;

impl Chain {
    /// Deploys a standard token and mints its initial supply to `holder`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`](crate::error::DexError::InvalidConfiguration)
    /// if `config` does not validate.
    pub fn deploy_token(
        &mut self,
        deployer: Address,
        config: &TokenConfig,
        holder: Address,
    ) -> Result<Address> {
        config.validate()?;
        self.transact("deploy_token", |chain| {
            let address = chain.next_address(deployer);
            let mut ledger = TokenLedger::new(
                address,
                config.name(),
                config.symbol(),
                config.decimals(),
                LedgerKind::Standard,
                chain.chain_id(),
            );
            let minted = if config.initial_supply().is_zero() {
                None
            } else {
                Some(ledger.mint(holder, config.initial_supply())?)
            };
            chain.state_mut().tokens.insert(address, ledger);
            if let Some(event) = minted {
                chain.emit(address, event);
            }
            info!(%address, symbol = config.symbol(), supply = %config.initial_supply(), "token deployed");
            Ok(address)
        })
    }

    // -- Views ----------------------------------------------------------------

    /// Total supply of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`](crate::error::DexError::UnknownContract)
    /// if no ledger lives at `token`.
    pub fn total_supply(&self, token: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.total_supply())
    }

    /// Balance of `account` in `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`](crate::error::DexError::UnknownContract)
    /// if no ledger lives at `token`.
    pub fn balance_of(&self, token: Address, account: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.balance_of(account))
    }

    /// Allowance of `spender` over `owner`'s `token` balance.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`](crate::error::DexError::UnknownContract)
    /// if no ledger lives at `token`.
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> Result<Amount> {
        Ok(self.ledger(token)?.allowance(owner, spender))
    }

    /// Next permit nonce of `owner` on `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::UnknownContract`](crate::error::DexError::UnknownContract)
    /// if no ledger lives at `token`.
    pub fn nonces(&self, token: Address, owner: Address) -> Result<u64> {
        Ok(self.ledger(token)?.nonces(owner))
    }

    // -- Transactions ---------------------------------------------------------

    /// `from` sends `value` of `token` to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    /// or [`DexError::UnknownContract`](crate::error::DexError::UnknownContract).
    pub fn transfer(&mut self, token: Address, from: Address, to: Address, value: Amount) -> Result<()> {
        self.transact("transfer", |chain| chain.transfer_inner(token, from, to, value))
    }

    /// `owner` lets `spender` move up to `value` of its `token`.
    ///
    /// # Errors
    ///
    /// [`DexError::UnknownContract`](crate::error::DexError::UnknownContract).
    pub fn approve(&mut self, token: Address, owner: Address, spender: Address, value: Amount) -> Result<()> {
        self.transact("approve", |chain| {
            let event = chain.ledger_mut(token)?.approve(owner, spender, value);
            chain.emit(token, event);
            Ok(())
        })
    }

    /// `spender` moves `value` of `from`'s `token` to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientAllowance`](crate::error::DexError::InsufficientAllowance),
    /// [`DexError::InsufficientBalance`](crate::error::DexError::InsufficientBalance)
    /// or [`DexError::UnknownContract`](crate::error::DexError::UnknownContract).
    pub fn transfer_from(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        self.transact("transfer_from", |chain| {
            chain.transfer_from_inner(token, spender, from, to, value)
        })
    }

    /// Applies a signed approval of `owner` for `spender`.
    ///
    /// Anyone may submit it; only the signature matters.
    ///
    /// # Errors
    ///
    /// [`DexError::Expired`](crate::error::DexError::Expired),
    /// [`DexError::InvalidSignature`](crate::error::DexError::InvalidSignature)
    /// or [`DexError::UnknownContract`](crate::error::DexError::UnknownContract).
    pub fn permit(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: u64,
        signature: &PermitSignature,
    ) -> Result<()> {
        self.transact("permit", |chain| {
            chain.permit_inner(token, owner, spender, value, deadline, signature)
        })
    }

    pub(crate) fn transfer_inner(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        let event = self.ledger_mut(token)?.transfer(from, to, value)?;
        self.emit(token, event);
        Ok(())
    }

    pub(crate) fn transfer_from_inner(
        &mut self,
        token: Address,
        spender: Address,
        from: Address,
        to: Address,
        value: Amount,
    ) -> Result<()> {
        let event = self.ledger_mut(token)?.transfer_from(spender, from, to, value)?;
        self.emit(token, event);
        Ok(())
    }

    pub(crate) fn permit_inner(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        value: Amount,
        deadline: u64,
        signature: &PermitSignature,
    ) -> Result<()> {
        let now = self.timestamp();
        let event = self
            .ledger_mut(token)?
            .permit(owner, spender, value, deadline, signature, now)?;
        self.emit(token, event);
        Ok(())
    }
}
