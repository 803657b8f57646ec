//! Wrapped native asset: a token ledger backed 1:1 by native balance held
//! at the ledger's own address.

use tracing::{debug, info};

use super::{LedgerKind, TokenLedger};
use crate::chain::{Chain, Event};
use crate::domain::{Address, Amount, Decimals};
use crate::error::{DexError, Result};

/// Name of every wrapped-native ledger.
pub const WRAPPED_NATIVE_NAME: &str = "Wrapped Native";

/// Symbol of every wrapped-native ledger.
pub const WRAPPED_NATIVE_SYMBOL: &str = "WNATIVE";

impl Chain {
    /// Deploys an empty wrapped-native ledger.
    ///
    /// # Errors
    ///
    /// Infallible today; returns `Result` like every other deployment.
    pub fn deploy_wrapped_native(&mut self, deployer: Address) -> Result<Address> {
        self.transact("deploy_wrapped_native", |chain| {
            let address = chain.next_address(deployer);
            let ledger = TokenLedger::new(
                address,
                WRAPPED_NATIVE_NAME,
                WRAPPED_NATIVE_SYMBOL,
                Decimals::STANDARD,
                LedgerKind::WrappedNative,
                chain.chain_id(),
            );
            chain.state_mut().tokens.insert(address, ledger);
            info!(%address, "wrapped native deployed");
            Ok(address)
        })
    }

    /// Wraps `value` of `caller`'s native balance.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownContract`] if `wrapped` is not a wrapped-native
    ///   ledger.
    /// - [`DexError::InsufficientBalance`] if `caller` lacks native value.
    pub fn deposit(&mut self, wrapped: Address, caller: Address, value: Amount) -> Result<()> {
        self.transact("deposit", |chain| chain.deposit_inner(wrapped, caller, value))
    }

    /// Unwraps `value` back into `caller`'s native balance.
    ///
    /// # Errors
    ///
    /// - [`DexError::UnknownContract`] if `wrapped` is not a wrapped-native
    ///   ledger.
    /// - [`DexError::InsufficientBalance`] if `caller` holds too few
    ///   wrapped tokens.
    pub fn withdraw(&mut self, wrapped: Address, caller: Address, value: Amount) -> Result<()> {
        self.transact("withdraw", |chain| chain.withdraw_inner(wrapped, caller, value))
    }

    pub(crate) fn deposit_inner(&mut self, wrapped: Address, caller: Address, value: Amount) -> Result<()> {
        self.wrapped_ledger(wrapped)?;
        self.transfer_native(caller, wrapped, value)?;
        self.ledger_mut(wrapped)?.mint(caller, value)?;
        self.emit(wrapped, Event::Deposit { owner: caller, value });
        debug!(%caller, %value, "native wrapped");
        Ok(())
    }

    pub(crate) fn withdraw_inner(&mut self, wrapped: Address, caller: Address, value: Amount) -> Result<()> {
        self.wrapped_ledger(wrapped)?;
        self.ledger_mut(wrapped)?.burn(caller, value)?;
        self.transfer_native(wrapped, caller, value)?;
        self.emit(wrapped, Event::Withdrawal { owner: caller, value });
        debug!(%caller, %value, "native unwrapped");
        Ok(())
    }

    pub(crate) fn wrapped_ledger(&self, wrapped: Address) -> Result<&TokenLedger> {
        let ledger = self.ledger(wrapped)?;
        if ledger.kind() != LedgerKind::WrappedNative {
            return Err(DexError::UnknownContract(wrapped));
        }
        Ok(ledger)
    }
}
