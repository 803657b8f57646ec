//! Snapshot-able world state.

use std::collections::BTreeMap;

use super::EventLog;
use crate::domain::{Address, Amount};
use crate::factory::PairRegistry;
use crate::pair::PairEngine;
use crate::router::Router;
use crate::token::TokenLedger;

/// Block-level environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BlockEnv {
    pub(crate) chain_id: u64,
    pub(crate) timestamp: u64,
}

/// Everything a transaction can change.
///
/// Cloned before each transaction and restored on failure.
#[derive(Debug, Clone)]
pub(crate) struct WorldState {
    pub(crate) block: BlockEnv,
    pub(crate) tokens: BTreeMap<Address, TokenLedger>,
    pub(crate) pairs: BTreeMap<Address, PairEngine>,
    pub(crate) registries: BTreeMap<Address, PairRegistry>,
    pub(crate) routers: BTreeMap<Address, Router>,
    pub(crate) native: BTreeMap<Address, Amount>,
    pub(crate) deploy_nonces: BTreeMap<Address, u64>,
    pub(crate) events: EventLog,
}

impl WorldState {
    pub(crate) fn new(chain_id: u64, timestamp: u64) -> Self {
        Self {
            block: BlockEnv {
                chain_id,
                timestamp,
            },
            tokens: BTreeMap::new(),
            pairs: BTreeMap::new(),
            registries: BTreeMap::new(),
            routers: BTreeMap::new(),
            native: BTreeMap::new(),
            deploy_nonces: BTreeMap::new(),
            events: EventLog::default(),
        }
    }

    /// `true` if any contract lives at `address`.
    pub(crate) fn is_contract(&self, address: Address) -> bool {
        self.tokens.contains_key(&address)
            || self.pairs.contains_key(&address)
            || self.registries.contains_key(&address)
            || self.routers.contains_key(&address)
    }
}
