//! Declarative, validated blueprints for deploying the exchange.
//!
//! Each struct validates in its constructor, so a value that exists is a
//! value that can be deployed.  Construction of live objects from a
//! blueprint goes through [`FromConfig`](crate::traits::FromConfig) or the
//! `deploy_*` methods on [`Chain`](crate::chain::Chain).

mod chain;
mod registry;
mod token;

pub use chain::ChainConfig;
pub use registry::{RegistryConfig, DEFAULT_PROTOCOL_FEE_SHARE};
pub use token::TokenConfig;
