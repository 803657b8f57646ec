//! Trait seams of the exchange.
//!
//! [`FromConfig`] builds live objects from validated blueprints and
//! [`SwapCallee`] is the flash-swap callback a pair hands control to
//! mid-swap.

mod from_config;
mod swap_callee;

pub use from_config::FromConfig;
pub use swap_callee::{FlashSwapCall, SwapCallee};
