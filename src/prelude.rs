//! Convenience re-exports for common types and traits.
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

pub use crate::domain::{Address, Amount, BasisPoints, Decimals, FeeTier, TokenPair};

pub use crate::traits::{FlashSwapCall, FromConfig, SwapCallee};

pub use crate::math::{get_amount_in, get_amount_out, quote, CheckedArithmetic};

pub use crate::config::{ChainConfig, RegistryConfig, TokenConfig};

pub use crate::error::{DexError, Result};

pub use crate::chain::{CalleeContext, Chain, Event, LogEntry};

pub use crate::factory::{pair_address, PairRegistry};

pub use crate::pair::{PairEngine, MINIMUM_LIQUIDITY};

pub use crate::router::{
    AddLiquidity, AddLiquidityNative, PermitArgs, RemoveLiquidity, RemoveLiquidityNative, Router,
    SwapExactIn, SwapExactOut,
};

pub use crate::token::{PermitSignature, TokenLedger};
