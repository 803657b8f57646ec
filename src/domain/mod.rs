//! Value types shared by every component of the exchange.
//!
//! Addresses, 256-bit amounts, fee percentages and the canonical token
//! pair.  Constructors validate their invariants so the engines can rely
//! on them without re-checking.

mod address;
mod amount;
mod basis_points;
mod decimals;
mod fee_tier;
mod token_pair;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::{BasisPoints, BPS_DENOMINATOR};
pub use decimals::Decimals;
pub use fee_tier::FeeTier;
pub use token_pair::TokenPair;
