//! # Hydra DEX
//!
//! Constant-product token exchange running on an in-process, transactional
//! ledger: a pair registry, AMM pair engines with flash swaps and a TWAP
//! oracle, permit-enabled token ledgers and a multi-hop router.
//!
//! Every state-changing entry point is a method on [`Chain`](chain::Chain)
//! and runs atomically: on error the whole world state, event log
//! included, is restored to what it was before the call.
//!
//! # Quick Start
//!
//! ## Deploy, provide liquidity and swap
//!
//! ```rust
//! use hydra_dex::chain::Chain;
//! use hydra_dex::config::{RegistryConfig, TokenConfig};
//! use hydra_dex::domain::{Address, Amount, Decimals};
//! use hydra_dex::router::{AddLiquidity, SwapExactIn};
//!
//! let alice = Address::from_low_u64(0xa11ce);
//! let bob = Address::from_low_u64(0xb0b);
//! let mut chain = Chain::default();
//!
//! // 1. Core contracts
//! let registry = chain
//!     .deploy_registry(alice, &RegistryConfig::new(alice).expect("valid config"))
//!     .expect("registry");
//! let wrapped = chain.deploy_wrapped_native(alice).expect("wrapped native");
//! let router = chain.deploy_router(alice, registry, wrapped).expect("router");
//!
//! // 2. Two tokens, both approved to the router
//! let supply = Amount::from(1_000_000_000u64);
//! let mut tokens = Vec::new();
//! for symbol in ["USDX", "WETHX"] {
//!     let cfg = TokenConfig::new(symbol, symbol, Decimals::STANDARD, supply).expect("valid");
//!     let token = chain.deploy_token(alice, &cfg, alice).expect("token");
//!     chain.approve(token, alice, router, Amount::MAX).expect("approve");
//!     tokens.push(token);
//! }
//!
//! // 3. Provide liquidity; the pair is created on first use
//! let (_, _, shares) = chain
//!     .add_liquidity(router, alice, &AddLiquidity {
//!         token_a: tokens[0],
//!         token_b: tokens[1],
//!         amount_a_desired: Amount::from(1_000_000u64),
//!         amount_b_desired: Amount::from(1_000_000u64),
//!         amount_a_min: Amount::ZERO,
//!         amount_b_min: Amount::ZERO,
//!         to: alice,
//!         deadline: u64::MAX,
//!     })
//!     .expect("liquidity added");
//! assert!(!shares.is_zero());
//!
//! // 4. Swap, paying bob
//! let amounts = chain
//!     .swap_exact_tokens_for_tokens(router, alice, &SwapExactIn {
//!         amount_in: Amount::from(10_000u64),
//!         amount_out_min: Amount::ONE,
//!         path: vec![tokens[0], tokens[1]],
//!         to: bob,
//!         deadline: u64::MAX,
//!     })
//!     .expect("swapped");
//! assert_eq!(chain.balance_of(tokens[1], bob), Ok(amounts[1]));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Router     │  path maths, slippage and deadline checks, native wrap
//! └──────┬──────┘
//!        │ create_pair / mint / burn / swap
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one pair per token pair, create2-style addresses
//! └──────┬──────┘
//!        │ shell + initialize
//!        ▼
//! ┌─────────────┐
//! │ Pair engine  │  reserves, invariant, TWAP, protocol fee, lock
//! └──────┬──────┘
//!        │ transfer
//!        ▼
//! ┌─────────────┐
//! │   Ledgers    │  balances, allowances, permit, wrapped native
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`chain`] | World state, transactions, native balances, event log |
//! | [`token`] | [`TokenLedger`](token::TokenLedger), permit signatures, wrapped native |
//! | [`pair`] | [`PairEngine`](pair::PairEngine) and its mint/burn/swap/skim/sync operations |
//! | [`factory`] | [`PairRegistry`](factory::PairRegistry) and pair address derivation |
//! | [`router`] | [`Router`](router::Router) liquidity and swap entry points |
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Address`](domain::Address), [`FeeTier`](domain::FeeTier), etc. |
//! | [`math`] | Checked arithmetic, pricing library, `UQ112x112` fixed point |
//! | [`config`] | Validated blueprints for chains, tokens and registries |
//! | [`traits`] | [`FromConfig`](traits::FromConfig) and the flash-swap [`SwapCallee`](traits::SwapCallee) |
//! | [`abi`] | Keccak-256 and 32-byte word encoding |
//! | [`error`] | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod abi;
pub mod chain;
pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod math;
pub mod pair;
pub mod prelude;
pub mod router;
pub mod token;
pub mod traits;
