//! Integration tests exercising the exchange through its public API.
//!
//! These tests cover end-to-end flows: deployment and pair address
//! prediction, the liquidity lifecycle, multi-hop and native trading,
//! permit-based removal, flash swaps, the price oracle, and transaction
//! atomicity.

#![allow(clippy::panic)]

use ed25519_dalek::SigningKey;
use ethereum_types::U256;
use hydra_dex::chain::{CalleeContext, Chain};
use hydra_dex::config::{ChainConfig, RegistryConfig, TokenConfig};
use hydra_dex::domain::{Address, Amount, Decimals, FeeTier};
use hydra_dex::error::{DexError, Result};
use hydra_dex::factory::pair_address;
use hydra_dex::math::{get_amount_out, Uq112x112};
use hydra_dex::pair::MINIMUM_LIQUIDITY;
use hydra_dex::router::{
    AddLiquidity, AddLiquidityNative, PermitArgs, RemoveLiquidity, SwapExactIn, SwapExactOut,
};
use hydra_dex::token::{address_of, permit_digest, PermitSignature};
use hydra_dex::traits::{FlashSwapCall, FromConfig, SwapCallee};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn alice() -> Address {
    Address::from_low_u64(0xa11ce)
}

fn bob() -> Address {
    Address::from_low_u64(0xb0b)
}

fn e18(v: u64) -> Amount {
    Amount::new(U256::from(v) * U256::exp10(18))
}

struct Exchange {
    chain: Chain,
    registry: Address,
    wrapped: Address,
    router: Address,
}

fn exchange() -> Exchange {
    let Ok(config) = ChainConfig::new(31_337, 1_000) else {
        panic!("chain config");
    };
    let Ok(mut chain) = Chain::from_config(&config) else {
        panic!("chain");
    };
    let Ok(reg_cfg) = RegistryConfig::new(alice()) else {
        panic!("registry config");
    };
    let Ok(registry) = chain.deploy_registry(alice(), &reg_cfg) else {
        panic!("registry");
    };
    let Ok(wrapped) = chain.deploy_wrapped_native(alice()) else {
        panic!("wrapped");
    };
    let Ok(router) = chain.deploy_router(alice(), registry, wrapped) else {
        panic!("router");
    };
    let Ok(()) = chain.fund_native(alice(), e18(1_000)) else {
        panic!("native");
    };
    Exchange {
        chain,
        registry,
        wrapped,
        router,
    }
}

impl Exchange {
    /// Deploys a token held by alice and approves the router for all of it.
    fn token(&mut self, symbol: &str) -> Address {
        let Ok(cfg) = TokenConfig::new(symbol, symbol, Decimals::STANDARD, e18(1_000_000)) else {
            panic!("token config");
        };
        let Ok(token) = self.chain.deploy_token(alice(), &cfg, alice()) else {
            panic!("token");
        };
        let Ok(()) = self.chain.approve(token, alice(), self.router, Amount::MAX) else {
            panic!("approve");
        };
        token
    }

    fn add(&mut self, a: Address, b: Address, amount_a: Amount, amount_b: Amount) -> Amount {
        let req = AddLiquidity {
            token_a: a,
            token_b: b,
            amount_a_desired: amount_a,
            amount_b_desired: amount_b,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: alice(),
            deadline: u64::MAX,
        };
        let Ok((_, _, liquidity)) = self.chain.add_liquidity(self.router, alice(), &req) else {
            panic!("add liquidity");
        };
        liquidity
    }

    fn pair(&self, a: Address, b: Address) -> Address {
        let Ok(Some(pair)) = self.chain.get_pair(self.registry, a, b) else {
            panic!("pair exists");
        };
        pair
    }

    fn reserves(&self, pair: Address) -> (Amount, Amount, u32) {
        let Ok(engine) = self.chain.pair(pair) else {
            panic!("pair engine");
        };
        engine.reserves()
    }
}

// ===========================================================================
// Suite 1: Deployment and addressing
// ===========================================================================

#[test]
fn pair_address_is_predictable_and_order_independent() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    let Ok(predicted) = pair_address(ex.registry, b, a) else {
        panic!("derive");
    };
    let Ok(created) = ex.chain.create_pair(ex.registry, bob(), a, b) else {
        panic!("create");
    };
    assert_eq!(created, predicted);
    assert_eq!(ex.chain.get_pair(ex.registry, b, a), Ok(Some(created)));
    assert_eq!(ex.chain.create_pair(ex.registry, bob(), b, a), Err(DexError::PairExists));

    let Ok(registry) = ex.chain.registry(ex.registry) else {
        panic!("registry");
    };
    assert_eq!(registry.all_pairs_length(), 1);
    assert_eq!(registry.all_pairs(0), Some(created));
}

#[test]
fn chain_config_is_validated() {
    assert!(ChainConfig::new(0, 0).is_err());
    let ex = exchange();
    assert_eq!(ex.chain.chain_id(), 31_337);
    assert_eq!(ex.chain.timestamp(), 1_000);
}

// ===========================================================================
// Suite 2: Liquidity lifecycle
// ===========================================================================

#[test]
fn first_deposit_mints_geometric_mean_minus_minimum() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    let liquidity = ex.add(a, b, e18(1), e18(4));
    let pair = ex.pair(a, b);

    assert_eq!(liquidity.get(), e18(2).get() - MINIMUM_LIQUIDITY.get());
    assert_eq!(ex.chain.balance_of(pair, Address::ZERO), Ok(MINIMUM_LIQUIDITY));

    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let (r0, r1, _) = engine.reserves();
    let expected = if engine.token0() == a { (e18(1), e18(4)) } else { (e18(4), e18(1)) };
    assert_eq!((r0, r1), expected);

    // Sync then Mint close the deposit
    let names: Vec<_> = ex
        .chain
        .events()
        .emitted_by(pair)
        .map(|entry| entry.event.name())
        .collect();
    assert_eq!(names[names.len() - 2..], ["Sync", "Mint"]);
}

#[test]
fn add_then_remove_returns_deposit_minus_locked_share() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    let liquidity = ex.add(a, b, e18(9), e18(9));
    let pair = ex.pair(a, b);
    let Ok(()) = ex.chain.approve(pair, alice(), ex.router, liquidity) else {
        panic!("approve shares");
    };
    let Ok((amount_a, amount_b)) = ex.chain.remove_liquidity(
        ex.router,
        alice(),
        &RemoveLiquidity {
            token_a: a,
            token_b: b,
            liquidity,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: bob(),
            deadline: u64::MAX,
        },
    ) else {
        panic!("remove");
    };
    let expected = e18(9).get() - MINIMUM_LIQUIDITY.get();
    assert_eq!((amount_a.get(), amount_b.get()), (expected, expected));
    assert_eq!(ex.chain.balance_of(a, bob()), Ok(amount_a));
    assert_eq!(ex.chain.total_supply(pair), Ok(MINIMUM_LIQUIDITY));
}

// ===========================================================================
// Suite 3: Trading
// ===========================================================================

#[test]
fn direct_pair_swap_matches_reference_vector() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    ex.add(a, b, Amount::from(1_000_000u64), Amount::from(1_000_000u64));
    let pair = ex.pair(a, b);

    let expected = 10_000u64 * 9_970 * 1_000_000 / (1_000_000 * 10_000 + 10_000 * 9_970);
    let Ok(out) = get_amount_out(
        Amount::from(10_000u64),
        Amount::from(1_000_000u64),
        Amount::from(1_000_000u64),
        FeeTier::DEFAULT,
    ) else {
        panic!("quote");
    };
    assert_eq!(out, Amount::from(expected));

    let Ok(()) = ex.chain.transfer(a, alice(), pair, Amount::from(10_000u64)) else {
        panic!("pay in");
    };
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let (out0, out1) = if engine.token0() == a { (Amount::ZERO, out) } else { (out, Amount::ZERO) };
    let Ok(()) = ex.chain.swap(pair, alice(), out0, out1, bob(), &[]) else {
        panic!("swap");
    };
    assert_eq!(ex.chain.balance_of(b, bob()), Ok(out));
}

#[test]
fn three_hop_route_and_exact_output() {
    let mut ex = exchange();
    let (a, b, c, d) = (ex.token("A"), ex.token("B"), ex.token("C"), ex.token("D"));
    ex.add(a, b, e18(100), e18(200));
    ex.add(b, c, e18(200), e18(100));
    ex.add(c, d, e18(100), e18(100));

    let path = vec![a, b, c, d];
    let Ok(amounts) = ex.chain.swap_exact_tokens_for_tokens(
        ex.router,
        alice(),
        &SwapExactIn {
            amount_in: e18(1),
            amount_out_min: Amount::ONE,
            path: path.clone(),
            to: bob(),
            deadline: u64::MAX,
        },
    ) else {
        panic!("exact in");
    };
    assert_eq!(amounts.len(), 4);
    assert_eq!(ex.chain.balance_of(d, bob()), Ok(amounts[3]));

    let Ok(quoted) = ex.chain.get_amounts_in(ex.router, e18(1), &path) else {
        panic!("quote in");
    };
    let Ok(spent) = ex.chain.swap_tokens_for_exact_tokens(
        ex.router,
        alice(),
        &SwapExactOut {
            amount_out: e18(1),
            amount_in_max: quoted[0],
            path,
            to: bob(),
            deadline: u64::MAX,
        },
    ) else {
        panic!("exact out");
    };
    assert_eq!(spent, quoted);
    let Some(total) = amounts[3].checked_add(&e18(1)) else {
        panic!("add");
    };
    assert_eq!(ex.chain.balance_of(d, bob()), Ok(total));
}

#[test]
fn native_round_trip_through_router() {
    let mut ex = exchange();
    let token = ex.token("TKN");
    let req = AddLiquidityNative {
        token,
        amount_token_desired: e18(1_000),
        amount_token_min: Amount::ZERO,
        amount_native_min: Amount::ZERO,
        to: alice(),
        deadline: u64::MAX,
        value: e18(10),
    };
    let Ok(_) = ex.chain.add_liquidity_native(ex.router, alice(), &req) else {
        panic!("add native");
    };

    let Ok(bought) = ex.chain.swap_exact_native_for_tokens(
        ex.router,
        alice(),
        &SwapExactIn {
            amount_in: e18(1),
            amount_out_min: Amount::ZERO,
            path: vec![ex.wrapped, token],
            to: bob(),
            deadline: u64::MAX,
        },
    ) else {
        panic!("buy");
    };
    let Ok(()) = ex.chain.approve(token, bob(), ex.router, Amount::MAX) else {
        panic!("bob approves");
    };
    let Ok(sold) = ex.chain.swap_exact_tokens_for_native(
        ex.router,
        bob(),
        &SwapExactIn {
            amount_in: bought[1],
            amount_out_min: Amount::ZERO,
            path: vec![token, ex.wrapped],
            to: bob(),
            deadline: u64::MAX,
        },
    ) else {
        panic!("sell");
    };
    // two fees paid, so less comes back
    assert!(sold[1] < e18(1));
    assert_eq!(ex.chain.native_balance(bob()), sold[1]);
    assert_eq!(ex.chain.native_balance(ex.router), Amount::ZERO);
}

// ===========================================================================
// Suite 4: Permit
// ===========================================================================

#[test]
fn permit_removal_is_single_use() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    let key = SigningKey::from_bytes(&[42u8; 32]);
    let holder = address_of(&key.verifying_key());

    let liquidity = ex.add(a, b, e18(10), e18(10));
    let pair = ex.pair(a, b);
    let Ok(()) = ex.chain.transfer(pair, alice(), holder, liquidity) else {
        panic!("move shares");
    };
    let Ok(ledger) = ex.chain.ledger(pair) else {
        panic!("share ledger");
    };
    let separator = ledger.domain_separator();
    let half = Amount::new(liquidity.get() / 2u64);
    let deadline = 2_000;
    let router = ex.router;

    let remove = RemoveLiquidity {
        token_a: a,
        token_b: b,
        liquidity: half,
        amount_a_min: Amount::ZERO,
        amount_b_min: Amount::ZERO,
        to: holder,
        deadline,
    };
    let sign = |nonce: u64| PermitArgs {
        approve_max: false,
        signature: PermitSignature::sign(
            &key,
            &permit_digest(&separator, holder, router, half, nonce, deadline),
        ),
    };

    // wrong nonce
    assert_eq!(
        ex.chain.remove_liquidity_with_permit(router, holder, &remove, &sign(1)),
        Err(DexError::InvalidSignature)
    );
    let permit = sign(0);
    assert!(ex.chain.remove_liquidity_with_permit(router, holder, &remove, &permit).is_ok());
    assert_eq!(ex.chain.nonces(pair, holder), Ok(1));
    assert_eq!(
        ex.chain.remove_liquidity_with_permit(router, holder, &remove, &permit),
        Err(DexError::InvalidSignature)
    );

    let Ok(()) = ex.chain.set_timestamp(2_001) else {
        panic!("clock");
    };
    assert_eq!(
        ex.chain.permit(pair, holder, router, half, deadline, &sign(1).signature),
        Err(DexError::Expired)
    );
}

// ===========================================================================
// Suite 5: Flash swaps
// ===========================================================================

/// Borrows token0 and pays back a fixed amount of token1.
struct CrossRepay {
    token1: Address,
    repay: Amount,
}

impl SwapCallee for CrossRepay {
    fn on_flash_swap(&mut self, ctx: &mut CalleeContext<'_>, call: &FlashSwapCall<'_>) -> Result<()> {
        assert_eq!(call.data, b"loan");
        assert_eq!(ctx.address(), call.callee);
        assert_eq!(ctx.chain().balance_of(self.token1, call.callee), Ok(self.repay));
        ctx.transfer(self.token1, call.pair, self.repay)
    }
}

#[test]
fn flash_swap_repaid_in_other_token() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    ex.add(a, b, e18(100), e18(100));
    let pair = ex.pair(a, b);
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let (token0, token1) = (engine.token0(), engine.token1());

    let callee = ex.chain.deploy_callee(
        bob(),
        Box::new(CrossRepay {
            token1,
            repay: e18(2),
        }),
    );
    let Ok(()) = ex.chain.transfer(token1, alice(), callee, e18(2)) else {
        panic!("fund callee");
    };
    let Ok(()) = ex.chain.swap(pair, bob(), e18(1), Amount::ZERO, callee, b"loan") else {
        panic!("flash swap");
    };
    assert_eq!(ex.chain.balance_of(token0, callee), Ok(e18(1)));
    let (r0, r1, _) = ex.reserves(pair);
    assert_eq!((r0, r1), (e18(99), e18(102)));
}

// ===========================================================================
// Suite 6: Price oracle
// ===========================================================================

#[test]
fn twap_over_an_interval_matches_spot_when_price_is_flat() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    ex.add(a, b, e18(10), e18(40));
    let pair = ex.pair(a, b);

    let Ok(()) = ex.chain.sync(pair) else {
        panic!("sync");
    };
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let start = (engine.price0_cumulative_last(), engine.reserves().2);

    let Ok(()) = ex.chain.advance_time(3_600) else {
        panic!("clock");
    };
    let Ok(()) = ex.chain.sync(pair) else {
        panic!("sync");
    };
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let (r0, r1, now) = engine.reserves();
    let elapsed = now.wrapping_sub(start.1);
    assert_eq!(elapsed, 3_600);

    let Ok(average) = engine.price0_cumulative_last().average_since(start.0, elapsed) else {
        panic!("average");
    };
    let Ok(spot) = Uq112x112::ratio(r1, r0) else {
        panic!("spot");
    };
    assert_eq!(average, spot);
}

// ===========================================================================
// Suite 7: Atomicity
// ===========================================================================

#[test]
fn failed_router_call_leaves_no_trace() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    ex.add(a, b, e18(10), e18(10));
    let pair = ex.pair(a, b);

    let log_len = ex.chain.events().len();
    let reserves = ex.reserves(pair);
    let (Ok(bal_a), Ok(bal_b)) = (ex.chain.balance_of(a, alice()), ex.chain.balance_of(b, alice())) else {
        panic!("balances");
    };

    // pays in, swaps, then fails the output bound
    let result = ex.chain.swap_exact_tokens_for_tokens(
        ex.router,
        alice(),
        &SwapExactIn {
            amount_in: e18(1),
            amount_out_min: e18(1),
            path: vec![a, b],
            to: alice(),
            deadline: u64::MAX,
        },
    );
    assert_eq!(result, Err(DexError::InsufficientOutputAmount));
    assert_eq!(ex.chain.events().len(), log_len);
    assert_eq!(ex.reserves(pair), reserves);
    assert_eq!(ex.chain.balance_of(a, alice()), Ok(bal_a));
    assert_eq!(ex.chain.balance_of(b, alice()), Ok(bal_b));
}

fn treasury() -> Address {
    Address::from_low_u64(0x7ea5)
}

/// Deposits 1000/1000, swaps 1 token1 in for token0 out, then withdraws
/// every share alice holds.  `fee_during` decides whether the fee is on
/// while the swap and the withdrawal happen; it is always on for the
/// deposit so that `k_last` starts out recorded.
fn fee_round_trip(ex: &mut Exchange, fee_during: bool) -> Address {
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    let Ok(()) = ex.chain.set_fee_to(ex.registry, alice(), treasury()) else {
        panic!("fee on");
    };
    let liquidity = ex.add(a, b, e18(1_000), e18(1_000));
    assert_eq!(liquidity.checked_add(&MINIMUM_LIQUIDITY), Some(e18(1_000)));
    if !fee_during {
        let Ok(()) = ex.chain.set_fee_to(ex.registry, alice(), Address::ZERO) else {
            panic!("fee off");
        };
    }
    let pair = ex.pair(a, b);
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let token1 = engine.token1();

    let out = Amount::from(996_006_981_039_903_216u64);
    let (Ok(()), Ok(())) = (
        ex.chain.transfer(token1, alice(), pair, e18(1)),
        ex.chain.swap(pair, alice(), out, Amount::ZERO, alice(), &[]),
    ) else {
        panic!("swap");
    };
    assert_eq!(ex.chain.balance_of(pair, treasury()), Ok(Amount::ZERO));

    let (Ok(()), Ok(_)) = (
        ex.chain.transfer(pair, alice(), pair, liquidity),
        ex.chain.burn(pair, alice(), alice()),
    ) else {
        panic!("burn");
    };
    pair
}

#[test]
fn protocol_fee_mints_one_sixth_of_growth() {
    let mut ex = exchange();
    let pair = fee_round_trip(&mut ex, true);
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    let (token0, token1) = (engine.token0(), engine.token1());

    let cut = Amount::from(249_750_499_251_388u64);
    assert_eq!(ex.chain.balance_of(pair, treasury()), Ok(cut));
    assert_eq!(
        ex.chain.total_supply(pair),
        Ok(Amount::from(1_000u64 + 249_750_499_251_388u64))
    );
    assert_eq!(
        ex.chain.balance_of(token0, pair),
        Ok(Amount::from(1_000u64 + 249_501_683_697_445u64))
    );
    assert_eq!(
        ex.chain.balance_of(token1, pair),
        Ok(Amount::from(1_000u64 + 250_000_187_312_969u64))
    );
    let (r0, r1, _) = ex.reserves(pair);
    assert_eq!(engine.k_last(), Amount::new(r0.get() * r1.get()));
}

#[test]
fn protocol_fee_off_mints_nothing_and_clears_k_last() {
    let mut ex = exchange();
    let pair = fee_round_trip(&mut ex, false);
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    assert_eq!(ex.chain.balance_of(pair, treasury()), Ok(Amount::ZERO));
    assert_eq!(ex.chain.total_supply(pair), Ok(MINIMUM_LIQUIDITY));
    assert_eq!(engine.k_last(), Amount::ZERO);
}

#[test]
fn protocol_fee_never_enabled_leaves_k_last_unset() {
    let mut ex = exchange();
    let (a, b) = (ex.token("AAA"), ex.token("BBB"));
    ex.add(a, b, e18(100), e18(100));
    let pair = ex.pair(a, b);
    let Ok(engine) = ex.chain.pair(pair) else {
        panic!("engine");
    };
    assert_eq!(engine.k_last(), Amount::ZERO);
    assert_eq!(ex.chain.balance_of(pair, treasury()), Ok(Amount::ZERO));
}
