//! Property-based tests for the pair engine.
//!
//! 1. **Invariant growth**: `reserve0 × reserve1` never shrinks across a swap.
//! 2. **Swap reversibility**: a round trip A→B→A returns no more than it cost.
//! 3. **Mint proportionality**: later deposits never dilute earlier holders.
//! 4. **Failed swaps are inert**: a K violation leaves reserves, balances
//!    and the event log exactly as they were.
//! 5. **Burn conservation**: removing all liquidity returns no more than
//!    was deposited.

use ethereum_types::U256;
use proptest::prelude::*;

use super::fixtures::{owner, world, World};
use crate::domain::{Address, Amount, FeeTier};
use crate::math::get_amount_out;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn trader() -> Address {
    Address::from_low_u64(0x7ade)
}

fn seeded(r0: u64, r1: u64) -> World {
    let mut w = world();
    w.add_liquidity(Amount::from(r0), Amount::from(r1));
    w
}

fn reserves(w: &World) -> (Amount, Amount) {
    match w.chain.pair(w.pair) {
        Ok(engine) => {
            let (r0, r1, _) = engine.reserves();
            (r0, r1)
        }
        Err(_) => (Amount::ZERO, Amount::ZERO),
    }
}

/// Pays `amount_in` of token0 (or token1) into the pair and takes the
/// quoted output.  Returns the output, or `None` if the quote or swap fails.
fn swap_exact_in(w: &mut World, zero_for_one: bool, amount_in: Amount, to: Address) -> Option<Amount> {
    let (r0, r1) = reserves(w);
    let (token_in, r_in, r_out) = if zero_for_one {
        (w.token0, r0, r1)
    } else {
        (w.token1, r1, r0)
    };
    let out = get_amount_out(amount_in, r_in, r_out, FeeTier::DEFAULT).ok()?;
    let payer = if w.chain.balance_of(token_in, to).ok()? >= amount_in { to } else { owner() };
    w.chain.transfer(token_in, payer, w.pair, amount_in).ok()?;
    let (out0, out1) = if zero_for_one {
        (Amount::ZERO, out)
    } else {
        (out, Amount::ZERO)
    };
    w.chain.swap(w.pair, payer, out0, out1, to, &[]).ok()?;
    Some(out)
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserves in [10_000, 10^15], clear of the minimum-liquidity floor.
fn reserve_strategy() -> impl Strategy<Value = u64> {
    10_000u64..=1_000_000_000_000_000u64
}

/// Swap input as a fraction of the input reserve, in per-mille.
fn fraction_strategy() -> impl Strategy<Value = u64> {
    1u64..=500u64
}

// ---------------------------------------------------------------------------
// Property 1: Invariant growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_never_shrinks_invariant(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        permille in fraction_strategy(),
        zero_for_one in any::<bool>(),
    ) {
        let mut w = seeded(r0, r1);
        let reserve_in = if zero_for_one { r0 } else { r1 };
        let amount_in = Amount::from((reserve_in / 1_000 * permille).max(1));
        let (b0, b1) = reserves(&w);
        let before = b0.get().full_mul(b1.get());

        if swap_exact_in(&mut w, zero_for_one, amount_in, trader()).is_none() {
            return Ok(());
        }
        let (a0, a1) = reserves(&w);
        prop_assert!(a0.get().full_mul(a1.get()) >= before);
    }
}

// ---------------------------------------------------------------------------
// Property 2: Swap reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_round_trip_loses_value(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        permille in fraction_strategy(),
    ) {
        let mut w = seeded(r0, r1);
        let amount_in = Amount::from((r0 / 1_000 * permille).max(1));

        let Some(received) = swap_exact_in(&mut w, true, amount_in, trader()) else {
            return Ok(());
        };
        if received.is_zero() {
            return Ok(());
        }
        let Some(back) = swap_exact_in(&mut w, false, received, trader()) else {
            return Ok(());
        };
        prop_assert!(back <= amount_in, "round trip gained: {} > {}", back, amount_in);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Mint proportionality
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_never_dilutes(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        d0 in reserve_strategy(),
        d1 in reserve_strategy(),
    ) {
        let mut w = seeded(r0, r1);
        let Ok(supply_before) = w.chain.total_supply(w.pair) else {
            return Ok(());
        };
        let (pair, t0, t1) = (w.pair, w.token0, w.token1);
        let (Ok(()), Ok(())) = (
            w.chain.transfer(t0, owner(), pair, Amount::from(d0)),
            w.chain.transfer(t1, owner(), pair, Amount::from(d1)),
        ) else {
            return Ok(());
        };
        let Ok(minted) = w.chain.mint(pair, owner(), trader()) else {
            return Ok(());
        };

        // minted / supply_before <= d_i / r_i on both sides
        let supply = supply_before.get();
        prop_assert!(minted.get() * U256::from(r0) <= U256::from(d0) * supply);
        prop_assert!(minted.get() * U256::from(r1) <= U256::from(d1) * supply);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Failed swaps are inert
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_k_violation_changes_nothing(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        permille in fraction_strategy(),
    ) {
        let mut w = seeded(r0, r1);
        let amount_in = Amount::from((r0 / 1_000 * permille).max(1));
        let Ok(out) = get_amount_out(amount_in, Amount::from(r0), Amount::from(r1), FeeTier::DEFAULT) else {
            return Ok(());
        };
        let Some(greedy) = out.checked_add(&Amount::ONE) else {
            return Ok(());
        };
        let (pair, t0, t1) = (w.pair, w.token0, w.token1);
        if w.chain.transfer(t0, owner(), pair, amount_in).is_err() {
            return Ok(());
        }

        let before_reserves = reserves(&w);
        let before_log = w.chain.events().len();
        let before_balance = w.chain.balance_of(t1, pair);

        prop_assert!(w.chain.swap(pair, owner(), Amount::ZERO, greedy, trader(), &[]).is_err());
        prop_assert_eq!(reserves(&w), before_reserves);
        prop_assert_eq!(w.chain.events().len(), before_log);
        prop_assert_eq!(w.chain.balance_of(t1, pair), before_balance);
        prop_assert_eq!(w.chain.balance_of(t1, trader()), Ok(Amount::ZERO));
    }
}

// ---------------------------------------------------------------------------
// Property 5: Burn conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_burn_returns_at_most_deposit(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
    ) {
        let mut w = world();
        let liquidity = w.add_liquidity(Amount::from(r0), Amount::from(r1));
        let pair = w.pair;
        if w.chain.transfer(pair, owner(), pair, liquidity).is_err() {
            return Ok(());
        }
        let Ok((a0, a1)) = w.chain.burn(pair, owner(), trader()) else {
            return Ok(());
        };
        prop_assert!(a0 <= Amount::from(r0));
        prop_assert!(a1 <= Amount::from(r1));
    }
}
