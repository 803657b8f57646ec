//! Router swap operations.
//!
//! Amounts for the whole path are computed up front from current reserves;
//! then the input is paid into the first pair and each pair pays its output
//! straight into the next one, with only the last hop paying `to`.

use tracing::debug;

use super::{Router, SwapExactIn, SwapExactOut};
use crate::chain::Chain;
use crate::domain::{Address, Amount, TokenPair};
use crate::error::{DexError, Result};

impl Chain {
    /// Sells exactly `params.amount_in` of `path[0]` for as much of the last
    /// token as the path yields.
    ///
    /// Returns the amount at every hop.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::InvalidPath`] / [`DexError::PairNotFound`] for a bad path.
    /// - [`DexError::InsufficientOutputAmount`] below `amount_out_min`.
    pub fn swap_exact_tokens_for_tokens(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_exact_tokens_for_tokens", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            let amounts = chain.amounts_out(&router, params.amount_in, &params.path)?;
            check_min_out(&amounts, params.amount_out_min)?;
            chain.pull_input(&router, caller, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    /// Buys exactly `params.amount_out` of the last token, spending at most
    /// `params.amount_in_max` of `path[0]`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Expired`] past the deadline.
    /// - [`DexError::InvalidPath`] / [`DexError::PairNotFound`] for a bad path.
    /// - [`DexError::ExcessiveInputAmount`] above `amount_in_max`.
    pub fn swap_tokens_for_exact_tokens(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_tokens_for_exact_tokens", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            let amounts = chain.amounts_in(&router, params.amount_out, &params.path)?;
            check_max_in(&amounts, params.amount_in_max)?;
            chain.pull_input(&router, caller, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    /// Sells exactly `params.amount_in` of attached native value.  `path`
    /// must start at the wrapped-native ledger.
    ///
    /// # Errors
    ///
    /// As [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens),
    /// plus [`DexError::InsufficientBalance`] if `caller` cannot attach the
    /// value.
    pub fn swap_exact_native_for_tokens(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_exact_native_for_tokens", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            check_native_first(&router, &params.path)?;
            chain.attach_native(&router, caller, params.amount_in)?;
            let amounts = chain.amounts_out(&router, params.amount_in, &params.path)?;
            check_min_out(&amounts, params.amount_out_min)?;
            chain.wrap_input(&router, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, params.to)?;
            Ok(amounts)
        })
    }

    /// Buys exactly `params.amount_out` native value with at most
    /// `params.amount_in_max` of `path[0]`.  `path` must end at the
    /// wrapped-native ledger.
    ///
    /// # Errors
    ///
    /// As [`swap_tokens_for_exact_tokens`](Self::swap_tokens_for_exact_tokens).
    pub fn swap_tokens_for_exact_native(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_tokens_for_exact_native", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            check_native_last(&router, &params.path)?;
            let amounts = chain.amounts_in(&router, params.amount_out, &params.path)?;
            check_max_in(&amounts, params.amount_in_max)?;
            chain.pull_input(&router, caller, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, router.address())?;
            chain.unwrap_output(&router, &amounts, params.to)?;
            Ok(amounts)
        })
    }

    /// Sells exactly `params.amount_in` of `path[0]` for native value.
    /// `path` must end at the wrapped-native ledger.
    ///
    /// # Errors
    ///
    /// As [`swap_exact_tokens_for_tokens`](Self::swap_exact_tokens_for_tokens).
    pub fn swap_exact_tokens_for_native(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactIn,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_exact_tokens_for_native", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            check_native_last(&router, &params.path)?;
            let amounts = chain.amounts_out(&router, params.amount_in, &params.path)?;
            check_min_out(&amounts, params.amount_out_min)?;
            chain.pull_input(&router, caller, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, router.address())?;
            chain.unwrap_output(&router, &amounts, params.to)?;
            Ok(amounts)
        })
    }

    /// Buys exactly `params.amount_out` of the last token with attached
    /// native value `params.amount_in_max`; the unspent part is refunded.
    /// `path` must start at the wrapped-native ledger.
    ///
    /// # Errors
    ///
    /// As [`swap_tokens_for_exact_tokens`](Self::swap_tokens_for_exact_tokens),
    /// plus [`DexError::InsufficientBalance`] if `caller` cannot attach the
    /// value.
    pub fn swap_native_for_exact_tokens(
        &mut self,
        router: Address,
        caller: Address,
        params: &SwapExactOut,
    ) -> Result<Vec<Amount>> {
        self.transact("swap_native_for_exact_tokens", |chain| {
            let router = chain.router_for_call(router, params.deadline)?;
            check_native_first(&router, &params.path)?;
            chain.attach_native(&router, caller, params.amount_in_max)?;
            let amounts = chain.amounts_in(&router, params.amount_out, &params.path)?;
            check_max_in(&amounts, params.amount_in_max)?;
            chain.wrap_input(&router, &params.path, amounts[0])?;
            chain.execute_path(&router, &amounts, &params.path, params.to)?;
            chain.refund_native(&router, caller, params.amount_in_max, amounts[0])?;
            Ok(amounts)
        })
    }

    // -- Implementation -------------------------------------------------------

    /// Pulls the path's input from `caller` straight into the first pair.
    fn pull_input(&mut self, router: &Router, caller: Address, path: &[Address], amount: Amount) -> Result<()> {
        let first_pair = router.pair_for(path[0], path[1])?;
        self.transfer_from_inner(path[0], router.address(), caller, first_pair, amount)
    }

    /// Wraps attached native value and pays it into the first pair.
    fn wrap_input(&mut self, router: &Router, path: &[Address], amount: Amount) -> Result<()> {
        let first_pair = router.pair_for(path[0], path[1])?;
        let wrapped = router.wrapped_native();
        self.deposit_inner(wrapped, router.address(), amount)?;
        self.transfer_inner(wrapped, router.address(), first_pair, amount)
    }

    /// Unwraps the router-held final output and pays it to `to`.
    fn unwrap_output(&mut self, router: &Router, amounts: &[Amount], to: Address) -> Result<()> {
        let out = amounts.last().copied().ok_or(DexError::InvalidPath)?;
        self.withdraw_inner(router.wrapped_native(), router.address(), out)?;
        self.transfer_native(router.address(), to, out)
    }

    /// Swaps hop by hop; each pair pays the next, the last pays `to`.
    fn execute_path(&mut self, router: &Router, amounts: &[Amount], path: &[Address], to: Address) -> Result<()> {
        let hops = path.len() - 1;
        for i in 0..hops {
            let (input, output) = (path[i], path[i + 1]);
            let tokens = TokenPair::new(input, output)?;
            let amount_out = amounts[i + 1];
            let (amount0_out, amount1_out) = if tokens.is_first(input) {
                (Amount::ZERO, amount_out)
            } else {
                (amount_out, Amount::ZERO)
            };
            let recipient = if i + 1 < hops {
                router.pair_for(output, path[i + 2])?
            } else {
                to
            };
            let pair = router.pair_for(input, output)?;
            self.swap_inner(pair, router.address(), amount0_out, amount1_out, recipient, &[])?;
        }
        debug!(
            hops,
            amount_in = %amounts[0],
            amount_out = %amounts[hops],
            %to,
            "router swap executed"
        );
        Ok(())
    }
}

fn check_min_out(amounts: &[Amount], min: Amount) -> Result<()> {
    match amounts.last() {
        Some(out) if *out >= min => Ok(()),
        _ => Err(DexError::InsufficientOutputAmount),
    }
}

fn check_max_in(amounts: &[Amount], max: Amount) -> Result<()> {
    match amounts.first() {
        Some(input) if *input <= max => Ok(()),
        _ => Err(DexError::ExcessiveInputAmount),
    }
}

fn check_native_first(router: &Router, path: &[Address]) -> Result<()> {
    if path.first() != Some(&router.wrapped_native()) {
        return Err(DexError::InvalidPath);
    }
    Ok(())
}

fn check_native_last(router: &Router, path: &[Address]) -> Result<()> {
    if path.last() != Some(&router.wrapped_native()) {
        return Err(DexError::InvalidPath);
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::super::fixtures::{desk, e18, lp, Desk};
    use super::super::{AddLiquidity, AddLiquidityNative};
    use super::*;
    use crate::math::get_amount_out;
    use crate::domain::FeeTier;

    fn trader() -> Address {
        Address::from_low_u64(0x7ade)
    }

    fn seed(d: &mut Desk, a: Address, b: Address, amount_a: Amount, amount_b: Amount) {
        let req = AddLiquidity {
            token_a: a,
            token_b: b,
            amount_a_desired: amount_a,
            amount_b_desired: amount_b,
            amount_a_min: Amount::ZERO,
            amount_b_min: Amount::ZERO,
            to: lp(),
            deadline: u64::MAX,
        };
        let Ok(_) = d.chain.add_liquidity(d.router, lp(), &req) else {
            panic!("seed liquidity");
        };
    }

    fn seed_native(d: &mut Desk, token: Address, amount_token: Amount, value: Amount) {
        let req = AddLiquidityNative {
            token,
            amount_token_desired: amount_token,
            amount_token_min: Amount::ZERO,
            amount_native_min: Amount::ZERO,
            to: lp(),
            deadline: u64::MAX,
            value,
        };
        let Ok(_) = d.chain.add_liquidity_native(d.router, lp(), &req) else {
            panic!("seed native liquidity");
        };
    }

    fn exact_in(amount_in: Amount, min: Amount, path: Vec<Address>) -> SwapExactIn {
        SwapExactIn {
            amount_in,
            amount_out_min: min,
            path,
            to: trader(),
            deadline: u64::MAX,
        }
    }

    fn exact_out(amount_out: Amount, max: Amount, path: Vec<Address>) -> SwapExactOut {
        SwapExactOut {
            amount_out,
            amount_in_max: max,
            path,
            to: trader(),
            deadline: u64::MAX,
        }
    }

    #[test]
    fn exact_in_single_hop() {
        let mut d = desk(2);
        let (a, b) = (d.tokens[0], d.tokens[1]);
        seed(&mut d, a, b, e18(5), e18(10));
        let Ok(amounts) = d.chain.swap_exact_tokens_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a, b]))
        else {
            panic!("swap");
        };
        assert_eq!(amounts, vec![e18(1), Amount::from_u128(1_662_497_915_624_478_906)]);
        assert_eq!(d.chain.balance_of(b, trader()), Ok(amounts[1]));
    }

    #[test]
    fn exact_in_multi_hop_goes_pair_to_pair() {
        let mut d = desk(3);
        let (a, b, c) = (d.tokens[0], d.tokens[1], d.tokens[2]);
        seed(&mut d, a, b, e18(10), e18(10));
        seed(&mut d, b, c, e18(10), e18(10));
        let Ok(quoted) = d.chain.get_amounts_out(d.router, e18(1), &[a, b, c]) else {
            panic!("quote");
        };
        let mark = d.chain.events().len();
        let Ok(amounts) = d.chain.swap_exact_tokens_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a, b, c]))
        else {
            panic!("swap");
        };
        assert_eq!(amounts, quoted);
        assert_eq!(d.chain.balance_of(c, trader()), Ok(amounts[2]));
        assert_eq!(d.chain.balance_of(b, trader()), Ok(Amount::ZERO));
        assert_eq!(d.chain.balance_of(b, d.router), Ok(Amount::ZERO));

        let Ok(first_pair) = d.chain.router(d.router).and_then(|r| r.pair_for(a, b)) else {
            panic!("pair");
        };
        let Ok(second_pair) = d.chain.router(d.router).and_then(|r| r.pair_for(b, c)) else {
            panic!("pair");
        };
        let hop = d.chain.events().since(mark).iter().any(|entry| {
            entry.emitter == b
                && entry.event
                    == crate::chain::Event::Transfer {
                        from: first_pair,
                        to: second_pair,
                        value: amounts[1],
                    }
        });
        assert!(hop, "intermediate output must go straight to the next pair");
    }

    #[test]
    fn exact_in_respects_minimum() {
        let mut d = desk(2);
        let (a, b) = (d.tokens[0], d.tokens[1]);
        seed(&mut d, a, b, e18(5), e18(10));
        let Ok(balance) = d.chain.balance_of(a, lp()) else {
            panic!("balance");
        };
        assert_eq!(
            d.chain.swap_exact_tokens_for_tokens(d.router, lp(), &exact_in(e18(1), e18(2), vec![a, b])),
            Err(DexError::InsufficientOutputAmount)
        );
        assert_eq!(d.chain.balance_of(a, lp()), Ok(balance));
    }

    #[test]
    fn exact_out_charges_rounded_up_input() {
        let mut d = desk(2);
        let (a, b) = (d.tokens[0], d.tokens[1]);
        seed(&mut d, a, b, e18(10), e18(10));
        let Ok(amounts) = d.chain.swap_tokens_for_exact_tokens(d.router, lp(), &exact_out(e18(1), e18(2), vec![a, b]))
        else {
            panic!("swap");
        };
        assert_eq!(d.chain.balance_of(b, trader()), Ok(e18(1)));
        // paying one unit less would not have been enough
        let Some(short) = amounts[0].checked_sub(&Amount::ONE) else {
            panic!("sub");
        };
        let Ok(out) = get_amount_out(short, e18(10), e18(10), FeeTier::DEFAULT) else {
            panic!("quote");
        };
        assert!(out < e18(1));

        assert_eq!(
            d.chain.swap_tokens_for_exact_tokens(d.router, lp(), &exact_out(e18(1), Amount::ONE, vec![a, b])),
            Err(DexError::ExcessiveInputAmount)
        );
    }

    #[test]
    fn bad_paths_rejected() {
        let mut d = desk(3);
        let (a, b, c) = (d.tokens[0], d.tokens[1], d.tokens[2]);
        seed(&mut d, a, b, e18(5), e18(5));
        assert_eq!(
            d.chain.swap_exact_tokens_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a])),
            Err(DexError::InvalidPath)
        );
        assert_eq!(
            d.chain.swap_exact_tokens_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a, c])),
            Err(DexError::PairNotFound)
        );
        assert_eq!(
            d.chain.swap_exact_native_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a, b])),
            Err(DexError::InvalidPath)
        );
        assert_eq!(
            d.chain.swap_exact_tokens_for_native(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![a, b])),
            Err(DexError::InvalidPath)
        );
    }

    #[test]
    fn native_in_both_directions() {
        let mut d = desk(1);
        let (token, wrapped) = (d.tokens[0], d.wrapped);
        seed_native(&mut d, token, e18(100), e18(10));

        let Ok(amounts) =
            d.chain.swap_exact_native_for_tokens(d.router, lp(), &exact_in(e18(1), Amount::ZERO, vec![wrapped, token]))
        else {
            panic!("native in");
        };
        assert_eq!(d.chain.balance_of(token, trader()), Ok(amounts[1]));

        let Ok(amounts) =
            d.chain.swap_exact_tokens_for_native(d.router, lp(), &exact_in(e18(5), Amount::ZERO, vec![token, wrapped]))
        else {
            panic!("native out");
        };
        assert_eq!(d.chain.native_balance(trader()), amounts[1]);
        assert_eq!(d.chain.native_balance(d.router), Amount::ZERO);
        assert_eq!(d.chain.balance_of(wrapped, d.router), Ok(Amount::ZERO));
    }

    #[test]
    fn native_exact_out_variants() {
        let mut d = desk(1);
        let (token, wrapped) = (d.tokens[0], d.wrapped);
        seed_native(&mut d, token, e18(100), e18(10));
        let native_before = d.chain.native_balance(lp());

        let Ok(amounts) =
            d.chain.swap_native_for_exact_tokens(d.router, lp(), &exact_out(e18(1), e18(5), vec![wrapped, token]))
        else {
            panic!("native for exact");
        };
        assert_eq!(d.chain.balance_of(token, trader()), Ok(e18(1)));
        let Some(spent) = native_before.checked_sub(&d.chain.native_balance(lp())) else {
            panic!("spent");
        };
        assert_eq!(spent, amounts[0]);

        let Ok(_) =
            d.chain.swap_tokens_for_exact_native(d.router, lp(), &exact_out(e18(1), e18(50), vec![token, wrapped]))
        else {
            panic!("exact native");
        };
        assert_eq!(d.chain.native_balance(trader()), e18(1));
    }
}
