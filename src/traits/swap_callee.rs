//! Flash-swap callback interface.

use crate::chain::CalleeContext;
use crate::domain::{Address, Amount};
use crate::error::Result;

/// What a pair tells its flash-swap recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlashSwapCall<'a> {
    /// Address the callee is registered at (the swap recipient).
    pub callee: Address,
    /// Pair that is mid-swap.
    pub pair: Address,
    /// Caller of `swap`.
    pub sender: Address,
    /// Token0 already sent to the callee.
    pub amount0: Amount,
    /// Token1 already sent to the callee.
    pub amount1: Amount,
    /// Opaque bytes passed through from the swap caller.
    pub data: &'a [u8],
}

/// An untrusted counterparty that receives swap output before paying.
///
/// The pair has already transferred the requested outputs when
/// [`on_flash_swap`](Self::on_flash_swap) runs.  The callee acts through a
/// [`CalleeContext`], which only spends what the callee itself owns or has
/// been approved for.  By the time it returns the pair's balances must
/// satisfy the invariant, otherwise the whole swap reverts.  The pair
/// is locked for the duration: re-entering it fails with
/// [`DexError::Locked`](crate::error::DexError::Locked).
///
/// # Examples
///
/// ```
/// use hydra_dex::chain::CalleeContext;
/// use hydra_dex::error::Result;
/// use hydra_dex::traits::{FlashSwapCall, SwapCallee};
///
/// /// Pays nothing back; every swap through it fails with
/// /// `InsufficientInputAmount`.
/// struct Freeloader;
///
/// impl SwapCallee for Freeloader {
///     fn on_flash_swap(&mut self, _ctx: &mut CalleeContext<'_>, _call: &FlashSwapCall<'_>) -> Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait SwapCallee {
    /// Runs with the pair locked and the outputs already delivered.
    ///
    /// # Errors
    ///
    /// Any error aborts the swap.
    fn on_flash_swap(&mut self, ctx: &mut CalleeContext<'_>, call: &FlashSwapCall<'_>) -> Result<()>;
}
