//! Arithmetic for the exchange: checked helpers, integer square root,
//! 112.112 fixed-point prices and the constant-product pricing library.

mod checked;
mod pricing;
mod sqrt;
mod uq112x112;

pub use checked::CheckedArithmetic;
pub use pricing::{get_amount_in, get_amount_out, quote};
pub use sqrt::isqrt;
pub(crate) use uq112x112::narrow;
pub use uq112x112::{PriceCumulative, Uq112x112, MAX_U112, RESOLUTION};
