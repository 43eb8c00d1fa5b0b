//! Reference-currency price discovery and tracked USD attribution.
//!
//! - [`price_resolver`] - USD price of the reference currency and derived
//!   prices of arbitrary tokens
//! - [`tracked`] - Whitelist-weighted USD volume and liquidity

mod price_resolver;
mod tracked;

#[cfg(test)]
pub(crate) mod fixtures;

pub use price_resolver::{PriceResolver, RepriceReport};
