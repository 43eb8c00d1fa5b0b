//! Utility functions shared by the pricing code.
//!
//! - [`decimal`] - Checked division and raw-amount conversions for `BigDecimal`
//! - [`address`] - Address normalization and hex encoding

mod address;
mod decimal;

// ============================================
// Common Constants
// ============================================

/// The zero address. A pair locator never returns it as a pair id.
pub const ADDRESS_ZERO: &str = "0x0000000000000000000000000000000000000000";

// ============================================
// Re-exports
// ============================================

pub use address::{hex_encode, normalize_address};

pub use decimal::{
    checked_div, convert_token_to_decimal, exponent_to_big_decimal, one_bd, two_bd, zero_bd,
    DIVISION_PRECISION,
};
