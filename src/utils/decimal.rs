//! Decimal arithmetic helpers.
//!
//! All prices, reserves and amounts are `BigDecimal`. Multiplication and
//! addition are exact; division goes through [`checked_div`], which refuses a
//! zero divisor, rounds the quotient to [`DIVISION_PRECISION`] significant
//! digits and strips trailing zeros.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use once_cell::sync::Lazy;

use crate::error::PricingError;

/// Significant digits kept after a division.
/// Matches the 34-digit precision of graph-node's `BigDecimal`.
pub const DIVISION_PRECISION: u64 = 34;

// ============================================
// Constants
// ============================================

pub fn zero_bd() -> BigDecimal {
    BigDecimal::zero()
}

pub fn one_bd() -> BigDecimal {
    BigDecimal::from(1)
}

pub fn two_bd() -> BigDecimal {
    BigDecimal::from(2)
}

// ============================================
// Checked Arithmetic
// ============================================

/// Divide `numerator` by `denominator`.
///
/// `what` names the quantity being computed and ends up in the error message.
///
/// # Returns
/// * `Ok(quotient)` rounded to at most [`DIVISION_PRECISION`] significant digits,
///   without trailing zeros
/// * `Err(PricingError::DivisionByZero)` if `denominator` is zero
pub fn checked_div(
    numerator: &BigDecimal,
    denominator: &BigDecimal,
    what: &'static str,
) -> Result<BigDecimal, PricingError> {
    if denominator.is_zero() {
        return Err(PricingError::DivisionByZero(what));
    }

    Ok((numerator / denominator)
        .with_prec(DIVISION_PRECISION)
        .normalized())
}

// ============================================
// Token Amount Conversions
// ============================================

static POW10_CACHE: Lazy<[BigDecimal; 25]> =
    Lazy::new(|| std::array::from_fn(|i| BigDecimal::from(BigInt::from(10u32).pow(i as u32))));

/// Compute 10^decimals as BigDecimal.
pub fn exponent_to_big_decimal(decimals: u8) -> BigDecimal {
    if (decimals as usize) < POW10_CACHE.len() {
        POW10_CACHE[decimals as usize].clone()
    } else {
        BigDecimal::from(BigInt::from(10u32).pow(decimals as u32))
    }
}

/// Convert a raw integer token amount into decimal units.
///
/// A token with zero decimals is returned unchanged.
///
/// # Example
/// ```ignore
/// let raw = BigDecimal::from_str("1500000000000000000").unwrap();
/// let adjusted = convert_token_to_decimal(&raw, 18); // 1.5
/// ```
pub fn convert_token_to_decimal(raw_amount: &BigDecimal, decimals: u8) -> BigDecimal {
    if decimals == 0 {
        return raw_amount.clone();
    }

    // Exact: scaling by a power of ten only moves the decimal point.
    let scale = exponent_to_big_decimal(decimals);
    raw_amount / &scale
}
