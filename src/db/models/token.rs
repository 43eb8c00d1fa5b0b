use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::convert_token_to_decimal;

/// Token entity as seen by the pricing code.
///
/// Primary Key: id (lowercase address)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,

    // Metadata (used for logs and raw amount conversion)
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub decimals: u8,

    /// Price in reference-currency units.
    /// `None` until the pipeline has priced the token at least once, so an
    /// unpriced token is never confused with a token that is priced at zero.
    #[serde(default)]
    pub derived_eth: Option<BigDecimal>,
}

impl Token {
    pub fn new(id: &str, symbol: &str, decimals: u8) -> Self {
        Self {
            // Always lowercase addresses for consistent comparisons
            id: id.to_lowercase(),
            symbol: symbol.to_string(),
            decimals,
            derived_eth: None,
        }
    }

    pub fn with_derived_eth(mut self, derived_eth: BigDecimal) -> Self {
        self.derived_eth = Some(derived_eth);
        self
    }

    /// Scale a raw on-chain amount by this token's decimals.
    pub fn to_units(&self, raw_amount: &BigDecimal) -> BigDecimal {
        convert_token_to_decimal(raw_amount, self.decimals)
    }
}
