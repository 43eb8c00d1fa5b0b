use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::utils::zero_bd;

/// Id of the singleton bundle.
pub const BUNDLE_ID: &str = "1";

/// Reference currency to USD conversion rate (singleton).
///
/// Written once per processed block by the ingestion pipeline, read by the
/// volume attributor as the latest snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub eth_price: BigDecimal,
}

impl Bundle {
    pub fn new(eth_price: BigDecimal) -> Self {
        Self {
            id: BUNDLE_ID.to_string(),
            eth_price,
        }
    }

    /// Overwrite the stored rate with a freshly resolved one.
    ///
    /// Returns true if the price changed.
    pub fn update_eth_price(&mut self, eth_price: BigDecimal) -> bool {
        if self.eth_price == eth_price {
            return false;
        }
        self.eth_price = eth_price;
        true
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self::new(zero_bd())
    }
}
