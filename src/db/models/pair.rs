use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{error::PricingError, utils::checked_div};

/// Which side of a pair a token sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairSide {
    Token0,
    Token1,
}

impl PairSide {
    pub fn other(self) -> Self {
        match self {
            PairSide::Token0 => PairSide::Token1,
            PairSide::Token1 => PairSide::Token0,
        }
    }
}

/// Liquidity pair state.
///
/// Primary Key: id (pair address)
///
/// Prices follow the Uniswap V2 subgraph convention:
/// - token0_price = token0 per token1 (reserve0 / reserve1)
/// - token1_price = token1 per token0 (reserve1 / reserve0)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pair {
    pub id: String,
    pub token0: String,
    pub token1: String,

    pub reserve0: BigDecimal,
    pub reserve1: BigDecimal,
    /// Total pair liquidity expressed in the reference currency.
    pub reserve_eth: BigDecimal,

    pub token0_price: BigDecimal,
    pub token1_price: BigDecimal,
}

impl Pair {
    /// Build a pair from its reserves, deriving both price fields.
    ///
    /// A price whose divisor reserve is zero is left at zero.
    pub fn from_reserves(
        id: &str,
        token0: &str,
        token1: &str,
        reserve0: BigDecimal,
        reserve1: BigDecimal,
        reserve_eth: BigDecimal,
    ) -> Result<Self, PricingError> {
        let token0 = token0.to_lowercase();
        let token1 = token1.to_lowercase();
        if token0 == token1 {
            return Err(PricingError::IdenticalPairTokens(id.to_lowercase()));
        }

        let token0_price = if reserve1.is_zero() {
            BigDecimal::zero()
        } else {
            checked_div(&reserve0, &reserve1, "token0 price")?
        };
        let token1_price = if reserve0.is_zero() {
            BigDecimal::zero()
        } else {
            checked_div(&reserve1, &reserve0, "token1 price")?
        };

        Ok(Self {
            id: id.to_lowercase(),
            token0,
            token1,
            reserve0,
            reserve1,
            reserve_eth,
            token0_price,
            token1_price,
        })
    }

    /// Side occupied by `token`, if it belongs to this pair.
    pub fn side_of(&self, token: &str) -> Option<PairSide> {
        if self.token0 == token {
            Some(PairSide::Token0)
        } else if self.token1 == token {
            Some(PairSide::Token1)
        } else {
            None
        }
    }

    pub fn token(&self, side: PairSide) -> &str {
        match side {
            PairSide::Token0 => &self.token0,
            PairSide::Token1 => &self.token1,
        }
    }

    pub fn reserve(&self, side: PairSide) -> &BigDecimal {
        match side {
            PairSide::Token0 => &self.reserve0,
            PairSide::Token1 => &self.reserve1,
        }
    }

    /// Price field named after `side`: token0_price for Token0, token1_price
    /// for Token1. token0_price is the amount of token0 one unit of token1 buys.
    pub fn price(&self, side: PairSide) -> &BigDecimal {
        match side {
            PairSide::Token0 => &self.token0_price,
            PairSide::Token1 => &self.token1_price,
        }
    }
}
