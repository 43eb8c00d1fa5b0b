use bigdecimal::BigDecimal;

use super::PriceResolver;
use crate::{
    db::{
        models::{Token, BUNDLE_ID},
        EntityStore, PairLocator,
    },
    error::PricingError,
    utils::{checked_div, two_bd},
};

/// Which side of a trade is trusted for USD attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TrackedSide {
    Token0,
    Token1,
    /// Both sides whitelisted, or neither
    Both,
}

/// USD price of a token: derived reference price × reference USD price.
fn usd_price(token: &Token, eth_price: &BigDecimal) -> Result<BigDecimal, PricingError> {
    let derived = token
        .derived_eth
        .as_ref()
        .ok_or_else(|| PricingError::UnpricedToken(token.id.clone()))?;
    Ok(derived * eth_price)
}

impl<S: EntityStore, L: PairLocator> PriceResolver<S, L> {
    fn tracked_side(&self, token0: &Token, token1: &Token) -> TrackedSide {
        let token0_whitelisted = self.config().is_whitelisted(&token0.id);
        let token1_whitelisted = self.config().is_whitelisted(&token1.id);

        match (token0_whitelisted, token1_whitelisted) {
            (true, false) => TrackedSide::Token0,
            (false, true) => TrackedSide::Token1,
            _ => TrackedSide::Both,
        }
    }

    /// USD volume of a swap that counts towards tracked statistics.
    ///
    /// - Only token0 whitelisted → full USD value of amount0
    /// - Only token1 whitelisted → full USD value of amount1
    /// - Both or neither → average of the two USD values
    ///
    /// The neither case is averaged, not dropped.
    ///
    /// The reference USD price is read from the bundle, which must exist.
    /// Only the derived prices of the sides actually counted are required.
    pub fn tracked_volume_usd(
        &self,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> Result<BigDecimal, PricingError> {
        let bundle = self
            .store()
            .load_bundle(BUNDLE_ID)
            .ok_or_else(|| PricingError::BundleNotFound(BUNDLE_ID.to_string()))?;
        let eth_price = &bundle.eth_price;

        match self.tracked_side(token0, token1) {
            TrackedSide::Token0 => Ok(amount0 * usd_price(token0, eth_price)?),
            TrackedSide::Token1 => Ok(amount1 * usd_price(token1, eth_price)?),
            TrackedSide::Both => {
                let total = amount0 * usd_price(token0, eth_price)?
                    + amount1 * usd_price(token1, eth_price)?;
                checked_div(&total, &two_bd(), "averaged volume")
            },
        }
    }

    /// USD liquidity of a mint or burn that counts towards tracked statistics.
    ///
    /// - Only token0 whitelisted → twice the USD value of amount0
    /// - Only token1 whitelisted → twice the USD value of amount1
    /// - Both or neither → sum of the two USD values
    ///
    /// Unlike [`Self::tracked_volume_usd`], the reference USD price is passed in
    /// by the caller, who already holds the bundle while updating liquidity.
    pub fn tracked_liquidity_usd(
        &self,
        eth_price: &BigDecimal,
        amount0: &BigDecimal,
        token0: &Token,
        amount1: &BigDecimal,
        token1: &Token,
    ) -> Result<BigDecimal, PricingError> {
        match self.tracked_side(token0, token1) {
            TrackedSide::Token0 => Ok(amount0 * usd_price(token0, eth_price)? * two_bd()),
            TrackedSide::Token1 => Ok(amount1 * usd_price(token1, eth_price)? * two_bd()),
            TrackedSide::Both => Ok(amount0 * usd_price(token0, eth_price)?
                + amount1 * usd_price(token1, eth_price)?),
        }
    }
}
