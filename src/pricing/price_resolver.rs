use std::sync::Arc;

use bigdecimal::BigDecimal;
use log::debug;

use crate::{
    config::{PricingConfig, StablecoinPair},
    db::{
        models::{Pair, Token},
        EntityStore, PairLocator,
    },
    error::PricingError,
    utils::{checked_div, one_bd, zero_bd, ADDRESS_ZERO},
};

/// Price resolution against a store snapshot.
///
/// Two prices are resolved here:
/// 1. Reference currency → USD, read from the configured stablecoin pairs
/// 2. Token → reference currency ("derived ETH"), read from the first
///    sufficiently liquid pair against a whitelisted anchor token
///
/// The resolver holds no state of its own. Every call reads the store as it is
/// at that moment; writing results back is the caller's job.
pub struct PriceResolver<S, L> {
    config: Arc<PricingConfig>,
    store: S,
    locator: L,
}

/// Outcome of [`PriceResolver::reprice_tokens`].
#[derive(Debug, Clone, Default)]
pub struct RepriceReport {
    pub eth_price_usd: BigDecimal,
    /// (token id, derived reference price), in input order
    pub derived: Vec<(String, BigDecimal)>,
    /// Tokens whose price could not be resolved
    pub failures: Vec<(String, PricingError)>,
}

impl<S: EntityStore, L: PairLocator> PriceResolver<S, L> {
    pub fn new(config: Arc<PricingConfig>, store: S, locator: L) -> Self {
        Self {
            config,
            store,
            locator,
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    /// USD price of one unit of the reference currency.
    ///
    /// Resolution priority (most precise first):
    /// 1. All three stablecoin pairs exist → reserve-weighted average of the three
    /// 2. Primary and secondary exist → reserve-weighted average of those two
    /// 3. Primary exists → its price
    /// 4. Secondary exists → its price
    /// 5. Otherwise → 0
    ///
    /// Weights are each pair's reference-side reserve over the total.
    pub fn eth_price_in_usd(&self) -> Result<BigDecimal, PricingError> {
        let pairs = &self.config.stablecoin_pairs;

        let primary = self.store.load_pair(&pairs.primary.address);
        let secondary = self.store.load_pair(&pairs.secondary.address);
        let supplementary = self.store.load_pair(&pairs.supplementary.address);

        match (&primary, &secondary, &supplementary) {
            (Some(p), Some(s), Some(x)) => {
                debug!("Reference price from all three stablecoin pairs");
                weighted_price(&[
                    (&pairs.supplementary, x),
                    (&pairs.primary, p),
                    (&pairs.secondary, s),
                ])
            },
            (Some(p), Some(s), None) => {
                debug!("Reference price from primary and secondary stablecoin pairs");
                weighted_price(&[(&pairs.primary, p), (&pairs.secondary, s)])
            },
            (Some(p), None, _) => {
                debug!("Reference price from primary stablecoin pair only");
                Ok(pairs.primary.implied_price(p).clone())
            },
            (None, Some(s), _) => {
                debug!("Reference price from secondary stablecoin pair only");
                Ok(pairs.secondary.implied_price(s).clone())
            },
            (None, None, _) => {
                debug!("No stablecoin pair available yet, reference price is 0");
                Ok(zero_bd())
            },
        }
    }

    /// Price of `token` in reference-currency units.
    ///
    /// The reference token itself is worth exactly 1. Any other token is priced
    /// through the first whitelisted anchor, in declared order, that has a pair
    /// with it holding more than the minimum reference liquidity:
    ///
    /// ```text
    /// derived = (anchor per token) × anchor.derived_eth
    /// ```
    ///
    /// Order is the tie-break, not liquidity. Only one hop is searched and the
    /// anchor's own derived price is read from the store as-is.
    ///
    /// Returns 0 if no anchor qualifies.
    pub fn find_eth_per_token(&self, token: &Token) -> Result<BigDecimal, PricingError> {
        let token_id = token.id.to_lowercase();

        if self.config.is_reference_token(&token_id) {
            return Ok(one_bd());
        }

        for anchor in &self.config.whitelist {
            let Some(pair_id) = self.locator.locate_pair(&token_id, anchor) else {
                continue;
            };
            if pair_id == ADDRESS_ZERO {
                continue;
            }

            let Some(pair) = self.store.load_pair(&pair_id) else {
                debug!("Pair {} ({}/{}) not in store, skipping", pair_id, token_id, anchor);
                continue;
            };

            if let Some(price) = self.price_through_pair(&token_id, &pair)? {
                debug!(
                    "Priced {} ({}) through pair {} ({} ETH)",
                    token.symbol, token_id, pair.id, price
                );
                return Ok(price);
            }
        }

        Ok(zero_bd())
    }

    /// Price `token_id` through a single located pair.
    ///
    /// Returns None if the pair does not qualify as a price source.
    fn price_through_pair(
        &self,
        token_id: &str,
        pair: &Pair,
    ) -> Result<Option<BigDecimal>, PricingError> {
        let Some(side) = pair.side_of(token_id) else {
            debug!("Pair {} does not contain {}, skipping", pair.id, token_id);
            return Ok(None);
        };

        // Strictly greater: a pair sitting exactly on the floor is not trusted.
        if pair.reserve_eth <= self.config.minimum_liquidity_threshold_eth {
            debug!(
                "Pair {} below liquidity floor ({} <= {}), skipping",
                pair.id, pair.reserve_eth, self.config.minimum_liquidity_threshold_eth
            );
            return Ok(None);
        }

        let anchor_side = side.other();
        let anchor_id = pair.token(anchor_side);
        let anchor = self
            .store
            .load_token(anchor_id)
            .ok_or_else(|| PricingError::TokenNotFound(anchor_id.to_string()))?;
        let anchor_derived = anchor
            .derived_eth
            .as_ref()
            .ok_or_else(|| PricingError::UnpricedToken(anchor.id.clone()))?;

        // token0 priced via token1_price (token1 per token0) and vice versa
        Ok(Some((pair.price(anchor_side) * anchor_derived).normalized()))
    }

    /// Resolve the reference price and the derived price of every token, in order.
    ///
    /// Derived prices are computed from the store as it stands: a token priced
    /// through an anchor that appears earlier in `tokens` still sees the
    /// anchor's stored price, not the one computed in this pass.
    ///
    /// Fails only if the reference price cannot be resolved; per-token failures
    /// are collected in the report.
    pub fn reprice_tokens<'t, I>(&self, tokens: I) -> Result<RepriceReport, PricingError>
    where
        I: IntoIterator<Item = &'t Token>,
    {
        let mut report = RepriceReport {
            eth_price_usd: self.eth_price_in_usd()?,
            ..Default::default()
        };

        for token in tokens {
            match self.find_eth_per_token(token) {
                Ok(price) => report.derived.push((token.id.clone(), price)),
                Err(e) => report.failures.push((token.id.clone(), e)),
            }
        }

        Ok(report)
    }
}

/// Reserve-weighted average of the prices implied by `pairs`.
fn weighted_price(pairs: &[(&StablecoinPair, &Pair)]) -> Result<BigDecimal, PricingError> {
    let total_liquidity = pairs
        .iter()
        .fold(zero_bd(), |acc, (config, pair)| acc + config.reference_reserve(pair));

    let mut price = zero_bd();
    for (config, pair) in pairs {
        let weight = checked_div(
            config.reference_reserve(pair),
            &total_liquidity,
            "stablecoin pair weight",
        )?;
        price += config.implied_price(pair) * &weight;
    }

    Ok(price.normalized())
}
