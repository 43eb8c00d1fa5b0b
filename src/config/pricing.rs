use std::str::FromStr;

use bigdecimal::BigDecimal;
use log::info;
use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

use super::config::{PricingSettings, StablecoinPairSettings};
use crate::{
    db::models::{Pair, PairSide},
    error::SettingsError,
    utils::{normalize_address, zero_bd},
};

/// A designated stablecoin/reference-currency pair and its orientation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StablecoinPair {
    pub address: String,
    pub stablecoin: PairSide,
}

impl StablecoinPair {
    pub fn new(address: &str, stablecoin: PairSide) -> Self {
        Self {
            address: address.to_lowercase(),
            stablecoin,
        }
    }

    /// Reserve of the reference currency side.
    pub fn reference_reserve<'a>(&self, pair: &'a Pair) -> &'a BigDecimal {
        pair.reserve(self.stablecoin.other())
    }

    /// Stablecoin units per reference unit, i.e. the USD price implied by the pair.
    ///
    /// With the stablecoin as token1 this is token1_price (token1 per token0),
    /// with the stablecoin as token0 it is token0_price.
    pub fn implied_price<'a>(&self, pair: &'a Pair) -> &'a BigDecimal {
        pair.price(self.stablecoin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StablecoinPairs {
    pub primary: StablecoinPair,
    pub secondary: StablecoinPair,
    pub supplementary: StablecoinPair,
}

/// Validated, immutable pricing constants for one network.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingConfig {
    pub reference_token: String,
    pub stablecoin_pairs: StablecoinPairs,
    /// Anchor tokens in lookup order.
    pub whitelist: Vec<String>,
    pub minimum_liquidity_threshold_eth: BigDecimal,
}

// ============================================
// PancakeSwap (BSC) constants
// ============================================

const BSC_WBNB: &str = "0xae13d989dac2f0debff460ac112a837c89baa7cd";
const BSC_BUSD_WBNB_PAIR: &str = "0x2ebdff0693787275065496e393f39c372b21d62b"; // busd is token1
const BSC_USDT_WBNB_PAIR: &str = "0xe244a60098478bdaa76f97f57a73a6bd536c977a"; // usdt is token0
const BSC_DAI_WBNB_PAIR: &str = "0xcb96e9735b34b2d4c508d147475218d0d2ab96cd"; // dai is token1

const BSC_WHITELIST: [&str; 10] = [
    "0xae13d989dac2f0debff460ac112a837c89baa7cd", // wbnb
    "0xd1a4a72c351f9e51c4124040019ba7266bbfe84a", // busd
    "0x7f4ee801aa5da021dee93a3e3ef994285a21cafa", // usdt
    "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d", // usdc
    "0xefd2b9b6433a86a124e416d8871b3e7028e75b7a", // ust
    "0xb05fb7e89dad5f717fbd78d79c2b9c04700f7a71", // dai
    "0x4bd17003473389a42daf6a0a729f6fdb328bbbd7", // vai
    "0x7130d2a12b9bcbfae4f2634d864a1ee1ce3ead9c", // btcb
    "0xbb3f4b50745c36c47a592dd78def97066c5e8edc", // weth
    "0x250632378e573c6be1ac2f97fcdf00515d0aa91b", // beth
];

static BSC: Lazy<PricingConfig> = Lazy::new(|| PricingConfig {
    reference_token: BSC_WBNB.to_string(),
    stablecoin_pairs: StablecoinPairs {
        primary: StablecoinPair::new(BSC_BUSD_WBNB_PAIR, PairSide::Token1),
        secondary: StablecoinPair::new(BSC_USDT_WBNB_PAIR, PairSide::Token0),
        supplementary: StablecoinPair::new(BSC_DAI_WBNB_PAIR, PairSide::Token1),
    },
    whitelist: BSC_WHITELIST.iter().map(|t| t.to_string()).collect(),
    minimum_liquidity_threshold_eth: BigDecimal::from(2),
});

impl PricingConfig {
    /// PancakeSwap constants: WBNB as reference currency, BUSD/USDT/DAI
    /// stablecoin pairs, ten anchor tokens and a 2 WBNB liquidity floor.
    pub fn bsc() -> Self {
        BSC.clone()
    }

    pub fn is_reference_token(&self, token: &str) -> bool {
        self.reference_token == token.to_lowercase()
    }

    pub fn is_whitelisted(&self, token: &str) -> bool {
        let token_lower = token.to_lowercase();
        self.whitelist.iter().any(|w| *w == token_lower)
    }
}

fn parse_address(field: &str, value: &str) -> Result<String, SettingsError> {
    normalize_address(value).ok_or_else(|| SettingsError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}

fn parse_stablecoin_pair(
    field: &str,
    settings: &StablecoinPairSettings,
) -> Result<StablecoinPair, SettingsError> {
    Ok(StablecoinPair {
        address: parse_address(field, &settings.address)?,
        stablecoin: settings.stablecoin,
    })
}

impl TryFrom<&PricingSettings> for PricingConfig {
    type Error = SettingsError;

    fn try_from(settings: &PricingSettings) -> Result<Self, Self::Error> {
        let reference_token = parse_address("reference_token", &settings.reference_token)?;

        let stablecoin_pairs = StablecoinPairs {
            primary: parse_stablecoin_pair(
                "stablecoin_pairs.primary",
                &settings.stablecoin_pairs.primary,
            )?,
            secondary: parse_stablecoin_pair(
                "stablecoin_pairs.secondary",
                &settings.stablecoin_pairs.secondary,
            )?,
            supplementary: parse_stablecoin_pair(
                "stablecoin_pairs.supplementary",
                &settings.stablecoin_pairs.supplementary,
            )?,
        };

        let pairs = [
            &stablecoin_pairs.primary.address,
            &stablecoin_pairs.secondary.address,
            &stablecoin_pairs.supplementary.address,
        ];
        let mut seen_pairs = FxHashSet::default();
        for address in pairs {
            if !seen_pairs.insert(address) {
                return Err(SettingsError::DuplicateStablecoinPair(address.clone()));
            }
        }

        if settings.whitelist.is_empty() {
            return Err(SettingsError::EmptyWhitelist);
        }

        // Order is preserved: it is the tie-break when pricing tokens.
        let mut whitelist = Vec::with_capacity(settings.whitelist.len());
        let mut seen_tokens = FxHashSet::default();
        for (i, entry) in settings.whitelist.iter().enumerate() {
            let token = parse_address(&format!("whitelist[{i}]"), entry)?;
            if !seen_tokens.insert(token.clone()) {
                return Err(SettingsError::DuplicateWhitelistEntry(token));
            }
            whitelist.push(token);
        }

        let threshold_str = settings.minimum_liquidity_threshold_eth.trim();
        let minimum_liquidity_threshold_eth = BigDecimal::from_str(threshold_str)
            .map_err(|_| SettingsError::InvalidThreshold(threshold_str.to_string()))?;
        if minimum_liquidity_threshold_eth < zero_bd() {
            return Err(SettingsError::InvalidThreshold(threshold_str.to_string()));
        }

        info!(
            "Pricing config: reference token {}, {} whitelisted anchors, liquidity floor {}",
            reference_token,
            whitelist.len(),
            minimum_liquidity_threshold_eth
        );

        Ok(Self {
            reference_token,
            stablecoin_pairs,
            whitelist,
            minimum_liquidity_threshold_eth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StablecoinPairsSettings;

    fn settings() -> PricingSettings {
        PricingSettings {
            reference_token: "0xAE13D989DAC2F0DEBFF460AC112A837C89BAA7CD".to_string(),
            stablecoin_pairs: StablecoinPairsSettings {
                primary: StablecoinPairSettings {
                    address: BSC_BUSD_WBNB_PAIR.to_string(),
                    stablecoin: PairSide::Token1,
                },
                secondary: StablecoinPairSettings {
                    address: BSC_USDT_WBNB_PAIR.to_string(),
                    stablecoin: PairSide::Token0,
                },
                supplementary: StablecoinPairSettings {
                    address: BSC_DAI_WBNB_PAIR.to_string(),
                    stablecoin: PairSide::Token1,
                },
            },
            whitelist: BSC_WHITELIST.iter().map(|t| t.to_string()).collect(),
            minimum_liquidity_threshold_eth: "2".to_string(),
        }
    }

    #[test]
    fn test_settings_match_bsc_preset() {
        let config = PricingConfig::try_from(&settings()).unwrap();
        assert_eq!(config, PricingConfig::bsc());
    }

    #[test]
    fn test_whitelist_membership_is_case_insensitive() {
        let config = PricingConfig::bsc();
        assert!(config.is_whitelisted("0xD1A4A72C351F9E51C4124040019BA7266BBFE84A"));
        assert!(!config.is_whitelisted("0x0000000000000000000000000000000000000001"));
        assert!(config.is_reference_token(BSC_WBNB));
    }

    #[test]
    fn test_rejects_invalid_address() {
        let mut s = settings();
        s.whitelist[3] = "0xbeef".to_string();

        let err = PricingConfig::try_from(&s).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::InvalidAddress { ref field, .. } if field == "whitelist[3]"
        ));
    }

    #[test]
    fn test_rejects_duplicate_whitelist_entry() {
        let mut s = settings();
        s.whitelist.push(BSC_WHITELIST[1].to_uppercase().replace("0X", "0x"));

        let err = PricingConfig::try_from(&s).unwrap_err();
        assert!(matches!(err, SettingsError::DuplicateWhitelistEntry(_)));
    }

    #[test]
    fn test_rejects_empty_whitelist() {
        let mut s = settings();
        s.whitelist.clear();
        assert!(matches!(PricingConfig::try_from(&s), Err(SettingsError::EmptyWhitelist)));
    }

    #[test]
    fn test_rejects_duplicate_stablecoin_pair() {
        let mut s = settings();
        s.stablecoin_pairs.supplementary.address = BSC_BUSD_WBNB_PAIR.to_string();

        let err = PricingConfig::try_from(&s).unwrap_err();
        assert!(matches!(err, SettingsError::DuplicateStablecoinPair(_)));
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let mut s = settings();
        s.minimum_liquidity_threshold_eth = "two".to_string();
        assert!(matches!(PricingConfig::try_from(&s), Err(SettingsError::InvalidThreshold(_))));

        s.minimum_liquidity_threshold_eth = "-1".to_string();
        assert!(matches!(PricingConfig::try_from(&s), Err(SettingsError::InvalidThreshold(_))));
    }

    #[test]
    fn test_stablecoin_orientation() {
        let pair = Pair::from_reserves(
            BSC_USDT_WBNB_PAIR,
            "0x7f4ee801aa5da021dee93a3e3ef994285a21cafa",
            BSC_WBNB,
            BigDecimal::from(3000),
            BigDecimal::from(10),
            BigDecimal::from(10),
        )
        .unwrap();
        let usdt = &PricingConfig::bsc().stablecoin_pairs.secondary;

        assert_eq!(usdt.reference_reserve(&pair), &BigDecimal::from(10));
        assert_eq!(usdt.implied_price(&pair), &BigDecimal::from(300));
    }
}
