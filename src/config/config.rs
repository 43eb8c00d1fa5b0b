use config::{Config, Environment, File};
use serde::Deserialize;

use crate::{db::models::PairSide, error::SettingsError};

/// One designated stablecoin/reference-currency pair.
#[derive(Debug, Deserialize, Clone)]
pub struct StablecoinPairSettings {
    pub address: String,
    /// Side of the pair holding the stablecoin (`token0` or `token1`).
    pub stablecoin: PairSide,
}

/// The three pairs the reference price is read from.
///
/// - `primary`: used alone when it is the only pair available
/// - `secondary`: averaged with `primary`, or used alone as last resort
/// - `supplementary`: only weighted in when all three pairs exist
#[derive(Debug, Deserialize, Clone)]
pub struct StablecoinPairsSettings {
    pub primary: StablecoinPairSettings,
    pub secondary: StablecoinPairSettings,
    pub supplementary: StablecoinPairSettings,
}

/// Per-network pricing constants, as written in `config.yaml`.
///
/// Validated into a [`crate::PricingConfig`] before use.
#[derive(Debug, Deserialize, Clone)]
pub struct PricingSettings {
    /// Wrapped native token used as unit of account
    pub reference_token: String,
    pub stablecoin_pairs: StablecoinPairsSettings,
    /// Anchor tokens, in lookup order
    pub whitelist: Vec<String>,
    /// Decimal string; pairs must hold strictly more reference liquidity than this
    #[serde(default = "default_minimum_liquidity_threshold_eth")]
    pub minimum_liquidity_threshold_eth: String,
}

fn default_minimum_liquidity_threshold_eth() -> String {
    "2".to_string()
}

/// V2 factory parameters for computing pair addresses offline.
#[derive(Debug, Deserialize, Clone)]
pub struct LocatorSettings {
    pub factory: String,
    pub init_code_hash: String,
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup, with `PRICEWALK_`-prefixed
/// environment overrides (`PRICEWALK_SNAPSHOT_PATH`,
/// `PRICEWALK_PRICING__MINIMUM_LIQUIDITY_THRESHOLD_ETH`, ...).
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub pricing: PricingSettings,
    /// When absent, pairs are located through the snapshot's own pair index.
    #[serde(default)]
    pub locator: Option<LocatorSettings>,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
}

fn default_snapshot_path() -> String {
    "snapshot.json".to_string()
}

impl Settings {
    pub fn new() -> Result<Self, SettingsError> {
        Self::from_file("config")
    }

    /// Load settings from `path` (extension optional, as accepted by
    /// `config::File::with_name`).
    pub fn from_file(path: &str) -> Result<Self, SettingsError> {
        let s = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("PRICEWALK")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
