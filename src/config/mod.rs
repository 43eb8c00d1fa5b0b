#[allow(clippy::module_inception)]
mod config;
mod pricing;

pub use config::{
    LocatorSettings, PricingSettings, Settings, StablecoinPairSettings, StablecoinPairsSettings,
};
pub use pricing::{PricingConfig, StablecoinPair, StablecoinPairs};
