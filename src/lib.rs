pub mod config;
pub mod db;
pub mod error;
pub mod pricing;
pub mod utils;

pub use config::{PricingConfig, Settings};
pub use db::{EntityStore, MemoryStore, PairLocator};
pub use error::{PricingError, SettingsError};
pub use pricing::{PriceResolver, RepriceReport};
