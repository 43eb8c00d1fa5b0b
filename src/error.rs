use thiserror::Error;

/// Failures surfaced by the price resolver and attributors.
///
/// Missing stablecoin pairs and missing whitelist pairs are not errors; they
/// degrade to a lower pricing tier or are skipped. The variants below are
/// caller contract violations or arithmetic failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("bundle {0} not found in store")]
    BundleNotFound(String),

    #[error("token {0} not found in store")]
    TokenNotFound(String),

    #[error("token {0} has no derived reference price yet")]
    UnpricedToken(String),

    #[error("pair {0} has the same token on both sides")]
    IdenticalPairTokens(String),

    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),
}

/// Invalid or unloadable pricing configuration.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{field}: invalid address {value}")]
    InvalidAddress { field: String, value: String },

    #[error("invalid minimum liquidity threshold {0}: expected a non-negative decimal")]
    InvalidThreshold(String),

    #[error("whitelist must contain at least one token")]
    EmptyWhitelist,

    #[error("token {0} appears more than once in the whitelist")]
    DuplicateWhitelistEntry(String),

    #[error("stablecoin pair {0} is configured more than once")]
    DuplicateStablecoinPair(String),
}
