use std::sync::Arc;

use anyhow::Context;
use jemallocator::Jemalloc;
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;

#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use pricewalk::{
    db::{models::BUNDLE_ID, Create2PairLocator, MemoryStore},
    EntityStore, PairLocator, PriceResolver, PricingConfig, Settings,
};

fn main() -> anyhow::Result<()> {
    SimpleLogger::new()
        .with_level(LevelFilter::Info)
        .init()
        .context("Failed to initialize logger")?;

    // Load configuration (optional path argument, defaults to ./config.yaml)
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let settings = Settings::from_file(&config_path).with_context(|| {
        format!("Failed to load {config_path}. Please ensure it exists and is valid")
    })?;

    let pricing = Arc::new(
        PricingConfig::try_from(&settings.pricing).context("Invalid pricing configuration")?,
    );

    let snapshot = std::fs::read_to_string(&settings.snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", settings.snapshot_path))?;
    let store = MemoryStore::from_json(&snapshot)?;

    info!(
        "Loaded snapshot {} ({} tokens, {} pairs)",
        settings.snapshot_path,
        store.tokens().len(),
        store.pair_count()
    );

    // Pairs are located by CREATE2 when a factory is configured,
    // otherwise through the snapshot's own pair index.
    match &settings.locator {
        Some(locator_settings) => {
            let locator = Create2PairLocator::new(
                &locator_settings.factory,
                &locator_settings.init_code_hash,
            )
            .context("Invalid locator configuration")?;
            info!("Locating pairs by CREATE2 from factory {}", locator_settings.factory);
            reprice(pricing, &store, locator)
        },
        None => reprice(pricing, &store, &store),
    }
}

fn reprice<L: PairLocator>(
    pricing: Arc<PricingConfig>,
    store: &MemoryStore,
    locator: L,
) -> anyhow::Result<()> {
    let resolver = PriceResolver::new(pricing, store, locator);

    let report = resolver
        .reprice_tokens(store.tokens())
        .context("Failed to resolve reference price")?;

    let mut bundle = store.load_bundle(BUNDLE_ID).unwrap_or_default();
    let previous = bundle.eth_price.clone();
    if bundle.update_eth_price(report.eth_price_usd.clone()) {
        info!("Reference price: {} USD (was {})", report.eth_price_usd, previous);
    } else {
        info!("Reference price: {} USD (unchanged)", report.eth_price_usd);
    }

    let symbol = |id: &str| store.load_token(id).map(|t| t.symbol).unwrap_or_default();

    for (token, derived) in &report.derived {
        info!("{} ({token}): {derived} ETH", symbol(token));
    }

    for (token, e) in &report.failures {
        warn!("{} ({token}): {e}", symbol(token));
    }

    info!(
        "Repriced {} tokens ({} failed)",
        report.derived.len(),
        report.failures.len()
    );

    Ok(())
}
