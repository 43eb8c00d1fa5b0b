//! Shared test fixtures: BSC constants and a small priced store.

use std::{str::FromStr, sync::Arc};

use bigdecimal::BigDecimal;

use super::PriceResolver;
use crate::{
    config::PricingConfig,
    db::{
        models::{Pair, Token},
        MemoryStore,
    },
};

pub const WBNB: &str = "0xae13d989dac2f0debff460ac112a837c89baa7cd";
pub const BUSD: &str = "0xd1a4a72c351f9e51c4124040019ba7266bbfe84a";
pub const USDT: &str = "0x7f4ee801aa5da021dee93a3e3ef994285a21cafa";
pub const DAI: &str = "0xb05fb7e89dad5f717fbd78d79c2b9c04700f7a71";

pub const BUSD_WBNB_PAIR: &str = "0x2ebdff0693787275065496e393f39c372b21d62b";
pub const USDT_WBNB_PAIR: &str = "0xe244a60098478bdaa76f97f57a73a6bd536c977a";
pub const DAI_WBNB_PAIR: &str = "0xcb96e9735b34b2d4c508d147475218d0d2ab96cd";

/// Not whitelisted, sorts before WBNB
pub const TKN: &str = "0x1111111111111111111111111111111111111111";
/// Not whitelisted, sorts after every anchor
pub const HIGH: &str = "0xffffffffffffffffffffffffffffffffffffffff";

pub const TKN_WBNB_PAIR: &str = "0x00000000000000000000000000000000000000a1";
pub const TKN_BUSD_PAIR: &str = "0x00000000000000000000000000000000000000a2";
pub const HIGH_WBNB_PAIR: &str = "0x00000000000000000000000000000000000000a3";
pub const HIGH_USDT_PAIR: &str = "0x00000000000000000000000000000000000000a4";

pub fn bd(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

pub fn pair(id: &str, token0: &str, token1: &str, r0: &str, r1: &str, reserve_eth: &str) -> Pair {
    Pair::from_reserves(id, token0, token1, bd(r0), bd(r1), bd(reserve_eth)).unwrap()
}

/// WBNB is token0, BUSD token1.
pub fn busd_pair(wbnb: &str, busd: &str) -> Pair {
    let reserve_eth = bd(wbnb) * BigDecimal::from(2);
    pair(BUSD_WBNB_PAIR, WBNB, BUSD, wbnb, busd, &reserve_eth.to_string())
}

/// USDT is token0, WBNB token1.
pub fn usdt_pair(usdt: &str, wbnb: &str) -> Pair {
    let reserve_eth = bd(wbnb) * BigDecimal::from(2);
    pair(USDT_WBNB_PAIR, USDT, WBNB, usdt, wbnb, &reserve_eth.to_string())
}

/// WBNB is token0, DAI token1.
pub fn dai_pair(wbnb: &str, dai: &str) -> Pair {
    let reserve_eth = bd(wbnb) * BigDecimal::from(2);
    pair(DAI_WBNB_PAIR, WBNB, DAI, wbnb, dai, &reserve_eth.to_string())
}

/// Store holding the priced anchors WBNB (1) and BUSD (0.0033).
pub fn anchored_store() -> MemoryStore {
    let mut store = MemoryStore::new();
    store.insert_token(Token::new(WBNB, "WBNB", 18).with_derived_eth(bd("1")));
    store.insert_token(Token::new(BUSD, "BUSD", 18).with_derived_eth(bd("0.0033")));
    store
}

pub fn resolver(store: &MemoryStore) -> PriceResolver<&MemoryStore, &MemoryStore> {
    PriceResolver::new(Arc::new(PricingConfig::bsc()), store, store)
}
