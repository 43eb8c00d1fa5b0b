use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use log::debug;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{
    models::{Bundle, Pair, Token},
    EntityStore, PairLocator,
};
use crate::error::PricingError;

/// Serialized form of a [`MemoryStore`].
///
/// ```json
/// { "bundle": { "id": "1", "eth_price": "300" },
///   "tokens": [{ "id": "0x..", "symbol": "WBNB", "decimals": 18, "derived_eth": "1" }],
///   "pairs":  [{ "id": "0x..", "token0": "0x..", "token1": "0x..", "reserve0": "..", ... }] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pairs: Vec<Pair>,
}

/// In-process entity store.
///
/// Also acts as a [`PairLocator`]: every inserted pair is indexed by its
/// token pair, so lookups work in either token order.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pairs: FxHashMap<String, Pair>,
    tokens: FxHashMap<String, Token>,
    bundle: Option<Bundle>,
    /// (lower token, higher token) -> pair id
    pair_index: FxHashMap<(String, String), String>,
}

fn pair_key(token_a: &str, token_b: &str) -> (String, String) {
    let a = token_a.to_lowercase();
    let b = token_b.to_lowercase();
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, PricingError> {
        let mut store = Self::new();

        if let Some(bundle) = snapshot.bundle {
            store.set_bundle(bundle);
        }
        for token in snapshot.tokens {
            store.insert_token(token);
        }
        for pair in snapshot.pairs {
            store.insert_pair(pair)?;
        }

        debug!(
            "Loaded snapshot: {} tokens, {} pairs",
            store.tokens.len(),
            store.pairs.len()
        );

        Ok(store)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot =
            serde_json::from_str(json).context("Failed to parse entity snapshot")?;
        Ok(Self::from_snapshot(snapshot)?)
    }

    /// Insert or replace a pair.
    ///
    /// Ids are lowercased; a pair with the same token on both sides is rejected.
    pub fn insert_pair(&mut self, mut pair: Pair) -> Result<(), PricingError> {
        pair.id = pair.id.to_lowercase();
        pair.token0 = pair.token0.to_lowercase();
        pair.token1 = pair.token1.to_lowercase();

        if pair.token0 == pair.token1 {
            return Err(PricingError::IdenticalPairTokens(pair.id));
        }

        let key = pair_key(&pair.token0, &pair.token1);

        // A replaced pair may have been indexed under other tokens
        if let Some(old) = self.pairs.get(&pair.id) {
            let old_key = pair_key(&old.token0, &old.token1);
            if old_key != key && self.pair_index.get(&old_key) == Some(&pair.id) {
                self.pair_index.remove(&old_key);
            }
        }

        self.pair_index.insert(key, pair.id.clone());
        self.pairs.insert(pair.id.clone(), pair);
        Ok(())
    }

    pub fn insert_token(&mut self, mut token: Token) {
        token.id = token.id.to_lowercase();
        self.tokens.insert(token.id.clone(), token);
    }

    pub fn set_bundle(&mut self, bundle: Bundle) {
        self.bundle = Some(bundle);
    }

    /// Record a freshly derived price on a stored token.
    ///
    /// Returns false if the token is unknown.
    pub fn set_derived_eth(&mut self, token_id: &str, derived_eth: BigDecimal) -> bool {
        match self.tokens.get_mut(&token_id.to_lowercase()) {
            Some(token) => {
                token.derived_eth = Some(derived_eth);
                true
            },
            None => false,
        }
    }

    /// All stored tokens, sorted by id for deterministic iteration.
    pub fn tokens(&self) -> Vec<&Token> {
        let mut tokens: Vec<&Token> = self.tokens.values().collect();
        tokens.sort_by(|a, b| a.id.cmp(&b.id));
        tokens
    }

    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}

impl EntityStore for MemoryStore {
    fn load_pair(&self, id: &str) -> Option<Pair> {
        self.pairs.get(&id.to_lowercase()).cloned()
    }

    fn load_token(&self, id: &str) -> Option<Token> {
        self.tokens.get(&id.to_lowercase()).cloned()
    }

    fn load_bundle(&self, id: &str) -> Option<Bundle> {
        self.bundle.as_ref().filter(|b| b.id == id).cloned()
    }
}

impl PairLocator for MemoryStore {
    fn locate_pair(&self, token_a: &str, token_b: &str) -> Option<String> {
        self.pair_index.get(&pair_key(token_a, token_b)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::BUNDLE_ID;
    use std::str::FromStr;

    fn bd(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_locate_pair_either_order() {
        let mut store = MemoryStore::new();
        let pair =
            Pair::from_reserves("0xPAIR", "0xaa", "0xbb", bd("1"), bd("1"), bd("1")).unwrap();
        store.insert_pair(pair).unwrap();

        assert_eq!(store.locate_pair("0xaa", "0xbb").as_deref(), Some("0xpair"));
        assert_eq!(store.locate_pair("0xBB", "0xAA").as_deref(), Some("0xpair"));
        assert_eq!(store.locate_pair("0xaa", "0xcc"), None);
    }

    #[test]
    fn test_replacing_pair_drops_stale_index_entry() {
        let pair = |token1: &str| {
            Pair::from_reserves("0xpair", "0xaa", token1, bd("1"), bd("1"), bd("1")).unwrap()
        };

        let mut store = MemoryStore::new();
        store.insert_pair(pair("0xbb")).unwrap();
        store.insert_pair(pair("0xcc")).unwrap();

        assert_eq!(store.locate_pair("0xaa", "0xbb"), None);
        assert_eq!(store.locate_pair("0xcc", "0xaa").as_deref(), Some("0xpair"));
        assert_eq!(store.pair_count(), 1);
        assert_eq!(store.pair_index.len(), 1);
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "bundle": { "id": "1", "eth_price": "312.5" },
            "tokens": [
                { "id": "0xAA", "symbol": "AAA", "decimals": 18, "derived_eth": "0.5" },
                { "id": "0xbb", "symbol": "BBB" }
            ],
            "pairs": [{
                "id": "0xpair", "token0": "0xaa", "token1": "0xbb",
                "reserve0": "10", "reserve1": "20", "reserve_eth": "10",
                "token0_price": "0.5", "token1_price": "2"
            }]
        }"#;

        let store = MemoryStore::from_json(json).unwrap();
        assert_eq!(store.load_bundle(BUNDLE_ID).unwrap().eth_price, bd("312.5"));
        assert_eq!(store.load_token("0xaa").unwrap().derived_eth, Some(bd("0.5")));
        assert_eq!(store.load_token("0xaa").unwrap().symbol, "AAA");
        assert_eq!(store.load_token("0xbb").unwrap().derived_eth, None);
        assert_eq!(store.load_pair("0xpair").unwrap().token1_price, bd("2"));
        assert_eq!(store.pair_count(), 1);
    }

    #[test]
    fn test_snapshot_rejects_identical_tokens() {
        let json = r#"{ "pairs": [{
            "id": "0xpair", "token0": "0xaa", "token1": "0xAA",
            "reserve0": "1", "reserve1": "1", "reserve_eth": "1",
            "token0_price": "1", "token1_price": "1"
        }] }"#;

        assert!(MemoryStore::from_json(json).is_err());
    }

    #[test]
    fn test_set_derived_eth() {
        let mut store = MemoryStore::new();
        store.insert_token(Token::new("0xaa", "AAA", 18));

        assert!(store.set_derived_eth("0xAA", bd("3")));
        assert!(!store.set_derived_eth("0xcc", bd("3")));
        assert_eq!(store.load_token("0xaa").unwrap().derived_eth, Some(bd("3")));
    }
}
