//! Offline pair address computation for Uniswap V2 style factories.

use alloy::primitives::{keccak256, Address, B256};
use anyhow::{Context, Result};

use super::PairLocator;
use crate::utils::hex_encode;

/// Computes pair addresses the way a V2 factory deploys them.
///
/// The pair address is:
/// ```text
/// create2(factory, keccak256(abi.encodePacked(token0, token1)), init_code_hash)
/// ```
///
/// Where token0 and token1 are sorted by address (lower address first).
///
/// The computed address is only a candidate: it exists whether or not the
/// factory has deployed the pair, so callers must still look it up in the
/// store.
#[derive(Debug, Clone, Copy)]
pub struct Create2PairLocator {
    factory: Address,
    init_code_hash: B256,
}

impl Create2PairLocator {
    pub fn new(factory: &str, init_code_hash: &str) -> Result<Self> {
        let factory: Address = factory
            .parse()
            .with_context(|| format!("Invalid factory address: {factory}"))?;
        let init_code_hash: B256 = init_code_hash
            .parse()
            .with_context(|| format!("Invalid init code hash: {init_code_hash}"))?;

        Ok(Self {
            factory,
            init_code_hash,
        })
    }

    /// Compute the pair address for two token addresses.
    ///
    /// Returns None for identical tokens.
    pub fn compute_pair_address(&self, token_a: Address, token_b: Address) -> Option<Address> {
        if token_a == token_b {
            return None;
        }

        // Sort tokens: lower address is token0
        let (token0, token1) = if token_a < token_b {
            (token_a, token_b)
        } else {
            (token_b, token_a)
        };

        let salt = keccak256([token0.as_slice(), token1.as_slice()].concat());

        Some(self.factory.create2(salt, self.init_code_hash))
    }
}

impl PairLocator for Create2PairLocator {
    fn locate_pair(&self, token_a: &str, token_b: &str) -> Option<String> {
        let addr_a: Address = token_a.parse().ok()?;
        let addr_b: Address = token_b.parse().ok()?;

        self.compute_pair_address(addr_a, addr_b)
            .map(|pair| hex_encode(pair.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNISWAP_V2_FACTORY: &str = "0x5C69bEe701ef814a2B6a3EDD4B1652CB9cc5aA6f";
    const UNISWAP_V2_INIT_CODE_HASH: &str =
        "0x96e8ac4277198ff8b6f785478aa9a39f403cb768dd02cbee326c3e7da348845f";

    const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
    const WETH: &str = "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2";
    const DAI: &str = "0x6b175474e89094c44da98b954eedeac495271d0f";

    fn locator() -> Create2PairLocator {
        Create2PairLocator::new(UNISWAP_V2_FACTORY, UNISWAP_V2_INIT_CODE_HASH).unwrap()
    }

    #[test]
    fn test_known_mainnet_pairs() {
        let locator = locator();

        assert_eq!(
            locator.locate_pair(USDC, WETH).as_deref(),
            Some("0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc")
        );
        assert_eq!(
            locator.locate_pair(DAI, WETH).as_deref(),
            Some("0xa478c2975ab1ea89e8196811f51a7b7ade33eb11")
        );
    }

    #[test]
    fn test_token_order_does_not_matter() {
        let locator = locator();
        assert_eq!(locator.locate_pair(WETH, USDC), locator.locate_pair(USDC, WETH));
    }

    #[test]
    fn test_identical_or_invalid_tokens_locate_nothing() {
        let locator = locator();
        assert_eq!(locator.locate_pair(WETH, WETH), None);
        assert_eq!(locator.locate_pair(WETH, "0xnothex"), None);
    }

    #[test]
    fn test_rejects_bad_configuration() {
        assert!(Create2PairLocator::new("0x1234", UNISWAP_V2_INIT_CODE_HASH).is_err());
        assert!(Create2PairLocator::new(UNISWAP_V2_FACTORY, "0xdeadbeef").is_err());
    }
}
