pub mod locator;
pub mod memory;
pub mod models;

pub use locator::Create2PairLocator;
pub use memory::{MemoryStore, Snapshot};

use models::{Bundle, Pair, Token};

/// Read access to the indexed entities.
///
/// The pricing code never writes through this trait; persistence belongs to
/// the ingestion pipeline. Lookups are synchronous and return `None` when the
/// entity does not exist yet.
pub trait EntityStore {
    fn load_pair(&self, id: &str) -> Option<Pair>;
    fn load_token(&self, id: &str) -> Option<Token>;
    fn load_bundle(&self, id: &str) -> Option<Bundle>;
}

/// Resolves the pair between two tokens, the way a V2 factory's `getPair` does.
///
/// Returns `None` when no pair exists. Implementations must accept the tokens
/// in either order.
pub trait PairLocator {
    fn locate_pair(&self, token_a: &str, token_b: &str) -> Option<String>;
}

impl<T: EntityStore + ?Sized> EntityStore for &T {
    fn load_pair(&self, id: &str) -> Option<Pair> {
        (**self).load_pair(id)
    }

    fn load_token(&self, id: &str) -> Option<Token> {
        (**self).load_token(id)
    }

    fn load_bundle(&self, id: &str) -> Option<Bundle> {
        (**self).load_bundle(id)
    }
}

impl<T: PairLocator + ?Sized> PairLocator for &T {
    fn locate_pair(&self, token_a: &str, token_b: &str) -> Option<String> {
        (**self).locate_pair(token_a, token_b)
    }
}
