mod bundle;
mod pair;
mod token;

pub use bundle::{Bundle, BUNDLE_ID};
pub use pair::{Pair, PairSide};
pub use token::Token;
