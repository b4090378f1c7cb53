//! Gamma API wire types and their conversion into listings.

mod market;

pub use market::{GammaEvent, GammaMarket};
pub(crate) use market::parse_timestamp;
