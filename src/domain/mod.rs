//! Platform-agnostic domain types.
//!
//! - [`Listing`] and its identifiers - what a platform quotes
//! - [`normalize`] - canonical question text used for matching
//! - [`MatchScore`], [`MatchedPair`] - the outcome of matching
//! - [`ArbitrageOpportunity`] - a priced cross-platform arbitrage

pub mod error;

mod id;
mod listing;
mod matching;
mod money;
mod opportunity;
mod text;

pub use id::{Category, ListingId};
pub use listing::{Listing, ListingBuilder, Outcome, Platform};
pub use matching::{MatchCandidate, MatchScore, MatchedPair};
pub use money::{Price, Volume, PAYOUT};
pub use opportunity::{ArbitrageOpportunity, Strategy, StrategyDescription};
pub use text::{normalize, NormalizedText};
