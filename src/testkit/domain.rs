//! Builders for domain primitives used across tests.
//!
//! Provides concise factory functions for [`Listing`] so tests focus on
//! assertions rather than construction boilerplate.

use rust_decimal::Decimal;

use crate::domain::{Listing, ListingId, Platform};

/// Liquidity given to listings built by [`listing`]. Clears the default gate.
pub const DEFAULT_LIQUIDITY: Decimal = Decimal::from_parts(5000, 0, 0, false, 0);

/// Build a valid listing with ample liquidity.
///
/// # Panics
///
/// Panics if the arguments do not form a valid listing.
pub fn listing(platform: Platform, id: &str, question: &str, yes: Decimal, no: Decimal) -> Listing {
    listing_with_liquidity(platform, id, question, yes, no, DEFAULT_LIQUIDITY)
}

/// Build a valid listing with explicit liquidity.
///
/// # Panics
///
/// Panics if the arguments do not form a valid listing.
pub fn listing_with_liquidity(
    platform: Platform,
    id: &str,
    question: &str,
    yes: Decimal,
    no: Decimal,
    liquidity: Decimal,
) -> Listing {
    Listing::builder(platform, ListingId::new(id))
        .question(question)
        .prices(yes, no)
        .liquidity(liquidity)
        .build()
        .expect("valid test listing")
}

/// Same as [`listing`] but tagged with `category`.
///
/// # Panics
///
/// Panics if the arguments do not form a valid listing.
pub fn categorized(
    platform: Platform,
    id: &str,
    question: &str,
    category: &str,
    yes: Decimal,
    no: Decimal,
) -> Listing {
    Listing::builder(platform, ListingId::new(id))
        .question(question)
        .category(category)
        .prices(yes, no)
        .liquidity(DEFAULT_LIQUIDITY)
        .build()
        .expect("valid test listing")
}

/// Platform A listing with ample liquidity.
pub fn listing_a(id: &str, question: &str, yes: Decimal, no: Decimal) -> Listing {
    listing(Platform::A, id, question, yes, no)
}

/// Platform B listing with ample liquidity.
pub fn listing_b(id: &str, question: &str, yes: Decimal, no: Decimal) -> Listing {
    listing(Platform::B, id, question, yes, no)
}
