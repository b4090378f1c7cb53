//! Domain validation errors for core domain types.
//!
//! These errors are returned when a listing or a quote violates a domain
//! invariant. They describe bad data, never a crash condition: callers
//! exclude the offending listing or pair and carry on.
//!
//! # Examples
//!
//! ```
//! use crossarb::domain::error::DomainError;
//! use crossarb::domain::{Listing, ListingId, Platform};
//! use rust_decimal_macros::dec;
//!
//! // No liquidity figure: the listing is malformed and never reaches matching.
//! let result = Listing::builder(Platform::A, ListingId::new("m-1"))
//!     .question("Will it rain tomorrow?")
//!     .prices(dec!(0.60), dec!(0.40))
//!     .build();
//!
//! assert_eq!(result.unwrap_err(), DomainError::MissingField { field: "liquidity" });
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use super::listing::{Outcome, Platform};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A quoted price must lie strictly inside (0, 1).
    #[error("degenerate {outcome} price {price} on {platform} listing {listing_id}")]
    DegeneratePrice {
        /// Platform the quote came from.
        platform: Platform,
        /// Source id of the listing.
        listing_id: String,
        /// Which side of the book was quoted.
        outcome: Outcome,
        /// The offending price.
        price: Decimal,
    },

    /// YES + NO should sit near the 1.0 payout; a wide gap means stale or broken data.
    #[error("quote sum {sum} on {platform} listing {listing_id} deviates from 1 by more than {tolerance}")]
    QuoteSumOutOfRange {
        /// Platform the quote came from.
        platform: Platform,
        /// Source id of the listing.
        listing_id: String,
        /// YES + NO.
        sum: Decimal,
        /// Configured tolerance.
        tolerance: Decimal,
    },

    /// Liquidity cannot be negative.
    #[error("liquidity must not be negative, got {liquidity}")]
    NegativeLiquidity {
        /// The invalid liquidity that was provided.
        liquidity: Decimal,
    },

    /// A listing must carry question text.
    #[error("question cannot be empty")]
    EmptyQuestion,

    /// A listing must carry a source id.
    #[error("listing id cannot be empty")]
    EmptyId,

    /// A required quote or liquidity figure was not provided.
    #[error("missing {field}")]
    MissingField {
        /// Name of the missing field.
        field: &'static str,
    },
}
