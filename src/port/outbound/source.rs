//! Listing source port.

use async_trait::async_trait;

use crate::domain::{Category, Listing, Platform};
use crate::error::Result;

/// A platform that can list its open binary markets.
///
/// Implementations exclude malformed listings themselves (logging them at
/// debug) and only fail the whole fetch on transport or payload errors.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// The platform this source fetches from.
    fn platform(&self) -> Platform;

    /// Fetch the open listings in `category`, or every open listing when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    async fn fetch(&self, category: Option<&Category>) -> Result<Vec<Listing>>;
}

/// Display helper used in logs: `"Polymarket/politics"` or `"Kalshi/*"`.
#[must_use]
pub fn source_label(platform: Platform, category: Option<&Category>) -> String {
    match category {
        Some(category) => format!("{platform}/{category}"),
        None => format!("{platform}/*"),
    }
}
