//! Kalshi trade API wire types and their conversion into listings.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::adapter::outbound::polymarket::dto::parse_timestamp;
use crate::domain::error::DomainError;
use crate::domain::{Category, Listing, ListingId, Platform};

/// Response of `GET /trade-api/v2/events`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Vec<KalshiEvent>,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KalshiEvent {
    #[serde(default)]
    pub event_ticker: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub markets: Vec<KalshiMarket>,
}

/// A Kalshi market. Prices are integer cents.
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiMarket {
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub yes_bid: Option<i64>,
    #[serde(default)]
    pub yes_ask: Option<i64>,
    #[serde(default)]
    pub no_bid: Option<i64>,
    #[serde(default)]
    pub no_ask: Option<i64>,
    #[serde(default)]
    pub volume: Option<Decimal>,
    #[serde(default)]
    pub open_interest: Option<Decimal>,
    #[serde(default)]
    pub close_time: Option<String>,
}

/// Why a Kalshi market did not become a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    NotActive(String),
    Unquoted,
    Invalid(DomainError),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotActive(status) => write!(f, "market status is {status}"),
            Self::Unquoted => write!(f, "no bid or ask on either side"),
            Self::Invalid(err) => write!(f, "{err}"),
        }
    }
}

impl KalshiMarket {
    /// Convert into a listing tagged with `category`.
    ///
    /// YES and NO are the bid/ask midpoints (or the single quoted side). A
    /// side with no quotes at all is derived as `1 - other`.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] for inactive, unquoted or invalid markets. A
    /// market reporting neither volume nor open interest is invalid.
    pub fn into_listing(self, category: Option<&Category>) -> Result<Listing, Rejection> {
        let status = self.status.as_deref().unwrap_or_default();
        if !matches!(status, "active" | "open") {
            return Err(Rejection::NotActive(status.to_string()));
        }

        let (yes, no) = match (
            mid_price(self.yes_bid, self.yes_ask),
            mid_price(self.no_bid, self.no_ask),
        ) {
            (Some(yes), Some(no)) => (yes, no),
            (Some(yes), None) => (yes, Decimal::ONE - yes),
            (None, Some(no)) => (Decimal::ONE - no, no),
            (None, None) => return Err(Rejection::Unquoted),
        };

        let mut builder = Listing::builder(Platform::B, ListingId::new(self.ticker.unwrap_or_default()))
            .question(self.title.unwrap_or_default())
            .prices(yes, no);
        // Either figure alone is enough; with neither the listing is unusable.
        let liquidity = match (self.volume, self.open_interest) {
            (None, None) => None,
            (volume, open_interest) => {
                Some(volume.unwrap_or(Decimal::ZERO) + open_interest.unwrap_or(Decimal::ZERO))
            }
        };
        if let Some(liquidity) = liquidity {
            builder = builder.liquidity(liquidity);
        }
        if let Some(category) = category {
            builder = builder.category(category.clone());
        }
        if let Some(end_date) = self.close_time.as_deref().and_then(parse_timestamp) {
            builder = builder.end_date(end_date);
        }

        builder.build().map_err(Rejection::Invalid)
    }
}

/// Midpoint of the positive quotes, in dollars.
fn mid_price(bid: Option<i64>, ask: Option<i64>) -> Option<Decimal> {
    let cents = |c: Option<i64>| c.filter(|c| *c > 0).map(|c| Decimal::new(c, 2));
    match (cents(bid), cents(ask)) {
        (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
        (Some(one), None) | (None, Some(one)) => Some(one),
        (None, None) => None,
    }
}
