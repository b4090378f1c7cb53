//! Kalshi listing source over the public trade API.
//!
//! Open events are read with their markets nested and filtered locally by
//! the event's category, since the trade API has no category query.

use async_trait::async_trait;
use tracing::{debug, info};

use super::dto::{EventsResponse, KalshiEvent};
use super::settings::KalshiConfig;
use crate::adapter::outbound::http::{endpoint, RetryingClient};
use crate::domain::{Category, Listing, Platform};
use crate::error::Result;
use crate::port::outbound::source::ListingSource;

const EVENTS_PATH: &str = "trade-api/v2/events";

/// Kalshi event categories each engine category covers.
const CATEGORY_ALIASES: &[(&str, &[&str])] = &[
    ("politics", &["politics", "elections", "world"]),
    ("economy", &["economics", "financials", "companies"]),
    ("crypto", &["crypto"]),
    ("sports", &["sports"]),
    ("climate", &["climate and weather", "climate"]),
    ("science", &["science and technology", "tech"]),
];

/// HTTP client for Kalshi market discovery.
pub struct KalshiSource {
    client: RetryingClient,
    base_url: String,
    limit: usize,
}

impl KalshiSource {
    #[must_use]
    pub fn from_config(config: &KalshiConfig) -> Self {
        Self {
            client: RetryingClient::from_config(&config.http),
            base_url: config.base_url.clone(),
            limit: config.limit,
        }
    }

    /// Fetch one page of open events with nested markets.
    pub async fn get_events(&self) -> Result<Vec<KalshiEvent>> {
        let url = endpoint(&self.base_url, EVENTS_PATH);
        info!(url = %url, "Fetching events (Kalshi)");

        let query = [
            ("status", "open".to_string()),
            ("with_nested_markets", "true".to_string()),
            ("limit", self.limit.to_string()),
        ];
        let response: EventsResponse = self.client.get_json(&url, &query).await?;
        debug!(
            count = response.events.len(),
            more = response.cursor.as_deref().is_some_and(|c| !c.is_empty()),
            "Fetched events from Kalshi"
        );

        Ok(response.events)
    }
}

#[async_trait]
impl ListingSource for KalshiSource {
    fn platform(&self) -> Platform {
        Platform::B
    }

    async fn fetch(&self, category: Option<&Category>) -> Result<Vec<Listing>> {
        let events = self.get_events().await?;
        Ok(into_listings(events, category))
    }
}

/// Whether a Kalshi event category falls under `category`.
///
/// Categories without an alias entry match the Kalshi name literally.
#[must_use]
pub fn covers(category: &Category, kalshi_category: &str) -> bool {
    let kalshi = kalshi_category.trim().to_lowercase();
    CATEGORY_ALIASES
        .iter()
        .find(|(name, _)| *name == category.as_str())
        .map_or(kalshi == category.as_str(), |(_, names)| {
            names.contains(&kalshi.as_str())
        })
}

/// Keep the events in `category` and convert their markets.
pub(crate) fn into_listings(events: Vec<KalshiEvent>, category: Option<&Category>) -> Vec<Listing> {
    let mut total = 0;
    let listings: Vec<Listing> = events
        .into_iter()
        .filter(|event| match category {
            Some(category) => covers(category, event.category.as_deref().unwrap_or_default()),
            None => true,
        })
        .flat_map(|event| event.markets)
        .filter_map(|market| {
            total += 1;
            let ticker = market.ticker.clone().unwrap_or_default();
            market
                .into_listing(category)
                .map_err(|reason| {
                    debug!(market = %ticker, reason = %reason, "Skipping Kalshi market");
                })
                .ok()
        })
        .collect();

    debug!(total, kept = listings.len(), "Converted Kalshi markets");
    listings
}
