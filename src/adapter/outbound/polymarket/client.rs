//! Polymarket listing source over the Gamma API.
//!
//! A category maps to a Gamma tag slug: `/events?tag_slug=<category>` returns
//! the tagged events with their markets nested. The undifferentiated category
//! reads `/markets` directly.

use async_trait::async_trait;
use tracing::{debug, info};

use super::dto::{GammaEvent, GammaMarket};
use super::settings::PolymarketConfig;
use crate::adapter::outbound::http::{endpoint, RetryingClient};
use crate::domain::{Category, Listing, Platform};
use crate::error::Result;
use crate::port::outbound::source::ListingSource;

/// HTTP client for Polymarket market discovery.
pub struct PolymarketSource {
    client: RetryingClient,
    base_url: String,
    limit: usize,
}

impl PolymarketSource {
    #[must_use]
    pub fn from_config(config: &PolymarketConfig) -> Self {
        Self {
            client: RetryingClient::from_config(&config.http),
            base_url: config.base_url.clone(),
            limit: config.limit,
        }
    }

    /// Fetch open events tagged with `category`.
    pub async fn get_events(&self, category: &Category) -> Result<Vec<GammaEvent>> {
        let url = endpoint(&self.base_url, "events");
        info!(url = %url, tag = %category, "Fetching events (Gamma)");

        let query = [
            ("closed", "false".to_string()),
            ("limit", self.limit.to_string()),
            ("tag_slug", category.as_str().to_string()),
        ];
        let events: Vec<GammaEvent> = self.client.get_json(&url, &query).await?;
        debug!(count = events.len(), "Fetched events from Gamma");

        Ok(events)
    }

    /// Fetch open markets regardless of tag.
    pub async fn get_markets(&self) -> Result<Vec<GammaMarket>> {
        let url = endpoint(&self.base_url, "markets");
        info!(url = %url, "Fetching markets (Gamma)");

        let query = [
            ("closed", "false".to_string()),
            ("limit", self.limit.to_string()),
        ];
        let markets: Vec<GammaMarket> = self.client.get_json(&url, &query).await?;
        debug!(count = markets.len(), "Fetched markets from Gamma");

        Ok(markets)
    }
}

#[async_trait]
impl ListingSource for PolymarketSource {
    fn platform(&self) -> Platform {
        Platform::A
    }

    async fn fetch(&self, category: Option<&Category>) -> Result<Vec<Listing>> {
        let markets = match category {
            Some(category) => self
                .get_events(category)
                .await?
                .into_iter()
                .flat_map(|event| event.markets)
                .collect(),
            None => self.get_markets().await?,
        };

        Ok(into_listings(markets, category))
    }
}

/// Convert markets, dropping (and logging) the ones that are not listings.
pub(crate) fn into_listings(
    markets: Vec<GammaMarket>,
    category: Option<&Category>,
) -> Vec<Listing> {
    let total = markets.len();
    let listings: Vec<Listing> = markets
        .into_iter()
        .filter_map(|market| {
            let id = market.condition_id.clone().unwrap_or_default();
            market
                .into_listing(category)
                .map_err(|reason| {
                    debug!(market = %id, reason = %reason, "Skipping Polymarket market");
                })
                .ok()
        })
        .collect();

    debug!(total, kept = listings.len(), "Converted Polymarket markets");
    listings
}
