//! Polymarket source configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Polymarket Gamma API source settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PolymarketConfig {
    /// Gamma API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum events (or markets, for the undifferentiated category) per request.
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(flatten)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://gamma-api.polymarket.com".into()
}

const fn default_limit() -> usize {
    100
}

impl Default for PolymarketConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            http: HttpConfig::default(),
        }
    }
}
