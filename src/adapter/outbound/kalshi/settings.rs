//! Kalshi source configuration.

use serde::Deserialize;

use crate::adapter::outbound::http::HttpConfig;

/// Kalshi trade API source settings.
#[derive(Debug, Clone, Deserialize)]
pub struct KalshiConfig {
    /// Trade API host.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum events per request.
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(flatten)]
    pub http: HttpConfig,
}

fn default_base_url() -> String {
    "https://api.elections.kalshi.com".into()
}

const fn default_limit() -> usize {
    200
}

impl Default for KalshiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            limit: default_limit(),
            http: HttpConfig::default(),
        }
    }
}
