//! Embedding provider configuration.

use serde::Deserialize;

/// Semantic signal provider settings. Only consulted when
/// `matching.use_semantic` is on.
#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingConfig {
    /// Provider name. Only `openai` is supported.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Embeddings endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_provider() -> String {
    "openai".into()
}

fn default_model() -> String {
    "text-embedding-3-small".into()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/embeddings".into()
}

const fn default_timeout_ms() -> u64 {
    15_000
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}
