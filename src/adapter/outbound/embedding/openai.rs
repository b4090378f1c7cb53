//! OpenAI embeddings client.
//!
//! Provides an implementation of the [`TextEmbedder`] trait for the OpenAI
//! Embeddings API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::settings::EmbeddingConfig;
use crate::error::{ConfigError, Error, Result};
use crate::port::outbound::embedder::{Embedding, TextEmbedder};

/// OpenAI Embeddings API client.
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: Client,
    api_key: String,
    /// Model identifier (e.g. "text-embedding-3-small").
    model: String,
    api_url: String,
}

impl OpenAiEmbedder {
    /// Create a new client with explicit configuration.
    #[must_use]
    pub fn new(api_key: impl Into<String>, config: &EmbeddingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key: api_key.into(),
            model: config.model.clone(),
            api_url: config.api_url.clone(),
        }
    }

    /// Create a client from the `OPENAI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env(config: &EmbeddingConfig) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(api_key, config))
    }
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct Response {
    data: Vec<Datum>,
}

#[derive(Deserialize)]
struct Datum {
    index: usize,
    embedding: Embedding,
}

/// Put vectors back in input order and check that every input got one.
fn ordered(mut data: Vec<Datum>, expected: usize) -> Result<Vec<Embedding>> {
    data.sort_by_key(|d| d.index);
    let in_order = data.iter().enumerate().all(|(i, d)| d.index == i);
    if data.len() != expected || !in_order {
        return Err(Error::Embedding(format!(
            "expected {expected} embeddings, got {}",
            data.len()
        )));
    }
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[async_trait]
impl TextEmbedder for OpenAiEmbedder {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let request = Request {
            model: &self.model,
            input: texts,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        ordered(response.data, texts.len())
    }
}
