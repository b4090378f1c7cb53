//! Deterministic text embedders.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::port::outbound::embedder::{Embedding, TextEmbedder};

/// Returns preset vectors keyed by (normalized) text.
///
/// Unknown texts get `fallback`.
#[derive(Clone)]
pub struct FixedEmbedder {
    vectors: Arc<HashMap<String, Embedding>>,
    fallback: Embedding,
    calls: Arc<AtomicUsize>,
}

impl FixedEmbedder {
    #[must_use]
    pub fn new<I, S>(vectors: I, fallback: Embedding) -> Self
    where
        I: IntoIterator<Item = (S, Embedding)>,
        S: Into<String>,
    {
        Self {
            vectors: Arc::new(vectors.into_iter().map(|(k, v)| (k.into(), v)).collect()),
            fallback,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of `embed` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextEmbedder for FixedEmbedder {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| {
                self.vectors
                    .get(text)
                    .cloned()
                    .unwrap_or_else(|| self.fallback.clone())
            })
            .collect())
    }
}

/// Fails every call with a connection error.
#[derive(Clone, Default)]
pub struct FailingEmbedder {
    calls: Arc<AtomicUsize>,
}

impl FailingEmbedder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextEmbedder for FailingEmbedder {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn embed(&self, _texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Connection("embedding service unavailable".into()))
    }
}
