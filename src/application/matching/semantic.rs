//! Optional semantic signal backed by a [`TextEmbedder`].

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::NormalizedText;
use crate::error::{Error, Result};
use crate::port::outbound::embedder::{Embedding, TextEmbedder};

/// Embeddings for one cycle, keyed by normalized text.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingTable {
    vectors: HashMap<String, Embedding>,
}

impl EmbeddingTable {
    #[must_use]
    pub fn get(&self, text: &NormalizedText) -> Option<&Embedding> {
        self.vectors.get(text.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

/// Why the semantic signal was unavailable for a cycle.
#[derive(Debug)]
pub struct EmbedFailure {
    pub error: Error,
    /// True when this failure switched the signal off for the rest of the process.
    pub disabled: bool,
}

/// Capability-gated embedding signal.
///
/// Holds no embedder when semantic matching is off. Once disabled after a
/// failure (with `disable_on_failure`), it stays off for the process.
pub struct SemanticSignal {
    embedder: Option<Arc<dyn TextEmbedder>>,
    disable_on_failure: bool,
    disabled: AtomicBool,
}

impl SemanticSignal {
    #[must_use]
    pub fn new(embedder: Option<Arc<dyn TextEmbedder>>, disable_on_failure: bool) -> Self {
        Self {
            embedder,
            disable_on_failure,
            disabled: AtomicBool::new(false),
        }
    }

    /// A signal that never embeds.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None, false)
    }

    /// Whether an embedder is configured and has not been switched off.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.embedder.is_some() && !self.disabled.load(Ordering::Relaxed)
    }

    /// Embed each distinct non-empty text once.
    ///
    /// Returns `Ok(None)` when the signal is inactive or there is nothing to
    /// embed.
    ///
    /// # Errors
    ///
    /// Returns [`EmbedFailure`] when the embedder fails or returns the wrong
    /// number of vectors. The caller falls back to lexical scoring.
    pub async fn embed<'a, I>(
        &self,
        texts: I,
    ) -> std::result::Result<Option<EmbeddingTable>, EmbedFailure>
    where
        I: IntoIterator<Item = &'a NormalizedText>,
    {
        let Some(embedder) = self.embedder.as_ref().filter(|_| self.is_active()) else {
            return Ok(None);
        };

        let distinct: Vec<String> = texts
            .into_iter()
            .filter(|t| !t.is_empty())
            .map(|t| t.as_str().to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if distinct.is_empty() {
            return Ok(None);
        }

        match request(embedder.as_ref(), &distinct).await {
            Ok(vectors) => {
                debug!(
                    provider = embedder.name(),
                    texts = distinct.len(),
                    "Embedded texts"
                );
                Ok(Some(EmbeddingTable {
                    vectors: distinct.into_iter().zip(vectors).collect(),
                }))
            }
            Err(error) => {
                let disabled = self.disable_on_failure
                    && !self.disabled.swap(true, Ordering::Relaxed);
                warn!(
                    provider = embedder.name(),
                    error = %error,
                    disabled,
                    "Embedding failed, falling back to lexical matching"
                );
                Err(EmbedFailure { error, disabled })
            }
        }
    }
}

async fn request(embedder: &dyn TextEmbedder, texts: &[String]) -> Result<Vec<Embedding>> {
    let vectors = embedder.embed(texts).await?;
    if vectors.len() != texts.len() {
        return Err(Error::Embedding(format!(
            "expected {} vectors, got {}",
            texts.len(),
            vectors.len()
        )));
    }
    Ok(vectors)
}
