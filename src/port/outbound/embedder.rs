//! Text embedding port for the semantic similarity signal.

use async_trait::async_trait;

use crate::error::Result;

/// A dense vector representation of a text.
pub type Embedding = Vec<f32>;

/// Turns texts into embedding vectors.
///
/// The semantic signal is optional: the engine runs lexical-only when no
/// embedder is configured or when [`embed`](Self::embed) fails.
///
/// # Errors
///
/// [`embed`](Self::embed) returns an error for transport failures or a
/// response that does not carry one vector per input text.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Embed every text, returning vectors in input order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>>;
}

/// Cosine similarity of two vectors, clamped to `[0, 1]`.
///
/// Mismatched lengths and zero vectors yield 0.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (mut dot, mut norm_a, mut norm_b) = (0.0_f64, 0.0_f64, 0.0_f64);
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}
