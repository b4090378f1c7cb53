//! Similarity scoring between two normalized question texts.

use serde::Deserialize;

use super::lexical::token_sort_ratio;
use crate::domain::{MatchScore, NormalizedText};
use crate::port::outbound::embedder::{cosine_similarity, Embedding};

/// Relative weights of the lexical and semantic signals.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScoreWeights {
    #[serde(default = "default_weight")]
    pub lexical: f64,
    #[serde(default = "default_weight")]
    pub semantic: f64,
}

const fn default_weight() -> f64 {
    0.5
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            lexical: default_weight(),
            semantic: default_weight(),
        }
    }
}

/// Scores how likely two texts describe the same event.
///
/// The score is symmetric in its arguments. When both texts carry years
/// and the year sets differ, confidence is forced to zero regardless of the
/// other signals, identical wording included.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityScorer {
    weights: ScoreWeights,
}

impl SimilarityScorer {
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        self.weights
    }

    /// Lexical-only score.
    #[must_use]
    pub fn score(&self, a: &NormalizedText, b: &NormalizedText) -> MatchScore {
        self.score_embedded(a, b, None, None)
    }

    /// Score with the semantic signal when both embeddings are present.
    ///
    /// A missing embedding on either side falls back to the lexical score
    /// alone.
    #[must_use]
    pub fn score_embedded(
        &self,
        a: &NormalizedText,
        b: &NormalizedText,
        embedding_a: Option<&Embedding>,
        embedding_b: Option<&Embedding>,
    ) -> MatchScore {
        if a.as_str() == b.as_str() && !a.year_conflict(b) {
            return MatchScore::identical();
        }

        let lexical = token_sort_ratio(a.as_str(), b.as_str());
        let semantic = match (embedding_a, embedding_b) {
            (Some(ea), Some(eb)) => Some(cosine_similarity(ea, eb)),
            _ => None,
        };

        if a.year_conflict(b) {
            return MatchScore::year_conflict(lexical, semantic);
        }

        MatchScore {
            lexical,
            semantic,
            confidence: self.combine(lexical, semantic),
            year_conflict: false,
        }
    }

    fn combine(&self, lexical: f64, semantic: Option<f64>) -> f64 {
        let confidence = match semantic {
            Some(semantic) => {
                let ScoreWeights {
                    lexical: wl,
                    semantic: ws,
                } = self.weights;
                let total = wl + ws;
                if total > 0.0 {
                    (wl * lexical + ws * semantic) / total
                } else {
                    lexical
                }
            }
            None => lexical,
        };
        confidence.clamp(0.0, 1.0)
    }
}
