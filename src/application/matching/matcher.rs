//! One-to-one assignment of listings across the two platforms.

use serde::Deserialize;
use tracing::debug;

use super::scorer::{ScoreWeights, SimilarityScorer};
use super::semantic::EmbeddingTable;
use crate::domain::{normalize, Category, Listing, MatchCandidate, MatchedPair, NormalizedText};
use crate::error::{ConfigError, Result};

/// Configuration for cross-platform matching.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Minimum confidence for a pair to be accepted.
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Ask the configured embedder for a semantic signal.
    #[serde(default)]
    pub use_semantic: bool,

    #[serde(default = "default_weight")]
    pub lexical_weight: f64,

    #[serde(default = "default_weight")]
    pub semantic_weight: f64,

    /// Stop calling the embedder for the rest of the process after its first failure.
    #[serde(default)]
    pub disable_semantic_on_failure: bool,
}

const fn default_threshold() -> f64 {
    0.8
}

const fn default_weight() -> f64 {
    0.5
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            use_semantic: false,
            lexical_weight: default_weight(),
            semantic_weight: default_weight(),
            disable_semantic_on_failure: false,
        }
    }
}

impl MatchingConfig {
    #[must_use]
    pub const fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            lexical: self.lexical_weight,
            semantic: self.semantic_weight,
        }
    }
}

/// Greedy one-to-one matcher.
///
/// Every (A, B) pair in the requested category is scored; candidates below
/// the threshold are dropped; the rest are accepted in descending confidence
/// order as long as neither listing has been taken. Ties are broken by A id
/// then B id, so the result does not depend on input order.
#[derive(Debug, Clone)]
pub struct Matcher {
    threshold: f64,
    scorer: SimilarityScorer,
}

impl Matcher {
    /// Create a matcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `threshold` is outside `[0, 1]`.
    pub fn new(threshold: f64, scorer: SimilarityScorer) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "threshold",
                reason: format!("must be between 0 and 1, got {threshold}"),
            }
            .into());
        }
        Ok(Self { threshold, scorer })
    }

    /// Build a matcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the threshold is out of range.
    pub fn from_config(config: &MatchingConfig) -> Result<Self> {
        Self::new(config.threshold, SimilarityScorer::new(config.weights()))
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Match listings lexically.
    #[must_use]
    pub fn match_listings(
        &self,
        listings_a: &[Listing],
        listings_b: &[Listing],
        category: Option<&Category>,
    ) -> Vec<MatchedPair> {
        self.match_with(listings_a, listings_b, category, None)
    }

    /// Match listings, using `embeddings` for the semantic signal when given.
    #[must_use]
    pub fn match_with(
        &self,
        listings_a: &[Listing],
        listings_b: &[Listing],
        category: Option<&Category>,
        embeddings: Option<&EmbeddingTable>,
    ) -> Vec<MatchedPair> {
        let candidates = self.candidates(listings_a, listings_b, category, embeddings);
        let accepted = assign(candidates, listings_a, listings_b);

        debug!(
            category = category.map_or("*", Category::as_str),
            listings_a = listings_a.len(),
            listings_b = listings_b.len(),
            matched = accepted.len(),
            "Matched listings"
        );

        accepted
            .into_iter()
            .map(|c| MatchedPair::new(listings_a[c.a].clone(), listings_b[c.b].clone(), c.score))
            .collect()
    }

    /// Every pair in `category` scoring at or above the threshold, unordered.
    ///
    /// Listings whose text normalizes to nothing and year-conflicting pairs
    /// never become candidates.
    #[must_use]
    pub fn candidates(
        &self,
        listings_a: &[Listing],
        listings_b: &[Listing],
        category: Option<&Category>,
        embeddings: Option<&EmbeddingTable>,
    ) -> Vec<MatchCandidate> {
        let side_a = normalized_in_category(listings_a, category);
        let side_b = normalized_in_category(listings_b, category);

        let mut candidates = Vec::new();
        for (a, text_a) in &side_a {
            let embedding_a = embeddings.and_then(|t| t.get(text_a));
            for (b, text_b) in &side_b {
                let embedding_b = embeddings.and_then(|t| t.get(text_b));
                let score = self
                    .scorer
                    .score_embedded(text_a, text_b, embedding_a, embedding_b);
                if !score.year_conflict && score.confidence >= self.threshold {
                    candidates.push(MatchCandidate {
                        a: *a,
                        b: *b,
                        score,
                    });
                }
            }
        }
        candidates
    }
}

/// Normalized text for every listing in `category`, keyed by its index.
///
/// A question without a year takes the listing's resolution year.
pub(crate) fn normalized_in_category(
    listings: &[Listing],
    category: Option<&Category>,
) -> Vec<(usize, NormalizedText)> {
    listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| listing.in_category(category))
        .map(|(i, listing)| {
            let text = normalize(listing.question()).with_year_context(listing.event_year());
            (i, text)
        })
        .filter(|(_, text)| !text.is_empty())
        .collect()
}

/// Greedy assignment over candidates sorted by confidence, then ids.
fn assign(
    mut candidates: Vec<MatchCandidate>,
    listings_a: &[Listing],
    listings_b: &[Listing],
) -> Vec<MatchCandidate> {
    candidates.sort_by(|x, y| {
        y.score
            .confidence
            .total_cmp(&x.score.confidence)
            .then_with(|| listings_a[x.a].id().cmp(listings_a[y.a].id()))
            .then_with(|| listings_b[x.b].id().cmp(listings_b[y.b].id()))
            .then_with(|| x.a.cmp(&y.a).then(x.b.cmp(&y.b)))
    });

    let mut taken_a = vec![false; listings_a.len()];
    let mut taken_b = vec![false; listings_b.len()];
    let mut accepted = Vec::new();

    for candidate in candidates {
        if taken_a[candidate.a] || taken_b[candidate.b] {
            continue;
        }
        taken_a[candidate.a] = true;
        taken_b[candidate.b] = true;
        accepted.push(candidate);
    }

    accepted
}
