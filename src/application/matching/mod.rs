//! Cross-platform listing matching.
//!
//! - [`lexical`] - token-sort similarity
//! - [`scorer::SimilarityScorer`] - combines lexical, semantic and year signals
//! - [`semantic::SemanticSignal`] - optional embedding signal
//! - [`matcher::Matcher`] - greedy one-to-one assignment

pub mod lexical;
pub mod matcher;
pub mod scorer;
pub mod semantic;

pub use matcher::{Matcher, MatchingConfig};
pub use scorer::{ScoreWeights, SimilarityScorer};
pub use semantic::{EmbedFailure, EmbeddingTable, SemanticSignal};
