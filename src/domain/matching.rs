//! Match scores and matched pairs.

use super::listing::Listing;

/// How confident the engine is that two listings describe the same event.
///
/// All signals are in `[0, 1]`. `semantic` is `None` when no embedding
/// signal was available for the comparison.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    pub lexical: f64,
    pub semantic: Option<f64>,
    pub confidence: f64,
    pub year_conflict: bool,
}

impl MatchScore {
    /// Score for texts whose normalized forms are identical.
    #[must_use]
    pub const fn identical() -> Self {
        Self {
            lexical: 1.0,
            semantic: None,
            confidence: 1.0,
            year_conflict: false,
        }
    }

    /// Score for texts that mention different years. Confidence is forced to zero.
    #[must_use]
    pub const fn year_conflict(lexical: f64, semantic: Option<f64>) -> Self {
        Self {
            lexical,
            semantic,
            confidence: 0.0,
            year_conflict: true,
        }
    }
}

/// A scored (A, B) pairing prior to one-to-one assignment.
///
/// Holds indices into the per-cycle listing slices rather than the listings
/// themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchCandidate {
    pub a: usize,
    pub b: usize,
    pub score: MatchScore,
}

/// Two listings, one per platform, accepted as the same event.
///
/// Within a single matching run every listing appears in at most one pair.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedPair {
    a: Listing,
    b: Listing,
    score: MatchScore,
}

impl MatchedPair {
    #[must_use]
    pub const fn new(a: Listing, b: Listing, score: MatchScore) -> Self {
        Self { a, b, score }
    }

    /// The platform A listing.
    #[must_use]
    pub const fn a(&self) -> &Listing {
        &self.a
    }

    /// The platform B listing.
    #[must_use]
    pub const fn b(&self) -> &Listing {
        &self.b
    }

    #[must_use]
    pub const fn score(&self) -> &MatchScore {
        &self.score
    }

    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.score.confidence
    }
}
