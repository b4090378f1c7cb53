//! One detection cycle: fetch, match, price, notify.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::join;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::arbitrage::ArbitrageCalculator;
use crate::application::cache::{CacheError, CachedSnapshot, ListingCache};
use crate::application::matching::matcher::normalized_in_category;
use crate::application::matching::{EmbeddingTable, Matcher, SemanticSignal};
use crate::domain::error::DomainError;
use crate::domain::{ArbitrageOpportunity, Category, Listing, ListingId, Platform};
use crate::port::outbound::notifier::{
    AnomalyEvent, CycleSummaryEvent, Event, Notifier, OpportunityEvent, SkipEvent,
};

/// What happened to one category during a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOutcome {
    /// Both platforms were fetched and matched.
    Evaluated {
        pairs: usize,
        opportunities: usize,
        /// True when a stale snapshot stood in for a failed fetch.
        stale: bool,
    },
    /// A platform fetch failed; the category was left out of this cycle.
    Skipped { platform: Platform, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// `None` is the undifferentiated category.
    pub category: Option<Category>,
    pub outcome: CategoryOutcome,
}

/// A matched pair excluded because its quotes could not be priced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anomaly {
    pub listing_a: ListingId,
    pub listing_b: ListingId,
    pub error: DomainError,
}

/// Everything one cycle produced.
#[derive(Debug, Clone)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    /// Sorted by profit, highest first.
    pub opportunities: Vec<ArbitrageOpportunity>,
    pub categories: Vec<CategoryReport>,
    pub anomalies: Vec<Anomaly>,
    pub elapsed: Duration,
}

impl CycleReport {
    #[must_use]
    pub fn pairs_matched(&self) -> usize {
        self.categories
            .iter()
            .map(|c| match c.outcome {
                CategoryOutcome::Evaluated { pairs, .. } => pairs,
                CategoryOutcome::Skipped { .. } => 0,
            })
            .sum()
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.categories
            .iter()
            .filter(|c| matches!(c.outcome, CategoryOutcome::Skipped { .. }))
            .count()
    }
}

struct CategoryResult {
    report: CategoryReport,
    opportunities: Vec<ArbitrageOpportunity>,
    anomalies: Vec<Anomaly>,
}

/// The detection pipeline over a fixed set of categories.
///
/// Cycles are independent: every run reads fresh (or cached) snapshots and
/// keeps no state of its own between runs.
pub struct DetectionCycle {
    cache: Arc<ListingCache>,
    matcher: Matcher,
    semantic: SemanticSignal,
    calculator: ArbitrageCalculator,
    notifier: Arc<dyn Notifier>,
    categories: Vec<Option<Category>>,
    use_stale_on_error: bool,
}

impl DetectionCycle {
    /// Create a cycle. An empty `categories` list means one pass over the
    /// undifferentiated category.
    #[must_use]
    pub fn new(
        cache: Arc<ListingCache>,
        matcher: Matcher,
        semantic: SemanticSignal,
        calculator: ArbitrageCalculator,
        notifier: Arc<dyn Notifier>,
        categories: Vec<Category>,
    ) -> Self {
        let categories = if categories.is_empty() {
            vec![None]
        } else {
            categories.into_iter().map(Some).collect()
        };
        Self {
            cache,
            matcher,
            semantic,
            calculator,
            notifier,
            categories,
            use_stale_on_error: false,
        }
    }

    /// Proceed with the expired snapshot when a refresh fails.
    #[must_use]
    pub fn with_stale_on_error(mut self, use_stale_on_error: bool) -> Self {
        self.use_stale_on_error = use_stale_on_error;
        self
    }

    #[must_use]
    pub fn categories(&self) -> &[Option<Category>] {
        &self.categories
    }

    /// Run one full cycle over every configured category.
    pub async fn run_once(&self) -> CycleReport {
        let cycle_id = Uuid::new_v4();
        let span = info_span!("cycle", id = %cycle_id);
        self.run_cycle(cycle_id).instrument(span).await
    }

    async fn run_cycle(&self, cycle_id: Uuid) -> CycleReport {
        let started = Instant::now();
        let mut opportunities = Vec::new();
        let mut categories = Vec::with_capacity(self.categories.len());
        let mut anomalies = Vec::new();

        for category in &self.categories {
            let result = self.run_category(category.as_ref()).await;
            opportunities.extend(result.opportunities);
            anomalies.extend(result.anomalies);
            categories.push(result.report);
        }

        opportunities.sort_by(|x, y| y.profit().cmp(&x.profit()));
        for opportunity in &opportunities {
            self.notifier
                .notify(Event::OpportunityDetected(OpportunityEvent::from(opportunity)));
        }

        let report = CycleReport {
            cycle_id,
            opportunities,
            categories,
            anomalies,
            elapsed: started.elapsed(),
        };

        info!(
            categories = report.categories.len(),
            skipped = report.skipped(),
            pairs = report.pairs_matched(),
            opportunities = report.opportunities.len(),
            anomalies = report.anomalies.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Cycle finished"
        );
        self.notifier.notify(Event::CycleCompleted(CycleSummaryEvent {
            cycle_id: cycle_id.to_string(),
            categories_evaluated: report.categories.len() - report.skipped(),
            categories_skipped: report.skipped(),
            pairs_matched: report.pairs_matched(),
            opportunities: report.opportunities.len(),
            anomalies: report.anomalies.len(),
            elapsed_ms: report.elapsed.as_millis() as u64,
        }));

        report
    }

    async fn run_category(&self, category: Option<&Category>) -> CategoryResult {
        let (fetched_a, fetched_b) = join(
            self.cache.get(Platform::A, category),
            self.cache.get(Platform::B, category),
        )
        .await;

        let resolved = self
            .resolve(fetched_a)
            .and_then(|a| self.resolve(fetched_b).map(|b| (a, b)));
        let ((listings_a, stale_a), (listings_b, stale_b)) = match resolved {
            Ok(both) => both,
            Err((platform, reason)) => return self.skip(category, platform, reason),
        };

        let embeddings = self.embed(&listings_a, &listings_b, category).await;
        let pairs = self
            .matcher
            .match_with(&listings_a, &listings_b, category, embeddings.as_ref());

        let mut opportunities = Vec::new();
        let mut anomalies = Vec::new();
        for pair in &pairs {
            match self.calculator.evaluate(pair) {
                Ok(Some(opportunity)) => opportunities.push(opportunity),
                Ok(None) => {}
                Err(error) => {
                    warn!(
                        listing_a = %pair.a().id(),
                        listing_b = %pair.b().id(),
                        error = %error,
                        "Skipping pair with unpriceable quotes"
                    );
                    self.notifier.notify(Event::PriceAnomaly(AnomalyEvent {
                        listing_a: pair.a().id().to_string(),
                        listing_b: pair.b().id().to_string(),
                        reason: error.to_string(),
                    }));
                    anomalies.push(Anomaly {
                        listing_a: pair.a().id().clone(),
                        listing_b: pair.b().id().clone(),
                        error,
                    });
                }
            }
        }

        debug!(
            category = category_name(category),
            pairs = pairs.len(),
            opportunities = opportunities.len(),
            "Category evaluated"
        );

        CategoryResult {
            report: CategoryReport {
                category: category.cloned(),
                outcome: CategoryOutcome::Evaluated {
                    pairs: pairs.len(),
                    opportunities: opportunities.len(),
                    stale: stale_a || stale_b,
                },
            },
            opportunities,
            anomalies,
        }
    }

    /// Turn a cache result into listings, or the platform and reason to skip.
    fn resolve(
        &self,
        fetched: Result<CachedSnapshot, CacheError>,
    ) -> Result<(Arc<[Listing]>, bool), (Platform, String)> {
        match fetched {
            Ok(snapshot) => Ok((snapshot.listings, false)),
            Err(CacheError::Fetch {
                platform,
                stale: Some(stale),
                source,
                ..
            }) if self.use_stale_on_error => {
                warn!(
                    platform = %platform,
                    age_ms = stale.age().as_millis() as u64,
                    error = %source,
                    "Using stale listings"
                );
                Ok((stale.listings, true))
            }
            Err(error) => {
                let platform = match &error {
                    CacheError::Fetch { platform, .. } | CacheError::NoSource { platform } => {
                        *platform
                    }
                };
                Err((platform, error.to_string()))
            }
        }
    }

    fn skip(
        &self,
        category: Option<&Category>,
        platform: Platform,
        reason: String,
    ) -> CategoryResult {
        warn!(
            category = category_name(category),
            platform = %platform,
            reason = %reason,
            "Skipping category for this cycle"
        );
        self.notifier.notify(Event::CategorySkipped(SkipEvent {
            category: category_name(category).to_string(),
            platform: platform.name().to_string(),
            reason: reason.clone(),
        }));
        CategoryResult {
            report: CategoryReport {
                category: category.cloned(),
                outcome: CategoryOutcome::Skipped { platform, reason },
            },
            opportunities: Vec::new(),
            anomalies: Vec::new(),
        }
    }

    async fn embed(
        &self,
        listings_a: &[Listing],
        listings_b: &[Listing],
        category: Option<&Category>,
    ) -> Option<EmbeddingTable> {
        if !self.semantic.is_active() {
            return None;
        }

        let texts: Vec<_> = normalized_in_category(listings_a, category)
            .into_iter()
            .chain(normalized_in_category(listings_b, category))
            .map(|(_, text)| text)
            .collect();

        match self.semantic.embed(&texts).await {
            Ok(table) => table,
            Err(failure) => {
                if failure.disabled {
                    self.notifier.notify(Event::SemanticDisabled {
                        reason: failure.error.to_string(),
                    });
                }
                None
            }
        }
    }
}

fn category_name(category: Option<&Category>) -> &str {
    category.map_or("*", Category::as_str)
}
