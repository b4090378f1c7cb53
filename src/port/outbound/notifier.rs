//! Notifier port for event notifications.
//!
//! This module defines the trait for sending notifications about detection
//! events such as arbitrage opportunities, skipped categories and cycle
//! summaries.

use rust_decimal::Decimal;
use tokio::task::JoinHandle;

use crate::domain::{ArbitrageOpportunity, Listing, Price, Volume};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// Arbitrage opportunity detected.
    OpportunityDetected(OpportunityEvent),
    /// A category was skipped for one cycle because a fetch failed.
    CategorySkipped(SkipEvent),
    /// A matched pair carried quotes that cannot be priced.
    PriceAnomaly(AnomalyEvent),
    /// The semantic signal was switched off for the rest of the process.
    SemanticDisabled {
        /// Why the embedder was given up on.
        reason: String,
    },
    /// A detection cycle finished.
    CycleCompleted(CycleSummaryEvent),
}

/// One platform's side of an opportunity.
#[derive(Debug, Clone)]
pub struct LegDetail {
    /// Platform display name.
    pub platform: String,
    /// Listing id on that platform.
    pub listing_id: String,
    /// The question as the platform words it.
    pub question: String,
    pub yes_price: Price,
    pub no_price: Price,
    pub liquidity: Volume,
}

impl From<&Listing> for LegDetail {
    fn from(listing: &Listing) -> Self {
        Self {
            platform: listing.platform().name().to_string(),
            listing_id: listing.id().to_string(),
            question: listing.question().to_string(),
            yes_price: listing.yes_price(),
            no_price: listing.no_price(),
            liquidity: listing.liquidity(),
        }
    }
}

/// Opportunity detection event.
#[derive(Debug, Clone)]
pub struct OpportunityEvent {
    /// Platform A side.
    pub leg_a: LegDetail,
    /// Platform B side.
    pub leg_b: LegDetail,
    /// Match confidence in `[0, 1]`.
    pub confidence: f64,
    /// Strategy wire name (`yes_a_no_b` / `no_a_yes_b`).
    pub strategy: String,
    /// First trade instruction.
    pub action_a: String,
    /// Second trade instruction.
    pub action_b: String,
    /// Why the pair of trades is risk-free.
    pub explanation: String,
    /// Combined cost of both legs.
    pub total_cost: Price,
    /// Guaranteed profit per share pair.
    pub profit: Price,
    /// Profit as a percentage of the payout.
    pub profit_pct: Decimal,
    /// Profit as a percentage of the cost.
    pub return_on_cost_pct: Decimal,
}

impl From<&ArbitrageOpportunity> for OpportunityEvent {
    fn from(opp: &ArbitrageOpportunity) -> Self {
        let description = opp.describe();
        Self {
            leg_a: LegDetail::from(opp.pair().a()),
            leg_b: LegDetail::from(opp.pair().b()),
            confidence: opp.confidence(),
            strategy: opp.strategy().to_string(),
            action_a: description.action_a,
            action_b: description.action_b,
            explanation: description.explanation.to_string(),
            total_cost: opp.total_cost(),
            profit: opp.profit(),
            profit_pct: opp.profit_pct(),
            return_on_cost_pct: opp.return_on_cost_pct(),
        }
    }
}

/// Category skipped event.
#[derive(Debug, Clone)]
pub struct SkipEvent {
    /// Category name, `*` for the undifferentiated category.
    pub category: String,
    /// Platform whose fetch failed.
    pub platform: String,
    /// The fetch error.
    pub reason: String,
}

/// Unpriceable quote event.
#[derive(Debug, Clone)]
pub struct AnomalyEvent {
    /// Listing id on platform A.
    pub listing_a: String,
    /// Listing id on platform B.
    pub listing_b: String,
    /// The domain error describing the bad quote.
    pub reason: String,
}

/// End-of-cycle summary event.
#[derive(Debug, Clone)]
pub struct CycleSummaryEvent {
    /// Cycle id, also attached to the cycle's log span.
    pub cycle_id: String,
    /// Categories that were matched this cycle.
    pub categories_evaluated: usize,
    /// Categories skipped after a fetch failure.
    pub categories_skipped: usize,
    /// Matched pairs across all categories.
    pub pairs_matched: usize,
    /// Opportunities that passed every gate.
    pub opportunities: usize,
    /// Pairs excluded for bad quotes.
    pub anomalies: usize,
    /// Wall time of the cycle in milliseconds.
    pub elapsed_ms: u64,
}

/// Trait for notification handlers.
///
/// Implement this trait to receive events from the detection cycle.
/// Notifications are fire-and-forget.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - The `notify` method should not block or perform slow I/O synchronously
/// - Spawn a task for HTTP delivery and hand its handle out from `close`
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);

    /// Stop accepting events.
    ///
    /// Notifiers that deliver in the background return a handle that
    /// completes once every queued event has been delivered. Events sent
    /// after `close` are dropped.
    fn close(&self) -> Option<JoinHandle<()>> {
        None
    }
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Close every notifier and wait for their queued deliveries.
    pub async fn flush(&self) {
        let pending: Vec<JoinHandle<()>> =
            self.notifiers.iter().filter_map(|n| n.close()).collect();
        for handle in pending {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Notifier worker failed during shutdown");
            }
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for NotifierRegistry {
    fn notify(&self, event: Event) {
        self.notify_all(event);
    }

    fn close(&self) -> Option<JoinHandle<()>> {
        let pending: Vec<JoinHandle<()>> =
            self.notifiers.iter().filter_map(|n| n.close()).collect();
        if pending.is_empty() {
            return None;
        }
        Some(tokio::spawn(async move {
            for handle in pending {
                let _ = handle.await;
            }
        }))
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that logs events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        use tracing::{info, warn};
        match event {
            Event::OpportunityDetected(e) => {
                info!(
                    listing_a = %e.leg_a.listing_id,
                    listing_b = %e.leg_b.listing_id,
                    strategy = %e.strategy,
                    cost = %e.total_cost,
                    profit_pct = %e.profit_pct,
                    confidence = e.confidence,
                    "Opportunity detected"
                );
            }
            Event::CategorySkipped(e) => {
                warn!(
                    category = %e.category,
                    platform = %e.platform,
                    reason = %e.reason,
                    "Category skipped"
                );
            }
            Event::PriceAnomaly(e) => {
                warn!(
                    listing_a = %e.listing_a,
                    listing_b = %e.listing_b,
                    reason = %e.reason,
                    "Price anomaly"
                );
            }
            Event::SemanticDisabled { reason } => {
                warn!(reason = %reason, "Semantic matching disabled");
            }
            Event::CycleCompleted(e) => {
                info!(
                    cycle_id = %e.cycle_id,
                    categories = e.categories_evaluated,
                    skipped = e.categories_skipped,
                    pairs = e.pairs_matched,
                    opportunities = e.opportunities,
                    anomalies = e.anomalies,
                    elapsed_ms = e.elapsed_ms,
                    "Cycle completed"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    struct Counting(Arc<Mutex<usize>>);

    impl Notifier for Counting {
        fn notify(&self, _event: Event) {
            *self.0.lock() += 1;
        }
    }

    fn skipped() -> Event {
        Event::CategorySkipped(SkipEvent {
            category: "politics".into(),
            platform: "Kalshi".into(),
            reason: "timeout".into(),
        })
    }

    #[test]
    fn registry_broadcasts_to_every_notifier() {
        let count = Arc::new(Mutex::new(0));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(Counting(Arc::clone(&count))));
        registry.register(Box::new(Counting(Arc::clone(&count))));
        registry.register(Box::new(NullNotifier));

        registry.notify(skipped());

        assert_eq!(registry.len(), 3);
        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn empty_registry_is_a_no_op() {
        let registry = NotifierRegistry::default();
        assert!(registry.is_empty());
        registry.notify_all(skipped());
    }

    struct Queued {
        delivered: Arc<Mutex<usize>>,
    }

    impl Notifier for Queued {
        fn notify(&self, _event: Event) {}

        fn close(&self) -> Option<JoinHandle<()>> {
            let delivered = Arc::clone(&self.delivered);
            Some(tokio::spawn(async move {
                tokio::task::yield_now().await;
                *delivered.lock() += 1;
            }))
        }
    }

    #[tokio::test]
    async fn flush_waits_for_background_notifiers() {
        let delivered = Arc::new(Mutex::new(0));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(NullNotifier));
        registry.register(Box::new(Queued {
            delivered: Arc::clone(&delivered),
        }));
        registry.register(Box::new(Queued {
            delivered: Arc::clone(&delivered),
        }));

        registry.flush().await;

        assert_eq!(*delivered.lock(), 2);
    }

    #[tokio::test]
    async fn registry_close_joins_its_notifiers() {
        let delivered = Arc::new(Mutex::new(0));
        let mut registry = NotifierRegistry::new();
        registry.register(Box::new(Queued {
            delivered: Arc::clone(&delivered),
        }));

        registry.close().unwrap().await.unwrap();
        assert_eq!(*delivered.lock(), 1);

        assert!(NotifierRegistry::new().close().is_none());
    }

    #[test]
    fn log_notifier_accepts_every_event() {
        LogNotifier.notify(skipped());
        LogNotifier.notify(Event::SemanticDisabled {
            reason: "401".into(),
        });
    }
}
