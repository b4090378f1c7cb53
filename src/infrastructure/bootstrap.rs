//! Composition root: turns a [`Config`] into a runnable detection engine.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::embedding::OpenAiEmbedder;
use crate::adapter::outbound::kalshi::KalshiSource;
use crate::adapter::outbound::notifier::{ConsoleNotifier, DiscordConfig, DiscordNotifier};
use crate::adapter::outbound::polymarket::PolymarketSource;
use crate::application::arbitrage::ArbitrageCalculator;
use crate::application::cache::ListingCache;
use crate::application::cycle::{DetectionCycle, Scheduler};
use crate::application::matching::{Matcher, SemanticSignal};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::embedder::TextEmbedder;
use crate::port::outbound::notifier::{LogNotifier, Notifier, NotifierRegistry};
use crate::port::outbound::source::ListingSource;

/// Build one listing source per platform.
#[must_use]
pub fn build_sources(config: &Config) -> Vec<Arc<dyn ListingSource>> {
    vec![
        Arc::new(PolymarketSource::from_config(&config.sources.polymarket)),
        Arc::new(KalshiSource::from_config(&config.sources.kalshi)),
    ]
}

/// Build the embedder when the semantic signal is enabled.
///
/// A missing API key is not fatal: matching falls back to lexical only.
#[must_use]
pub fn build_embedder(config: &Config) -> Option<Arc<dyn TextEmbedder>> {
    if !config.matching.use_semantic {
        return None;
    }

    match OpenAiEmbedder::from_env(&config.embedding) {
        Ok(embedder) => {
            info!(model = %config.embedding.model, "Semantic matching enabled");
            Some(Arc::new(embedder))
        }
        Err(e) => {
            warn!(error = %e, "Semantic matching requested but unavailable, using lexical only");
            None
        }
    }
}

/// Build the notifier registry from the `[notifications]` section.
///
/// Must be called from within a tokio runtime when Discord is enabled.
#[must_use]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let notifications = &config.notifications;
    let mut registry = NotifierRegistry::new();

    if notifications.log {
        registry.register(Box::new(LogNotifier));
    }
    if notifications.console {
        registry.register(Box::new(ConsoleNotifier::new(notifications.color)));
    }
    if notifications.discord {
        if let Some(discord) = DiscordConfig::from_env() {
            registry.register(Box::new(DiscordNotifier::new(discord)));
            info!("Discord notifier enabled");
        } else {
            warn!("Discord enabled but DISCORD_WEBHOOK_URL not set");
        }
    }

    registry
}

/// Assemble a detection cycle from explicit collaborators.
///
/// # Errors
///
/// Returns a configuration error if the matching threshold is invalid.
pub fn assemble_cycle(
    config: &Config,
    sources: Vec<Arc<dyn ListingSource>>,
    embedder: Option<Arc<dyn TextEmbedder>>,
    notifier: Arc<dyn Notifier>,
) -> Result<DetectionCycle> {
    let cache = Arc::new(ListingCache::new(sources, config.cache.ttl()));
    let matcher = Matcher::from_config(&config.matching)?;
    let semantic = SemanticSignal::new(embedder, config.matching.disable_semantic_on_failure);
    let calculator = ArbitrageCalculator::from_config(&config.arbitrage);

    Ok(DetectionCycle::new(
        cache,
        matcher,
        semantic,
        calculator,
        notifier,
        config.categories(),
    )
    .with_stale_on_error(config.schedule.use_stale_on_error))
}

/// Build the production scheduler: live sources and the configured embedder,
/// reporting to `notifier`.
///
/// # Errors
///
/// Returns a configuration error if the matching threshold is invalid.
pub fn build_scheduler(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Scheduler> {
    let cycle = assemble_cycle(
        config,
        build_sources(config),
        build_embedder(config),
        notifier,
    )?;

    info!(
        categories = ?config.schedule.categories,
        mode = ?config.schedule.mode,
        threshold = config.matching.threshold,
        "Detection engine assembled"
    );

    Ok(Scheduler::new(
        Arc::new(cycle),
        config.schedule.mode,
        config.schedule.poll_interval(),
    ))
}
