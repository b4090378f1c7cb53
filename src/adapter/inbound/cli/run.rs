//! Handler for the `run` command.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{output, paths};
use crate::application::cycle::{Mode, RunSummary};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::notifier::Notifier;

/// Upper bound on waiting for background notifiers after the last cycle.
const NOTIFIER_DRAIN_TIMEOUT: Duration = Duration::from_secs(15);

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<RunSummary> {
    let (config, used) = paths::load_config(args.config.as_deref())?;
    let mut config = apply_overrides(config, args)?;
    if output::is_json() {
        config.notifications.console = false;
    }

    config.init_logging();
    info!(
        config = %used.as_ref().map_or("<defaults>".into(), |p| p.display().to_string()),
        "crossarb starting"
    );
    print_startup(&config);

    let notifiers = Arc::new(bootstrap::build_notifier_registry(&config));
    let notifier: Arc<dyn Notifier> = Arc::clone(&notifiers) as Arc<dyn Notifier>;
    let scheduler = bootstrap::build_scheduler(&config, notifier)?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        } else {
            warn!("Failed to listen for Ctrl-C");
        }
    });

    let summary = scheduler.run(shutdown_rx).await;
    if tokio::time::timeout(NOTIFIER_DRAIN_TIMEOUT, notifiers.flush())
        .await
        .is_err()
    {
        warn!("Timed out delivering queued notifications");
    }
    print_summary(&summary);
    info!(cycles = summary.cycles, "crossarb stopped");

    Ok(summary)
}

/// Fold command-line flags into the loaded configuration and re-validate.
///
/// # Errors
///
/// Returns a configuration error if an override is out of range.
#[allow(clippy::result_large_err)]
pub fn apply_overrides(mut config: Config, args: &RunArgs) -> Result<Config> {
    if args.once {
        config.schedule.mode = Mode::Once;
    }
    if args.continuous {
        config.schedule.mode = Mode::Continuous;
    }
    if let Some(interval) = args.interval {
        config.schedule.poll_interval_secs = interval;
    }
    if !args.categories.is_empty() {
        config.schedule.categories = args.categories.clone();
    }
    if let Some(threshold) = args.threshold {
        config.matching.threshold = threshold;
    }
    if let Some(min_profit) = args.min_profit {
        config.arbitrage.min_profit_pct = min_profit;
    }
    if let Some(min_liquidity) = args.min_liquidity {
        config.arbitrage.min_liquidity = min_liquidity;
    }
    if args.semantic {
        config.matching.use_semantic = true;
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.format = "json".into();
    }

    config.validate()?;
    Ok(config)
}

fn print_startup(config: &Config) {
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Mode", config.schedule.mode);
    if config.schedule.mode == Mode::Continuous {
        output::field("Interval", format!("{}s", config.schedule.poll_interval_secs));
    }
    let categories = if config.schedule.categories.is_empty() {
        "*".to_string()
    } else {
        config.schedule.categories.join(", ")
    };
    output::field("Categories", categories);
    output::field("Threshold", config.matching.threshold);
    output::field(
        "Gates",
        format!(
            "profit ≥ {}%, liquidity ≥ {}",
            config.arbitrage.min_profit_pct, config.arbitrage.min_liquidity
        ),
    );
}

fn print_summary(summary: &RunSummary) {
    output::section("Summary");
    output::field("Cycles", summary.cycles);
    output::field("Opportunities", summary.opportunities);

    let Some(report) = &summary.last_report else {
        return;
    };

    for category in &report.categories {
        output::category(category);
    }
    for opp in &report.opportunities {
        output::opportunity(opp);
    }

    if report.opportunities.is_empty() {
        output::success("No opportunities this cycle");
    }
}
