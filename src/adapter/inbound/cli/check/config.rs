use std::path::Path;

use crate::adapter::inbound::cli::{output, paths};
use crate::error::Result;

/// Validate the configuration without fetching anything.
#[allow(clippy::result_large_err)]
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    let (config, used) = paths::load_config(config_path)?;

    output::section("Configuration Check");
    match &used {
        Some(path) => {
            output::field("Config", path.display());
            output::success("Configuration file is valid");
        }
        None => output::warning("No config file found, built-in defaults apply"),
    }

    output::section("Summary");
    output::field("Mode", config.schedule.mode);
    let categories = if config.schedule.categories.is_empty() {
        "* (all listings)".to_string()
    } else {
        config.schedule.categories.join(", ")
    };
    output::field("Categories", categories);
    output::field("Threshold", config.matching.threshold);
    output::field("Min profit", format!("{}%", config.arbitrage.min_profit_pct));
    output::field("Min liquidity", config.arbitrage.min_liquidity);
    output::field("Cache TTL", format!("{}s", config.cache.ttl_secs));

    if config.matching.use_semantic {
        if std::env::var("OPENAI_API_KEY").is_ok() {
            output::success("Semantic matching configured");
        } else {
            output::warning("Semantic matching enabled but OPENAI_API_KEY is not set");
        }
    } else {
        output::field("Semantic", "disabled");
    }

    if config.notifications.discord {
        if std::env::var("DISCORD_WEBHOOK_URL").is_ok() {
            output::success("Discord webhook configured");
        } else {
            output::warning("Discord enabled but DISCORD_WEBHOOK_URL is not set");
        }
    }

    output::success("Configuration check complete");

    Ok(())
}
