//! Canonical test configurations.

use crate::infrastructure::config::settings::Config;

/// Defaults with every notifier off and no categories, so one cycle compares
/// every listing against every other.
#[must_use]
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.notifications.console = false;
    config.notifications.log = false;
    config.schedule.categories = Vec::new();
    config
}

/// A minimal valid config file.
pub const MINIMAL_TOML: &str = r#"
[logging]
level = "warn"

[matching]
threshold = 0.8

[arbitrage]
min_profit_pct = 2
min_liquidity = 100

[schedule]
mode = "once"
categories = ["politics", "economy"]
"#;
