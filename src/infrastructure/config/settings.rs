//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings. Each
//! component owns its config section; this module stitches them together,
//! applies defaults and validates the result. Secrets (`OPENAI_API_KEY`,
//! `DISCORD_WEBHOOK_URL`) are read from the environment, never the file.
//!
//! # Example
//!
//! ```no_run
//! use crossarb::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use super::logging::LoggingConfig;
use crate::adapter::outbound::embedding::EmbeddingConfig;
use crate::adapter::outbound::http::HttpConfig;
use crate::adapter::outbound::kalshi::KalshiConfig;
use crate::adapter::outbound::notifier::NotificationsConfig;
use crate::adapter::outbound::polymarket::PolymarketConfig;
use crate::application::arbitrage::ArbitrageConfig;
use crate::application::cache::CacheConfig;
use crate::application::cycle::{Mode, ScheduleConfig};
use crate::application::matching::MatchingConfig;
use crate::domain::Category;
use crate::error::{ConfigError, Result};

/// Listing source endpoints, one per platform.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcesConfig {
    #[serde(default)]
    pub polymarket: PolymarketConfig,
    #[serde(default)]
    pub kalshi: KalshiConfig,
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Similarity threshold and signal weights.
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Profit and liquidity gates.
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    /// Run mode, interval and category list.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    /// Semantic signal provider, used only when `matching.use_semantic` is set.
    #[serde(default)]
    pub embedding: EmbeddingConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,
}

impl Config {
    /// Parse and validate configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize logging from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// The configured categories, normalized.
    #[must_use]
    pub fn categories(&self) -> Vec<Category> {
        self.schedule
            .categories
            .iter()
            .map(|name| Category::from(name.as_str()))
            .collect()
    }

    /// Validate configuration values.
    ///
    /// Called by [`parse_toml`](Self::parse_toml); call again after applying
    /// command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(invalid("logging.format", "must be \"pretty\" or \"json\""));
        }

        let matching = &self.matching;
        if !(0.0..=1.0).contains(&matching.threshold) {
            return Err(invalid("matching.threshold", "must be between 0 and 1"));
        }
        if !(matching.lexical_weight >= 0.0 && matching.semantic_weight >= 0.0) {
            return Err(invalid("matching.weights", "must be 0 or greater"));
        }
        if matching.lexical_weight + matching.semantic_weight <= 0.0 {
            return Err(invalid("matching.weights", "at least one weight must be positive"));
        }
        if matching.use_semantic && self.embedding.provider != "openai" {
            return Err(invalid(
                "embedding.provider",
                format!("unsupported provider \"{}\"", self.embedding.provider),
            ));
        }
        if matching.use_semantic {
            check_url("embedding.api_url", &self.embedding.api_url)?;
        }

        let arbitrage = &self.arbitrage;
        if arbitrage.min_profit_pct < Decimal::ZERO {
            return Err(invalid("arbitrage.min_profit_pct", "must be 0 or greater"));
        }
        if arbitrage.min_liquidity < Decimal::ZERO {
            return Err(invalid("arbitrage.min_liquidity", "must be 0 or greater"));
        }
        if arbitrage.price_sum_tolerance < Decimal::ZERO
            || arbitrage.price_sum_tolerance >= Decimal::ONE
        {
            return Err(invalid(
                "arbitrage.price_sum_tolerance",
                "must be in [0, 1)",
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err(invalid("cache.ttl_secs", "must be greater than 0"));
        }

        if self.schedule.mode == Mode::Continuous && self.schedule.poll_interval_secs == 0 {
            return Err(invalid(
                "schedule.poll_interval_secs",
                "must be greater than 0 in continuous mode",
            ));
        }
        if self
            .schedule
            .categories
            .iter()
            .any(|name| name.trim().is_empty())
        {
            return Err(invalid("schedule.categories", "names must not be empty"));
        }

        let polymarket = &self.sources.polymarket;
        check_url("sources.polymarket.base_url", &polymarket.base_url)?;
        check_source("sources.polymarket", polymarket.limit, &polymarket.http)?;
        let kalshi = &self.sources.kalshi;
        check_url("sources.kalshi.base_url", &kalshi.base_url)?;
        check_source("sources.kalshi", kalshi.limit, &kalshi.http)?;

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn check_url(field: &'static str, raw: &str) -> Result<()> {
    if raw.trim().is_empty() {
        return Err(ConfigError::MissingField { field }.into());
    }
    Url::parse(raw).map_err(|e| invalid(field, e.to_string()))?;
    Ok(())
}

#[allow(clippy::result_large_err)]
fn check_source(section: &'static str, limit: usize, http: &HttpConfig) -> Result<()> {
    if limit == 0 {
        return Err(invalid(section, "limit must be greater than 0"));
    }
    if http.timeout_ms == 0 {
        return Err(invalid(section, "timeout_ms must be greater than 0"));
    }
    if http.retry_max_attempts == 0 {
        return Err(invalid(section, "retry_max_attempts must be greater than 0"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use rust_decimal_macros::dec;

    fn field_of(err: Error) -> &'static str {
        match err {
            Error::Config(ConfigError::InvalidValue { field, .. })
            | Error::Config(ConfigError::MissingField { field }) => field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.matching.threshold, 0.8);
        assert_eq!(config.arbitrage.min_profit_pct, dec!(2));
        assert_eq!(config.cache.ttl_secs, 10);
        assert_eq!(config.schedule.mode, Mode::Once);
        assert_eq!(config.categories().len(), 4);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = Config::parse_toml(
            r#"
            [matching]
            threshold = 0.75
            use_semantic = true

            [arbitrage]
            min_profit_pct = 1.5
            min_liquidity = 0

            [schedule]
            mode = "continuous"
            poll_interval_secs = 60
            categories = [" Politics ", "crypto"]

            [sources.kalshi]
            limit = 50
            timeout_ms = 2000
            "#,
        )
        .unwrap();

        assert_eq!(config.matching.threshold, 0.75);
        assert!(config.matching.use_semantic);
        assert_eq!(config.arbitrage.min_profit_pct, dec!(1.5));
        assert_eq!(config.schedule.mode, Mode::Continuous);
        assert_eq!(config.categories()[0].as_str(), "politics");
        assert_eq!(config.sources.kalshi.limit, 50);
        assert_eq!(config.sources.kalshi.http.timeout_ms, 2000);
        assert_eq!(config.sources.polymarket.limit, 100);
    }

    #[test]
    fn test_threshold_out_of_range() {
        let err = Config::parse_toml("[matching]\nthreshold = 1.5").unwrap_err();
        assert_eq!(field_of(err), "matching.threshold");
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let err = Config::parse_toml("[matching]\nlexical_weight = 0.0\nsemantic_weight = 0.0")
            .unwrap_err();
        assert_eq!(field_of(err), "matching.weights");
    }

    #[test]
    fn test_negative_gates_rejected() {
        let err = Config::parse_toml("[arbitrage]\nmin_profit_pct = -1").unwrap_err();
        assert_eq!(field_of(err), "arbitrage.min_profit_pct");

        let err = Config::parse_toml("[arbitrage]\nmin_liquidity = -5").unwrap_err();
        assert_eq!(field_of(err), "arbitrage.min_liquidity");
    }

    #[test]
    fn test_tolerance_must_be_below_one() {
        let err = Config::parse_toml("[arbitrage]\nprice_sum_tolerance = 1").unwrap_err();
        assert_eq!(field_of(err), "arbitrage.price_sum_tolerance");
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let err = Config::parse_toml("[cache]\nttl_secs = 0").unwrap_err();
        assert_eq!(field_of(err), "cache.ttl_secs");
    }

    #[test]
    fn test_zero_interval_only_rejected_in_continuous_mode() {
        assert!(Config::parse_toml("[schedule]\npoll_interval_secs = 0").is_ok());

        let err = Config::parse_toml("[schedule]\nmode = \"continuous\"\npoll_interval_secs = 0")
            .unwrap_err();
        assert_eq!(field_of(err), "schedule.poll_interval_secs");
    }

    #[test]
    fn test_bad_source_url_rejected() {
        let err = Config::parse_toml("[sources.polymarket]\nbase_url = \"not a url\"").unwrap_err();
        assert_eq!(field_of(err), "sources.polymarket.base_url");

        let err = Config::parse_toml("[sources.kalshi]\nbase_url = \"\"").unwrap_err();
        assert_eq!(field_of(err), "sources.kalshi.base_url");
    }

    #[test]
    fn test_zero_limit_rejected() {
        let err = Config::parse_toml("[sources.kalshi]\nlimit = 0").unwrap_err();
        assert_eq!(field_of(err), "sources.kalshi");
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err = Config::parse_toml("[logging]\nformat = \"xml\"").unwrap_err();
        assert_eq!(field_of(err), "logging.format");
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::parse_toml("[matching\nthreshold = ").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
