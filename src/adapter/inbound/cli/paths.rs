//! Config file resolution.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Returns the default config file path (`./config.toml`).
#[must_use]
pub fn default_config() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG)
}

/// Load the configuration for a command.
///
/// An explicit path must exist. Without one, `./config.toml` is used when
/// present and built-in defaults otherwise. Returns the file actually read.
///
/// # Errors
///
/// Returns an error if the file cannot be read, parsed or validated.
#[allow(clippy::result_large_err)]
pub fn load_config(explicit: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = explicit {
        return Ok((Config::load(path)?, Some(path.to_path_buf())));
    }

    let path = default_config();
    if path.exists() {
        return Ok((Config::load(&path)?, Some(path)));
    }

    debug!("No config file found, using defaults");
    Ok((Config::default(), None))
}
