//! Notification sink configuration.

use serde::Deserialize;

/// Which notifiers to register. The Discord webhook URL itself comes from
/// `DISCORD_WEBHOOK_URL`.
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    /// Print opportunity blocks to stdout.
    #[serde(default = "default_true")]
    pub console: bool,
    /// Colorize console output.
    #[serde(default = "default_true")]
    pub color: bool,
    /// Log every event through tracing.
    #[serde(default = "default_true")]
    pub log: bool,
    /// Post opportunities to Discord when the webhook is configured.
    #[serde(default)]
    pub discord: bool,
}

const fn default_true() -> bool {
    true
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            console: true,
            color: true,
            log: true,
            discord: false,
        }
    }
}
