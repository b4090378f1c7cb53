//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for the terminal and Discord.

pub mod console;
pub mod discord;
pub mod format;
pub mod settings;

pub use console::ConsoleNotifier;
pub use discord::{DiscordConfig, DiscordNotifier};
pub use settings::NotificationsConfig;
