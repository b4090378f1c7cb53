//! Handlers for `crossarb check` subcommands.

mod config;

pub use config::execute_config;
