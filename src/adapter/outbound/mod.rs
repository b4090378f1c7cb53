//! Outbound adapters (driven side).

pub mod embedding;
pub mod http;
pub mod kalshi;
pub mod notifier;
pub mod polymarket;
