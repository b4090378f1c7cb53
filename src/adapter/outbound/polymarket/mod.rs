//! Polymarket listing source.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::PolymarketSource;
pub use settings::PolymarketConfig;
