//! Kalshi listing source.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::KalshiSource;
pub use settings::KalshiConfig;
