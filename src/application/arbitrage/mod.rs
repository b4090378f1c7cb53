//! Arbitrage evaluation of matched pairs.

pub mod calculator;

pub use calculator::{ArbitrageCalculator, ArbitrageConfig};
