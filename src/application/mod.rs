//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate ports to implement
//! cross-platform matching and arbitrage detection.

pub mod arbitrage;
pub mod cache;
pub mod cycle;
pub mod matching;
