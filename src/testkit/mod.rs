//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`] - Listing builders with realistic defaults.
//! - [`source`] - `ScriptedSource`, a [`ListingSource`](crate::port::outbound::source::ListingSource)
//!   with fetch counters and failure injection.
//! - [`embedder`] - `FixedEmbedder` and `FailingEmbedder`.
//! - [`notifier`] - `RecordingNotifier` for event assertions.
//! - [`config`] - Canonical test configurations.

pub mod config;
pub mod domain;
pub mod embedder;
pub mod notifier;
pub mod source;
