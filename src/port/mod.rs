//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the matching-and-arbitrage core and the
//! outside world. Adapters implement them; the application layer depends
//! only on the traits.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │  cache · match · price  │
//!     ┌──────────────┤                         ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Listing │            │    Text     │              │ Notifier  │
//! │ Source  │            │  Embedder   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`outbound::source::ListingSource`] - Fetch listings from a platform
//! - [`outbound::embedder::TextEmbedder`] - Optional semantic similarity signal
//! - [`outbound::notifier::Notifier`] - Fire-and-forget alert delivery

pub mod outbound;
