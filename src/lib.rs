//! Crossarb - cross-platform prediction market matching and arbitrage detection.
//!
//! Two platforms list binary YES/NO questions about the same real-world
//! events. This crate fetches both platforms' open listings, pairs up the
//! ones that ask the same question, and reports pairs whose prices allow a
//! guaranteed profit by buying complementary outcomes on the two sides.
//!
//! # Architecture
//!
//! - **`domain`** - Listings, match scores, opportunities and text normalization
//! - **`port`** - Seams to the outside world: listing sources, embedder, notifier
//! - **`application`** - Matching, arbitrage pricing, the listing cache and the
//!   detection cycle
//! - **`adapter`** - Polymarket and Kalshi sources, OpenAI embeddings, console
//!   and Discord notifiers, and the CLI
//! - **`infrastructure`** - Configuration and runtime wiring
//!
//! # Features
//!
//! - `testkit` - Scripted sources, fixed embedders and recording notifiers for tests
//!
//! # Example
//!
//! ```
//! use crossarb::application::arbitrage::ArbitrageCalculator;
//! use crossarb::domain::{Listing, ListingId, MatchScore, MatchedPair, Platform};
//! use rust_decimal_macros::dec;
//!
//! let a = Listing::builder(Platform::A, ListingId::new("0xfed"))
//!     .question("Will the Fed cut rates in March 2025?")
//!     .prices(dec!(0.35), dec!(0.65))
//!     .liquidity(dec!(5000))
//!     .build()
//!     .unwrap();
//! let b = Listing::builder(Platform::B, ListingId::new("KXFED"))
//!     .question("Fed rate cut in March 2025?")
//!     .prices(dec!(0.40), dec!(0.58))
//!     .liquidity(dec!(5000))
//!     .build()
//!     .unwrap();
//!
//! let pair = MatchedPair::new(a, b, MatchScore::identical());
//! let opportunity = ArbitrageCalculator::default().evaluate(&pair).unwrap();
//! assert!(opportunity.is_some());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
