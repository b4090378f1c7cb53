//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use crossarb::application::cycle::DetectionCycle;
use crossarb::domain::{Listing, Platform};
use crossarb::infrastructure::bootstrap::assemble_cycle;
use crossarb::infrastructure::config::Config;
use crossarb::port::outbound::embedder::TextEmbedder;
use crossarb::port::outbound::source::ListingSource;
use crossarb::testkit::domain::{categorized, listing_a, listing_b};
use crossarb::testkit::notifier::RecordingNotifier;
use crossarb::testkit::source::ScriptedSource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const FED_A: &str = "Will the Fed cut rates in March 2025?";
pub const FED_B: &str = "Fed cut rates in March 2025";
pub const TRUMP_A: &str = "Will Donald Trump win the 2028 election?";
pub const TRUMP_B: &str = "Trump win 2028 election";

/// YES A + NO B costs 0.93: a 7% opportunity.
pub fn fed_pair() -> (Listing, Listing) {
    (
        listing_a("0xfed", FED_A, dec!(0.35), dec!(0.65)),
        listing_b("KXFED-25MAR", FED_B, dec!(0.40), dec!(0.58)),
    )
}

/// NO A + YES B costs 0.95: a 5% opportunity.
pub fn trump_pair() -> (Listing, Listing) {
    (
        listing_a("0xtrump", TRUMP_A, dec!(0.50), dec!(0.50)),
        listing_b("KXPRES-28", TRUMP_B, dec!(0.45), dec!(0.53)),
    )
}

/// Same question, priced consistently: no opportunity.
pub fn efficient_pair() -> (Listing, Listing) {
    (
        listing_a(
            "0xbtc",
            "Bitcoin above $100k on December 31, 2025?",
            dec!(0.40),
            dec!(0.60),
        ),
        listing_b(
            "KXBTC-25",
            "Bitcoin above 100k December 31 2025",
            dec!(0.41),
            dec!(0.60),
        ),
    )
}

pub fn politics(platform: Platform, id: &str, question: &str, yes: Decimal, no: Decimal) -> Listing {
    categorized(platform, id, question, "politics", yes, no)
}

pub fn economy(platform: Platform, id: &str, question: &str, yes: Decimal, no: Decimal) -> Listing {
    categorized(platform, id, question, "economy", yes, no)
}

/// A cycle over two scripted sources with a recording notifier.
pub struct Harness {
    pub source_a: ScriptedSource,
    pub source_b: ScriptedSource,
    pub notifier: RecordingNotifier,
    pub cycle: DetectionCycle,
}

impl Harness {
    pub fn new(config: &Config, listings_a: Vec<Listing>, listings_b: Vec<Listing>) -> Self {
        Self::with_embedder(config, listings_a, listings_b, None)
    }

    pub fn with_embedder(
        config: &Config,
        listings_a: Vec<Listing>,
        listings_b: Vec<Listing>,
        embedder: Option<Arc<dyn TextEmbedder>>,
    ) -> Self {
        let source_a = ScriptedSource::new(Platform::A, listings_a);
        let source_b = ScriptedSource::new(Platform::B, listings_b);
        let notifier = RecordingNotifier::new();
        let sources: Vec<Arc<dyn ListingSource>> =
            vec![Arc::new(source_a.clone()), Arc::new(source_b.clone())];
        let cycle = assemble_cycle(config, sources, embedder, Arc::new(notifier.clone()))
            .expect("valid test config");
        Self {
            source_a,
            source_b,
            notifier,
            cycle,
        }
    }
}
