//! Detection cycles over scripted sources.

mod support;

use std::sync::Arc;
use std::time::Duration;

use crossarb::application::cycle::{CategoryOutcome, Mode, Scheduler};
use crossarb::domain::{normalize, Category, Platform};
use crossarb::port::outbound::embedder::TextEmbedder;
use crossarb::port::outbound::notifier::Event;
use crossarb::testkit::config::quiet_config;
use crossarb::testkit::domain::{listing_a, listing_b};
use crossarb::testkit::embedder::{FailingEmbedder, FixedEmbedder};
use rust_decimal_macros::dec;
use support::{economy, efficient_pair, fed_pair, politics, trump_pair, Harness, FED_A, FED_B};
use tokio::sync::watch;

fn is_skip(event: &Event) -> bool {
    matches!(event, Event::CategorySkipped(_))
}

#[tokio::test]
async fn cycle_reports_opportunities_by_profit() {
    let (fed_a, fed_b) = fed_pair();
    let (trump_a, trump_b) = trump_pair();
    let (btc_a, btc_b) = efficient_pair();
    let harness = Harness::new(
        &quiet_config(),
        vec![trump_a, btc_a, fed_a],
        vec![fed_b, trump_b, btc_b],
    );

    let report = harness.cycle.run_once().await;

    assert_eq!(report.pairs_matched(), 3);
    assert_eq!(report.opportunities.len(), 2);
    assert_eq!(report.opportunities[0].profit_pct(), dec!(7));
    assert_eq!(report.opportunities[1].profit_pct(), dec!(5));
    assert!(report.anomalies.is_empty());

    let notified = harness.notifier.opportunities();
    assert_eq!(notified.len(), 2);
    assert_eq!(notified[0].leg_a.listing_id, "0xfed");
    assert_eq!(notified[0].strategy, "yes_a_no_b");
    assert_eq!(
        harness
            .notifier
            .count(|e| matches!(e, Event::CycleCompleted(s) if s.opportunities == 2)),
        1
    );
}

#[tokio::test]
async fn each_category_is_matched_separately() {
    let mut config = quiet_config();
    config.schedule.categories = vec!["politics".into(), "economy".into()];
    let harness = Harness::new(
        &config,
        vec![
            politics(Platform::A, "0xp", "Trump win 2028 election", dec!(0.50), dec!(0.50)),
            economy(Platform::A, "0xe", FED_A, dec!(0.35), dec!(0.65)),
        ],
        vec![
            politics(Platform::B, "KXP", "Trump win 2028 election", dec!(0.45), dec!(0.53)),
            economy(Platform::B, "KXE", FED_B, dec!(0.40), dec!(0.58)),
        ],
    );

    let report = harness.cycle.run_once().await;

    assert_eq!(report.categories.len(), 2);
    assert_eq!(report.categories[0].category, Some(Category::from("politics")));
    assert!(matches!(
        report.categories[1].outcome,
        CategoryOutcome::Evaluated { pairs: 1, opportunities: 1, stale: false }
    ));
    assert_eq!(report.opportunities.len(), 2);
    assert_eq!(harness.source_a.fetch_count(), 2);
    assert_eq!(harness.source_b.fetch_count(), 2);
}

#[tokio::test]
async fn failed_fetch_skips_only_that_category() {
    let mut config = quiet_config();
    config.schedule.categories = vec!["politics".into(), "economy".into()];
    let harness = Harness::new(
        &config,
        vec![economy(Platform::A, "0xe", FED_A, dec!(0.35), dec!(0.65))],
        vec![economy(Platform::B, "KXE", FED_B, dec!(0.40), dec!(0.58))],
    );
    harness.source_b.fail_next(1);

    let report = harness.cycle.run_once().await;

    assert!(matches!(
        &report.categories[0].outcome,
        CategoryOutcome::Skipped { platform: Platform::B, .. }
    ));
    assert!(matches!(
        report.categories[1].outcome,
        CategoryOutcome::Evaluated { opportunities: 1, .. }
    ));
    assert_eq!(report.skipped(), 1);
    assert_eq!(harness.notifier.count(is_skip), 1);
}

#[tokio::test(start_paused = true)]
async fn listings_are_reused_within_ttl() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);

    harness.cycle.run_once().await;
    tokio::time::advance(Duration::from_secs(5)).await;
    harness.cycle.run_once().await;
    assert_eq!(harness.source_a.fetch_count(), 1);

    tokio::time::advance(Duration::from_secs(5)).await;
    harness.cycle.run_once().await;
    assert_eq!(harness.source_a.fetch_count(), 2);
    assert_eq!(harness.source_b.fetch_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn stale_listings_are_used_only_when_allowed() {
    let (fed_a, fed_b) = fed_pair();

    let strict = Harness::new(&quiet_config(), vec![fed_a.clone()], vec![fed_b.clone()]);
    strict.cycle.run_once().await;
    tokio::time::advance(Duration::from_secs(11)).await;
    strict.source_b.set_failing(true);
    let report = strict.cycle.run_once().await;
    assert_eq!(report.skipped(), 1);
    assert!(report.opportunities.is_empty());

    let mut config = quiet_config();
    config.schedule.use_stale_on_error = true;
    let lenient = Harness::new(&config, vec![fed_a], vec![fed_b]);
    lenient.cycle.run_once().await;
    tokio::time::advance(Duration::from_secs(11)).await;
    lenient.source_b.set_failing(true);
    let report = lenient.cycle.run_once().await;
    assert!(matches!(
        report.categories[0].outcome,
        CategoryOutcome::Evaluated { stale: true, opportunities: 1, .. }
    ));
}

#[tokio::test]
async fn unpriceable_pair_is_reported_as_anomaly() {
    let a = listing_a("0xfed", FED_A, dec!(0.35), dec!(0.65));
    let b = listing_b("KXFED", FED_B, dec!(0), dec!(0.97));
    let harness = Harness::new(&quiet_config(), vec![a], vec![b]);

    let report = harness.cycle.run_once().await;

    assert_eq!(report.pairs_matched(), 1);
    assert!(report.opportunities.is_empty());
    assert_eq!(report.anomalies.len(), 1);
    assert_eq!(report.anomalies[0].listing_b.as_str(), "KXFED");
    assert_eq!(
        harness
            .notifier
            .count(|e| matches!(e, Event::PriceAnomaly(_))),
        1
    );
}

#[tokio::test]
async fn semantic_signal_pairs_rephrased_questions() {
    let a = listing_a("0xbtc", "Will Bitcoin reach 100k in 2025?", dec!(0.30), dec!(0.70));
    let b = listing_b("KXBTC", "BTC hits six figures during 2025", dec!(0.40), dec!(0.62));
    let mut config = quiet_config();
    config.matching.lexical_weight = 0.0;
    config.matching.semantic_weight = 1.0;

    let lexical_only = Harness::new(&config, vec![a.clone()], vec![b.clone()]);
    assert_eq!(lexical_only.cycle.run_once().await.pairs_matched(), 0);

    let embedder = FixedEmbedder::new(
        [
            (normalize(a.question()).as_str().to_string(), vec![1.0, 0.0]),
            (normalize(b.question()).as_str().to_string(), vec![1.0, 0.0]),
        ],
        vec![0.0, 1.0],
    );
    let semantic = Harness::with_embedder(
        &config,
        vec![a],
        vec![b],
        Some(Arc::new(embedder.clone()) as Arc<dyn TextEmbedder>),
    );
    let report = semantic.cycle.run_once().await;

    assert_eq!(report.pairs_matched(), 1);
    assert_eq!(report.opportunities.len(), 1);
    assert_eq!(embedder.calls(), 1);
}

#[tokio::test]
async fn failing_embedder_falls_back_and_can_be_disabled() {
    let (fed_a, fed_b) = fed_pair();
    let mut config = quiet_config();
    config.matching.disable_semantic_on_failure = true;
    let embedder = FailingEmbedder::new();
    let harness = Harness::with_embedder(
        &config,
        vec![fed_a],
        vec![fed_b],
        Some(Arc::new(embedder.clone()) as Arc<dyn TextEmbedder>),
    );

    let first = harness.cycle.run_once().await;
    let second = harness.cycle.run_once().await;

    assert_eq!(first.opportunities.len(), 1);
    assert_eq!(second.opportunities.len(), 1);
    assert_eq!(embedder.calls(), 1);
    assert_eq!(
        harness
            .notifier
            .count(|e| matches!(e, Event::SemanticDisabled { .. })),
        1
    );
}

#[tokio::test]
async fn failing_embedder_is_retried_when_not_disabled() {
    let (fed_a, fed_b) = fed_pair();
    let embedder = FailingEmbedder::new();
    let harness = Harness::with_embedder(
        &quiet_config(),
        vec![fed_a],
        vec![fed_b],
        Some(Arc::new(embedder.clone()) as Arc<dyn TextEmbedder>),
    );

    harness.cycle.run_once().await;
    harness.cycle.run_once().await;

    assert_eq!(embedder.calls(), 2);
    assert_eq!(
        harness
            .notifier
            .count(|e| matches!(e, Event::SemanticDisabled { .. })),
        0
    );
}

#[tokio::test(start_paused = true)]
async fn once_mode_runs_a_single_cycle() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);
    let scheduler = Scheduler::new(Arc::new(harness.cycle), Mode::Once, Duration::from_secs(30));
    let (_tx, rx) = watch::channel(false);

    let summary = scheduler.run(rx).await;

    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.opportunities, 1);
    assert!(summary.last_report.is_some());
}

#[tokio::test(start_paused = true)]
async fn continuous_mode_stops_on_shutdown() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);
    let source_a = harness.source_a.clone();
    let scheduler = Scheduler::new(
        Arc::new(harness.cycle),
        Mode::Continuous,
        Duration::from_secs(30),
    );
    let (tx, rx) = watch::channel(false);

    let run = tokio::spawn(async move { scheduler.run(rx).await });
    tokio::time::sleep(Duration::from_secs(95)).await;
    tx.send(true).unwrap();
    let summary = run.await.unwrap();

    // Cycles at t = 0, 30, 60 and 90.
    assert_eq!(summary.cycles, 4);
    assert_eq!(summary.opportunities, 4);
    // TTL is 10s, so every cycle refetched.
    assert_eq!(source_a.fetch_count(), 4);
}

#[tokio::test(start_paused = true)]
async fn continuous_mode_survives_a_failed_cycle() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);
    let notifier = harness.notifier.clone();
    // Second cycle's platform B fetch fails.
    harness.source_b.script_failures(&[false, true]);
    let scheduler = Scheduler::new(
        Arc::new(harness.cycle),
        Mode::Continuous,
        Duration::from_secs(30),
    );
    let (tx, rx) = watch::channel(false);

    let run = tokio::spawn(async move { scheduler.run(rx).await });
    tokio::time::sleep(Duration::from_secs(95)).await;
    tx.send(true).unwrap();
    let summary = run.await.unwrap();

    assert_eq!(summary.cycles, 4);
    assert_eq!(summary.opportunities, 3);
    assert_eq!(notifier.count(is_skip), 1);
    assert_eq!(notifier.count(|e| matches!(e, Event::CycleCompleted(_))), 4);

    let last = summary.last_report.unwrap();
    assert!(matches!(
        last.categories[0].outcome,
        CategoryOutcome::Evaluated { pairs: 1, opportunities: 1, stale: false }
    ));
}

#[tokio::test(start_paused = true)]
async fn shutdown_mid_cycle_lets_the_cycle_finish() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);
    harness.source_a.set_delay(Duration::from_secs(5));
    let source_a = harness.source_a.clone();
    let scheduler = Scheduler::new(
        Arc::new(harness.cycle),
        Mode::Continuous,
        Duration::from_secs(30),
    );
    let (tx, rx) = watch::channel(false);

    let run = tokio::spawn(async move { scheduler.run(rx).await });
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(source_a.fetch_count(), 1);
    tx.send(true).unwrap();
    let summary = run.await.unwrap();

    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.opportunities, 1);
    let report = summary.last_report.unwrap();
    assert_eq!(report.categories.len(), 1);
    assert!(matches!(
        report.categories[0].outcome,
        CategoryOutcome::Evaluated { pairs: 1, opportunities: 1, stale: false }
    ));
    assert_eq!(source_a.fetch_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn shutdown_before_start_runs_nothing() {
    let (fed_a, fed_b) = fed_pair();
    let harness = Harness::new(&quiet_config(), vec![fed_a], vec![fed_b]);
    let scheduler = Scheduler::new(
        Arc::new(harness.cycle),
        Mode::Continuous,
        Duration::from_secs(30),
    );
    let (_tx, rx) = watch::channel(true);

    let summary = scheduler.run(rx).await;

    assert_eq!(summary.cycles, 0);
    assert!(summary.last_report.is_none());
}
