//! Terminal output for the CLI handlers.
//!
//! Human mode prints aligned, colored lines. With `--json` every call becomes
//! one `{"payload": ..., "type": ...}` line on stdout (errors go to stderr).
//! `--quiet` hides everything except warnings, errors and opportunities.

use std::fmt::Display;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

use crate::application::cycle::{CategoryOutcome, CategoryReport};
use crate::domain::ArbitrageOpportunity;

/// Output mode selected by the global flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    pub json: bool,
    pub quiet: bool,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }
}

static MODE: RwLock<OutputConfig> = parking_lot::const_rwlock(OutputConfig::new(false, false));

fn mode() -> OutputConfig {
    *MODE.read()
}

/// Human-readable lines that `--quiet` hides.
fn hidden(mode: OutputConfig) -> bool {
    !mode.json && mode.quiet
}

fn emit(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply the global `--json` / `--quiet` flags.
pub fn configure(config: OutputConfig) {
    *MODE.write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    mode().json
}

pub fn header(version: &str) {
    let mode = mode();
    if mode.json {
        emit("header", json!({ "app": "crossarb", "version": version }));
    } else if !hidden(mode) {
        println!("{} {}", "crossarb".bold(), version.dimmed());
        println!();
    }
}

/// A labeled value, used for settings and totals.
pub fn field(label: &str, value: impl Display) {
    let mode = mode();
    let value = value.to_string();
    if mode.json {
        emit("field", json!({ "label": label, "value": value }));
    } else if !hidden(mode) {
        println!("  {:<14} {}", label.dimmed(), value);
    }
}

pub fn section(title: &str) {
    let mode = mode();
    if mode.json {
        emit("section", json!({ "title": title }));
    } else if !hidden(mode) {
        println!();
        println!("{}", title.bold());
    }
}

pub fn success(message: &str) {
    let mode = mode();
    if mode.json {
        emit("success", json!({ "message": message }));
    } else if !hidden(mode) {
        println!("  {} {}", "✓".green(), message);
    }
}

pub fn warning(message: &str) {
    if is_json() {
        emit("warning", json!({ "message": message }));
    } else {
        println!("  {} {}", "⚠".yellow(), message);
    }
}

/// Print to stderr.
pub fn error(message: &str) {
    if is_json() {
        eprintln!("{}", json!({ "type": "error", "payload": { "message": message } }));
    } else {
        eprintln!("  {} {}", "×".red(), message);
    }
}

fn category_name(report: &CategoryReport) -> String {
    report
        .category
        .as_ref()
        .map_or_else(|| "*".to_string(), ToString::to_string)
}

fn category_payload(report: &CategoryReport) -> Value {
    let name = category_name(report);
    match &report.outcome {
        CategoryOutcome::Evaluated {
            pairs,
            opportunities,
            stale,
        } => json!({
            "category": name,
            "status": "evaluated",
            "pairs": pairs,
            "opportunities": opportunities,
            "stale": stale,
        }),
        CategoryOutcome::Skipped { platform, reason } => json!({
            "category": name,
            "status": "skipped",
            "platform": platform.name(),
            "reason": reason,
        }),
    }
}

/// How one category fared in a cycle. Skipped categories print as warnings.
pub fn category(report: &CategoryReport) {
    let mode = mode();
    if mode.json {
        emit("category", category_payload(report));
        return;
    }

    let name = category_name(report);
    match &report.outcome {
        CategoryOutcome::Evaluated {
            pairs,
            opportunities,
            stale,
        } => {
            if hidden(mode) {
                return;
            }
            let stale = if *stale { " (stale)" } else { "" };
            println!(
                "  {:<14} {pairs} pairs, {opportunities} opportunities{}",
                name.dimmed(),
                stale.dimmed()
            );
        }
        CategoryOutcome::Skipped { platform, reason } => {
            warning(&format!("{name}: skipped, {platform} fetch failed: {reason}"));
        }
    }
}

fn opportunity_payload(opp: &ArbitrageOpportunity) -> Value {
    let (a, b) = (opp.pair().a(), opp.pair().b());
    json!({
        "listing_a": a.id().as_str(),
        "listing_b": b.id().as_str(),
        "question_a": a.question(),
        "question_b": b.question(),
        "strategy": opp.strategy().to_string(),
        "total_cost": opp.total_cost().to_string(),
        "profit_pct": opp.profit_pct().round_dp(2).to_string(),
        "confidence": opp.confidence(),
    })
}

/// One opportunity: profit and both questions, then the two trades.
pub fn opportunity(opp: &ArbitrageOpportunity) {
    if is_json() {
        emit("opportunity", opportunity_payload(opp));
        return;
    }

    let description = opp.describe();
    println!(
        "  {} {} {} | {}",
        "opportunity".yellow(),
        format!("{}%", opp.profit_pct().round_dp(2)).green(),
        opp.pair().a().question(),
        opp.pair().b().question()
    );
    println!(
        "  {:<14} {}, {}",
        "",
        description.action_a.dimmed(),
        description.action_b.dimmed()
    );
}
