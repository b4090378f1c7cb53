//! Cooperative scheduling of detection cycles.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::watch;
use tracing::info;

use super::runner::{CycleReport, DetectionCycle};

/// How many cycles to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// A single cycle, then exit.
    #[default]
    Once,
    /// Cycle, sleep `poll_interval`, repeat until shut down.
    Continuous,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Once => f.write_str("once"),
            Mode::Continuous => f.write_str("continuous"),
        }
    }
}

/// Scheduling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub mode: Mode,

    /// Seconds to sleep between continuous cycles.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Categories to evaluate each cycle. Empty means every listing is
    /// compared against every other in one undifferentiated pass.
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,

    /// Evaluate with the expired snapshot when a refresh fails.
    #[serde(default)]
    pub use_stale_on_error: bool,
}

const fn default_poll_interval_secs() -> u64 {
    30
}

fn default_categories() -> Vec<String> {
    ["politics", "economy", "crypto", "sports"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            poll_interval_secs: default_poll_interval_secs(),
            categories: default_categories(),
            use_stale_on_error: false,
        }
    }
}

impl ScheduleConfig {
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Totals across a scheduler run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub cycles: u64,
    pub opportunities: usize,
    pub last_report: Option<CycleReport>,
}

/// Runs detection cycles one after another; cycles never overlap.
///
/// Shutdown is a `watch` flag checked between cycles. A cycle in flight
/// always finishes; only the sleep between cycles is cut short.
pub struct Scheduler {
    cycle: Arc<DetectionCycle>,
    mode: Mode,
    poll_interval: Duration,
}

impl Scheduler {
    #[must_use]
    pub fn new(cycle: Arc<DetectionCycle>, mode: Mode, poll_interval: Duration) -> Self {
        Self {
            cycle,
            mode,
            poll_interval,
        }
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Run until the mode is satisfied or `shutdown` turns true.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> RunSummary {
        let mut summary = RunSummary::default();

        loop {
            if *shutdown.borrow() {
                info!(cycles = summary.cycles, "Shutdown requested, not starting another cycle");
                break;
            }

            let report = self.cycle.run_once().await;
            summary.cycles += 1;
            summary.opportunities += report.opportunities.len();
            summary.last_report = Some(report);

            if self.mode == Mode::Once || *shutdown.borrow() {
                break;
            }

            tokio::select! {
                () = tokio::time::sleep(self.poll_interval) => {}
                result = shutdown.changed() => {
                    if result.is_err() {
                        info!("Shutdown channel closed");
                        break;
                    }
                }
            }
        }

        summary
    }
}
