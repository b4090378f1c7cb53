//! Detection cycle and its scheduler.
//!
//! A cycle fetches both platforms for every configured category, matches
//! the listings, prices the matched pairs and notifies about what passes.
//! The [`scheduler::Scheduler`] runs cycles once or on a fixed interval.

pub mod runner;
pub mod scheduler;

pub use runner::{Anomaly, CategoryOutcome, CategoryReport, CycleReport, DetectionCycle};
pub use scheduler::{Mode, RunSummary, ScheduleConfig, Scheduler};
