//! Scripted listing source.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::{Category, Listing, Platform};
use crate::error::{Error, Result};
use crate::port::outbound::source::ListingSource;

#[derive(Default)]
struct Script {
    listings: Vec<Listing>,
    /// Pending injected outcomes: `true` fails the fetch.
    failures: VecDeque<bool>,
    always_fail: bool,
    delay: Option<Duration>,
    fetched_categories: Vec<Option<Category>>,
}

/// A [`ListingSource`] that serves a fixed listing set, filtered by category.
///
/// Clones share state, so a test can keep a handle after handing the source
/// to the cache.
#[derive(Clone)]
pub struct ScriptedSource {
    platform: Platform,
    script: Arc<Mutex<Script>>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(platform: Platform, listings: Vec<Listing>) -> Self {
        Self {
            platform,
            script: Arc::new(Mutex::new(Script {
                listings,
                ..Script::default()
            })),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Replace the listings served by later fetches.
    pub fn set_listings(&self, listings: Vec<Listing>) {
        self.script.lock().listings = listings;
    }

    /// Fail the next `n` fetches.
    pub fn fail_next(&self, n: usize) {
        self.script.lock().failures.extend(std::iter::repeat(true).take(n));
    }

    /// Script the outcome of the next fetches in order: `true` fails.
    pub fn script_failures(&self, pattern: &[bool]) {
        self.script.lock().failures.extend(pattern.iter().copied());
    }

    /// Make every fetch take `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        self.script.lock().delay = Some(delay);
    }

    /// Fail every fetch until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.script.lock().always_fail = failing;
    }

    /// Total fetches attempted, including failed ones.
    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Categories requested, in call order.
    #[must_use]
    pub fn fetched_categories(&self) -> Vec<Option<Category>> {
        self.script.lock().fetched_categories.clone()
    }
}

#[async_trait]
impl ListingSource for ScriptedSource {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch(&self, category: Option<&Category>) -> Result<Vec<Listing>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let delay = self.script.lock().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut script = self.script.lock();
        script.fetched_categories.push(category.cloned());

        let injected = script.failures.pop_front().unwrap_or(false);
        if injected || script.always_fail {
            return Err(Error::Connection(format!(
                "scripted {} outage",
                self.platform
            )));
        }

        Ok(script
            .listings
            .iter()
            .filter(|listing| listing.in_category(category))
            .cloned()
            .collect())
    }
}
