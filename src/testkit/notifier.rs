//! Recording notifier.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::outbound::notifier::{Event, Notifier, OpportunityEvent};

/// Thread-safe event collector for notification assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// The opportunity events, in notification order.
    #[must_use]
    pub fn opportunities(&self) -> Vec<OpportunityEvent> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::OpportunityDetected(e) => Some(e.clone()),
                _ => None,
            })
            .collect()
    }

    /// How many recorded events satisfy `predicate`.
    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events.lock().iter().filter(|e| predicate(e)).count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events.lock().push(event);
    }
}
