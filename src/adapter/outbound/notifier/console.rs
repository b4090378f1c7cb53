//! Terminal notifier.

use owo_colors::OwoColorize;

use super::format::format_opportunity;
use crate::port::outbound::notifier::{Event, Notifier};

/// Prints opportunity alerts to stdout.
///
/// Other events are left to the [`LogNotifier`](crate::port::outbound::notifier::LogNotifier).
pub struct ConsoleNotifier {
    color: bool,
}

impl ConsoleNotifier {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// The text printed for `event`, if any.
    #[must_use]
    pub fn render(&self, event: &Event) -> Option<String> {
        let Event::OpportunityDetected(e) = event else {
            return None;
        };
        let block = format_opportunity(e);
        if self.color {
            Some(block.green().bold().to_string())
        } else {
            Some(block)
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, event: Event) {
        if let Some(text) = self.render(&event) {
            println!("\n{text}");
        }
    }
}
