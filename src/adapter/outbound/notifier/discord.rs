//! Discord webhook notifier.
//!
//! Opportunity alerts are posted as a code block. Delivery happens on a
//! background worker so [`Notifier::notify`] never waits on the network;
//! [`Notifier::close`] hands out the worker so queued alerts can be awaited
//! before the runtime stops.

use std::time::Duration;

use parking_lot::Mutex;
use reqwest::Client;
use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::format::{format_opportunity, truncate};
use crate::port::outbound::notifier::{Event, Notifier};

/// Discord rejects messages over 2000 characters; leave room for the fence.
const MAX_CONTENT_CHARS: usize = 1900;
const USERNAME: &str = "Arbitrage Bot";

/// Webhook delivery settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub webhook_url: String,
    pub timeout: Duration,
}

impl DiscordConfig {
    /// Read `DISCORD_WEBHOOK_URL`. Returns `None` when unset or blank.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let webhook_url = std::env::var("DISCORD_WEBHOOK_URL").ok()?;
        if webhook_url.trim().is_empty() {
            return None;
        }
        Some(Self {
            webhook_url,
            timeout: Duration::from_secs(10),
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct WebhookPayload {
    content: String,
    username: &'static str,
}

/// Build the webhook body for `event`, or `None` if it is not posted.
fn payload_for(event: &Event) -> Option<WebhookPayload> {
    let Event::OpportunityDetected(e) = event else {
        return None;
    };
    let text = truncate(&format_opportunity(e), MAX_CONTENT_CHARS);
    Some(WebhookPayload {
        content: format!("```\n{text}\n```"),
        username: USERNAME,
    })
}

/// Posts opportunity alerts to a Discord channel webhook.
pub struct DiscordNotifier {
    sender: Mutex<Option<mpsc::UnboundedSender<WebhookPayload>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl DiscordNotifier {
    /// Create the notifier and spawn its delivery worker.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(config: DiscordConfig) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(discord_worker(config, receiver));
        Self {
            sender: Mutex::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
        }
    }
}

impl Notifier for DiscordNotifier {
    fn notify(&self, event: Event) {
        let Some(payload) = payload_for(&event) else {
            return;
        };
        let sender = self.sender.lock();
        let Some(sender) = sender.as_ref() else {
            debug!("Discord notifier closed, dropping alert");
            return;
        };
        if sender.send(payload).is_err() {
            warn!("Discord notifier channel closed");
        }
    }

    /// Drop the sender so the worker drains the queue and exits.
    fn close(&self) -> Option<JoinHandle<()>> {
        self.sender.lock().take();
        self.worker.lock().take()
    }
}

async fn discord_worker(
    config: DiscordConfig,
    mut receiver: mpsc::UnboundedReceiver<WebhookPayload>,
) {
    let client = Client::builder()
        .timeout(config.timeout)
        .build()
        .unwrap_or_else(|_| Client::new());

    info!("Discord notifier started");

    while let Some(payload) = receiver.recv().await {
        match client.post(&config.webhook_url).json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                debug!("Discord notification sent");
            }
            Ok(response) => {
                warn!(status = %response.status(), "Discord webhook rejected notification");
            }
            Err(e) => {
                warn!(error = %e, "Failed to send Discord notification");
            }
        }
    }

    debug!("Discord notifier worker shutting down");
}
