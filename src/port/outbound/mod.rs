//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the engine's infrastructure dependencies:
//! listing sources, text embedding, and notifications.

pub mod embedder;
pub mod notifier;
pub mod source;
