//! Text embedding providers.

pub mod openai;
pub mod settings;

pub use openai::OpenAiEmbedder;
pub use settings::EmbeddingConfig;
