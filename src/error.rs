use thiserror::Error;

use crate::domain::error::DomainError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("embedding error: {0}")]
    Embedding(String),
}

impl Error {
    /// Whether retrying the failed operation later could succeed.
    ///
    /// Network and upstream parse failures are transient from the point of view
    /// of a polling cycle; configuration and domain errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Http(_)
                | Error::Io(_)
                | Error::Json(_)
                | Error::Connection(_)
                | Error::Parse(_)
                | Error::Embedding(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn config_error_messages_name_the_field() {
        let err = ConfigError::InvalidValue {
            field: "threshold",
            reason: "must be between 0 and 1".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid value for threshold: must be between 0 and 1"
        );

        let err = ConfigError::MissingField { field: "base_url" };
        assert_eq!(err.to_string(), "missing required field: base_url");
    }

    #[test]
    fn config_errors_are_transparent() {
        let err: Error = ConfigError::MissingField { field: "base_url" }.into();
        assert_eq!(err.to_string(), "missing required field: base_url");
        assert!(!err.is_retryable());
    }

    #[test]
    fn domain_errors_are_not_retryable() {
        let err: Error = DomainError::NegativeLiquidity {
            liquidity: dec!(-1),
        }
        .into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn connection_errors_are_retryable() {
        assert!(Error::Connection("reset by peer".into()).is_retryable());
        assert!(Error::Parse("bad payload".into()).is_retryable());
    }
}
