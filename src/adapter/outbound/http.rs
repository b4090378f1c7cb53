//! Shared HTTP plumbing for the listing sources.

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::time::sleep;
use tracing::warn;

use crate::error::Result;

/// HTTP client settings shared by every source.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum number of attempts for transient failures.
    #[serde(default = "default_retry_max_attempts")]
    pub retry_max_attempts: u32,
    /// Backoff between retries in milliseconds.
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    3_000
}

const fn default_retry_max_attempts() -> u32 {
    3
}

const fn default_retry_backoff_ms() -> u64 {
    500
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            retry_max_attempts: default_retry_max_attempts(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// JSON GET client that retries timeouts and connection failures.
#[derive(Debug, Clone)]
pub struct RetryingClient {
    http: HttpClient,
    retry_max_attempts: u32,
    retry_backoff_ms: u64,
}

impl RetryingClient {
    #[must_use]
    pub fn from_config(config: &HttpConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            retry_max_attempts: config.retry_max_attempts,
            retry_backoff_ms: config.retry_backoff_ms,
        }
    }

    /// GET `url` with `query` and decode the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the last transport error once attempts run out, a status error
    /// for non-2xx responses, or a decode error.
    pub async fn get_json<T>(&self, url: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut attempt = 0;
        let max_attempts = self.retry_max_attempts.max(1);

        loop {
            attempt += 1;
            let response = match self.http.get(url).query(query).send().await {
                Ok(response) => response,
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                    continue;
                }
            };

            let response = response.error_for_status()?;

            match response.json::<T>().await {
                Ok(parsed) => return Ok(parsed),
                Err(err) => {
                    if attempt >= max_attempts || !Self::should_retry(&err) {
                        return Err(err.into());
                    }
                    self.backoff(attempt, max_attempts, &err).await;
                }
            }
        }
    }

    fn should_retry(err: &reqwest::Error) -> bool {
        err.is_timeout() || err.is_connect()
    }

    async fn backoff(&self, attempt: u32, max_attempts: u32, err: &reqwest::Error) {
        warn!(
            attempt,
            max_attempts,
            error = %err,
            "HTTP request failed, retrying"
        );
        if self.retry_backoff_ms > 0 {
            sleep(Duration::from_millis(self.retry_backoff_ms)).await;
        }
    }
}

/// Join a base URL and a path without doubling the slash.
#[must_use]
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("https://gamma-api.polymarket.com/", "/events"),
            "https://gamma-api.polymarket.com/events"
        );
        assert_eq!(endpoint("http://localhost:8080", "markets"), "http://localhost:8080/markets");
    }

    #[test]
    fn config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.retry_max_attempts, 3);
        assert!(config.timeout_ms > config.connect_timeout_ms);
    }

    #[tokio::test]
    async fn unreachable_host_fails_after_retries() {
        let client = RetryingClient::from_config(&HttpConfig {
            timeout_ms: 200,
            connect_timeout_ms: 100,
            retry_max_attempts: 2,
            retry_backoff_ms: 0,
        });
        let result: Result<serde_json::Value> = client
            .get_json("http://127.0.0.1:9/unreachable", &[])
            .await;
        let err = result.unwrap_err();
        assert!(err.is_retryable());
    }
}
