//! Outbound webhook client
//!
//! One pooled HTTP client shared by every handler. Each POST is bounded by
//! the configured timeout so a slow endpoint cannot stall the conversation.

use reqwest::Client;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

/// Default per-call timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest response body kept for diagnostics
const MAX_BODY_PREVIEW: usize = 512;

/// Transport-level webhook failures (no HTTP status was received)
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Status and (truncated) body of a webhook response
#[derive(Debug, Clone)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
    pub duration_ms: u64,
}

impl WebhookResponse {
    /// The webhooks signal success with exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Shared client for JSON webhooks
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: Client,
    timeout: Duration,
}

impl WebhookClient {
    /// Create a client with a per-call timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, WebhookError> {
        if timeout.is_zero() {
            return Err(WebhookError::Client("timeout must be greater than zero".to_string()));
        }

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(format!("interview-agent/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WebhookError::Client(e.to_string()))?;

        Ok(Self { http, timeout })
    }

    /// POST a JSON payload and wait for the full response
    pub async fn post_json<T>(&self, url: &Url, payload: &T) -> Result<WebhookResponse, WebhookError>
    where
        T: Serialize + ?Sized,
    {
        debug!("POST {}", redact(url));

        let start = Instant::now();
        let response = self
            .http
            .post(url.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| self.classify(e))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        debug!("{} answered {} in {}ms", redact(url), status, duration_ms);

        Ok(WebhookResponse {
            status,
            body: truncate(text, MAX_BODY_PREVIEW),
            duration_ms,
        })
    }

    fn classify(&self, err: reqwest::Error) -> WebhookError {
        if err.is_builder() {
            WebhookError::Client(err.to_string())
        } else if err.is_timeout() {
            WebhookError::Timeout(self.timeout)
        } else if err.is_connect() {
            WebhookError::Transport(format!("connection failed: {}", err))
        } else {
            WebhookError::Transport(err.to_string())
        }
    }
}

/// Host and path only; webhook URLs may carry tokens in the query
fn redact(url: &Url) -> String {
    format!("{}{}", url.host_str().unwrap_or("?"), url.path())
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut cut = max;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "héllo".to_string();
        assert_eq!(truncate(text.clone(), 10), "héllo");
        assert_eq!(truncate(text, 2), "h...");
    }

    #[test]
    fn test_redact_drops_query() {
        let url = Url::parse("https://hooks.example.com/webhook/email?token=secret").unwrap();
        assert_eq!(redact(&url), "hooks.example.com/webhook/email");
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(WebhookClient::with_timeout(Duration::ZERO).is_err());
        assert!(WebhookClient::with_timeout(DEFAULT_TIMEOUT).is_ok());
    }

    #[test]
    fn test_only_200_is_ok() {
        let response = |status| WebhookResponse {
            status,
            body: String::new(),
            duration_ms: 0,
        };
        assert!(response(200).is_ok());
        assert!(!response(201).is_ok());
        assert!(!response(500).is_ok());
    }
}
