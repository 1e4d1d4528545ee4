//! Built-in `send_email` function
//!
//! Posts `{to, subject, body}` to the email webhook.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use url::Url;

use crate::functions::registry::{FunctionDescriptor, FunctionHandler, HandlerError, ParameterSpec};
use crate::functions::validate::FunctionArgs;
use crate::webhook::WebhookClient;

pub const NAME: &str = "send_email";

pub const SUCCESS_MESSAGE: &str = "Email sent successfully.";

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
});

/// Whether a string looks like a deliverable address
pub fn is_plausible_email(address: &str) -> bool {
    EMAIL_RE.is_match(address.trim())
}

/// Model-facing contract
pub fn descriptor() -> FunctionDescriptor {
    FunctionDescriptor::new(NAME, "Sends an email to the given recipient.")
        .param(ParameterSpec::string("to", "Email address of the recipient"))
        .param(ParameterSpec::string("subject", "Subject of the email"))
        .param(ParameterSpec::string("body", "Body of the email"))
}

/// Webhook payload
#[derive(Debug, Serialize)]
pub struct EmailPayload<'a> {
    pub to: &'a str,
    pub subject: &'a str,
    pub body: &'a str,
}

/// Sends one email per call through the webhook
pub struct SendEmail {
    client: Arc<WebhookClient>,
    url: Url,
    validate_recipient: bool,
}

impl SendEmail {
    pub fn new(client: Arc<WebhookClient>, url: Url) -> Self {
        Self {
            client,
            url,
            validate_recipient: true,
        }
    }

    /// Toggle the recipient address check
    pub fn validate_recipient(mut self, enabled: bool) -> Self {
        self.validate_recipient = enabled;
        self
    }

    /// Send an email
    pub async fn send(&self, payload: &EmailPayload<'_>) -> Result<String, HandlerError> {
        if self.validate_recipient && !is_plausible_email(payload.to) {
            return Err(HandlerError::EmailDelivery {
                reason: format!("'{}' is not a valid email address.", payload.to),
                status_code: None,
            });
        }

        let response = self
            .client
            .post_json(&self.url, payload)
            .await
            .map_err(|e| HandlerError::EmailDelivery {
                reason: format!("Webhook unreachable: {}", e),
                status_code: None,
            })?;

        if response.is_ok() {
            Ok(SUCCESS_MESSAGE.to_string())
        } else {
            warn!("Email webhook returned {}: {}", response.status, response.body);
            Err(HandlerError::EmailDelivery {
                reason: format!("Status code: {}", response.status),
                status_code: Some(response.status),
            })
        }
    }
}

#[async_trait]
impl FunctionHandler for SendEmail {
    async fn call(&self, args: FunctionArgs) -> Result<String, HandlerError> {
        let payload = EmailPayload {
            to: args.str("to")?.trim(),
            subject: args.str("subject")?,
            body: args.str("body")?,
        };
        self.send(&payload).await
    }
}
