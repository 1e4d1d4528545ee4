//! Callable side-effect functions exposed to the conversation engine

pub mod builtin;
pub mod registry;
pub mod validate;

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::config::WebhooksConfig;
use crate::webhook::WebhookClient;
use builtin::{AddSpreadsheetRow, SendEmail};

pub use registry::{
    CallResult, FnHandler, FunctionDescriptor, FunctionHandler, FunctionRegistry, HandlerError,
    ParameterSpec, ParameterType, RegistryError,
};
pub use validate::FunctionArgs;

/// Build the registry with `send_email` and `add_spreadsheet_row` wired to
/// the configured webhooks. Fails if either URL is missing or invalid, or the
/// timeout is zero.
pub fn builtin_registry(config: &WebhooksConfig) -> Result<FunctionRegistry> {
    config.validate()?;
    let email_url = config.email_endpoint()?;
    let sheet_url = config.sheet_endpoint()?;

    let client = Arc::new(
        WebhookClient::with_timeout(config.timeout()).context("Failed to create webhook client")?,
    );

    let mut registry = FunctionRegistry::new();
    registry.register(
        builtin::email::descriptor(),
        Arc::new(
            SendEmail::new(client.clone(), email_url).validate_recipient(config.validate_recipient),
        ),
    )?;
    registry.register(
        builtin::sheets::descriptor(),
        Arc::new(AddSpreadsheetRow::new(client, sheet_url)),
    )?;

    Ok(registry)
}
