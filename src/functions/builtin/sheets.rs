//! Built-in `add_spreadsheet_row` function
//!
//! Splits a comma-separated row and posts `{sheet_name, row_data}` to the
//! spreadsheet webhook.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;
use url::Url;

use crate::functions::registry::{FunctionDescriptor, FunctionHandler, HandlerError, ParameterSpec};
use crate::functions::validate::FunctionArgs;
use crate::webhook::WebhookClient;

pub const NAME: &str = "add_spreadsheet_row";

pub const SUCCESS_MESSAGE: &str = "Row added to Google Sheet successfully.";

/// Model-facing contract
pub fn descriptor() -> FunctionDescriptor {
    FunctionDescriptor::new(NAME, "Adds a new row to a Google Sheet.")
        .param(ParameterSpec::string("sheet_name", "Name of the Google Sheet"))
        .param(ParameterSpec::string(
            "row_data",
            "Comma-separated string of values to be added as a new row",
        ))
}

/// Split a row on commas and trim each cell.
///
/// Cells cannot contain commas. An empty row yields a single empty cell.
pub fn split_row_data(row_data: &str) -> Vec<String> {
    row_data.split(',').map(|cell| cell.trim().to_string()).collect()
}

/// Webhook payload
#[derive(Debug, Serialize)]
pub struct RowPayload<'a> {
    pub sheet_name: &'a str,
    pub row_data: Vec<String>,
}

/// Appends one row per call through the webhook
pub struct AddSpreadsheetRow {
    client: Arc<WebhookClient>,
    url: Url,
}

impl AddSpreadsheetRow {
    pub fn new(client: Arc<WebhookClient>, url: Url) -> Self {
        Self { client, url }
    }

    /// Append a row to the named sheet
    pub async fn append(&self, sheet_name: &str, row_data: &str) -> Result<String, HandlerError> {
        let payload = RowPayload {
            sheet_name,
            row_data: split_row_data(row_data),
        };

        let response = self
            .client
            .post_json(&self.url, &payload)
            .await
            .map_err(|e| HandlerError::SheetAppend {
                reason: format!("Webhook unreachable: {}", e),
                status_code: None,
            })?;

        if response.is_ok() {
            Ok(SUCCESS_MESSAGE.to_string())
        } else {
            warn!("Sheet webhook returned {}: {}", response.status, response.body);
            Err(HandlerError::SheetAppend {
                reason: format!("Status code: {}", response.status),
                status_code: Some(response.status),
            })
        }
    }
}

#[async_trait]
impl FunctionHandler for AddSpreadsheetRow {
    async fn call(&self, args: FunctionArgs) -> Result<String, HandlerError> {
        self.append(args.str("sheet_name")?, args.str("row_data")?).await
    }
}
