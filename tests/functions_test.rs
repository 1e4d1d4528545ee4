//! Built-in functions against a live (in-process) webhook

mod common;

use common::{dead_url, spawn_webhook, webhooks};
use interview_agent::functions::builtin::{AddSpreadsheetRow, SendEmail};
use interview_agent::functions::{builtin_registry, CallResult, FunctionRegistry, RegistryError};
use interview_agent::webhook::WebhookClient;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

fn email_args() -> serde_json::Value {
    json!({
        "to": "candidate@example.com",
        "subject": "Your interview with YGG",
        "body": "Thanks for your time today.",
    })
}

/// Registry whose handlers use a short client timeout
fn fast_timeout_registry(email_url: &str, sheet_url: &str, timeout: Duration) -> FunctionRegistry {
    let client = Arc::new(WebhookClient::with_timeout(timeout).unwrap());
    let mut registry = FunctionRegistry::new();
    registry
        .register(
            interview_agent::functions::builtin::email::descriptor(),
            Arc::new(SendEmail::new(client.clone(), Url::parse(email_url).unwrap())),
        )
        .unwrap();
    registry
        .register(
            interview_agent::functions::builtin::sheets::descriptor(),
            Arc::new(AddSpreadsheetRow::new(client, Url::parse(sheet_url).unwrap())),
        )
        .unwrap();
    registry
}

#[tokio::test]
async fn test_send_email_success() -> anyhow::Result<()> {
    let email = spawn_webhook(200, Duration::ZERO).await;
    let sheet = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&email.url, &sheet.url, 5))?;

    let result = registry.invoke("send_email", email_args()).await?;

    assert_eq!(result, CallResult::success("Email sent successfully."));
    assert_eq!(email.requests(), vec![email_args()]);
    assert_eq!(sheet.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_send_email_non_200_carries_status() -> anyhow::Result<()> {
    let email = spawn_webhook(500, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&email.url, &email.url, 5))?;

    let result = registry.invoke("send_email", email_args()).await?;

    assert_eq!(
        result,
        CallResult::failure("Failed to send email. Status code: 500", Some(500))
    );
    assert_eq!(email.hits(), 1);
    Ok(())
}

#[tokio::test]
async fn test_send_email_2xx_other_than_200_is_failure() -> anyhow::Result<()> {
    let email = spawn_webhook(202, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&email.url, &email.url, 5))?;

    let result = registry.invoke("send_email", email_args()).await?;
    assert_eq!(result.status_code(), Some(202));
    Ok(())
}

#[tokio::test]
async fn test_send_email_rejects_bad_recipient_without_calling() -> anyhow::Result<()> {
    let email = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&email.url, &email.url, 5))?;

    let mut args = email_args();
    args["to"] = json!("not an address");
    let result = registry.invoke("send_email", args).await?;

    assert!(!result.is_success());
    assert_eq!(result.status_code(), None);
    assert!(result.text().contains("not a valid email address"));
    assert_eq!(email.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_send_email_trims_recipient() -> anyhow::Result<()> {
    let email = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&email.url, &email.url, 5))?;

    let mut args = email_args();
    args["to"] = json!("  candidate@example.com \n");
    let result = registry.invoke("send_email", args).await?;

    assert!(result.is_success());
    assert_eq!(email.requests()[0]["to"], "candidate@example.com");
    Ok(())
}

#[tokio::test]
async fn test_recipient_check_can_be_disabled() -> anyhow::Result<()> {
    let email = spawn_webhook(200, Duration::ZERO).await;
    let mut config = webhooks(&email.url, &email.url, 5);
    config.validate_recipient = false;
    let registry = builtin_registry(&config)?;

    let mut args = email_args();
    args["to"] = json!("hiring-team");
    let result = registry.invoke("send_email", args).await?;

    assert!(result.is_success());
    assert_eq!(email.requests()[0]["to"], "hiring-team");
    Ok(())
}

#[tokio::test]
async fn test_add_row_splits_and_trims() -> anyhow::Result<()> {
    let sheet = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&sheet.url, &sheet.url, 5))?;

    let result = registry
        .invoke(
            "add_spreadsheet_row",
            json!({ "row_data": "a, b ,c", "sheet_name": "Candidates" }),
        )
        .await?;

    assert_eq!(result, CallResult::success("Row added to Google Sheet successfully."));
    assert_eq!(
        sheet.requests(),
        vec![json!({ "sheet_name": "Candidates", "row_data": ["a", "b", "c"] })]
    );
    Ok(())
}

#[tokio::test]
async fn test_add_row_empty_row_is_one_empty_cell() -> anyhow::Result<()> {
    let sheet = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&sheet.url, &sheet.url, 5))?;

    let result = registry
        .invoke("add_spreadsheet_row", json!({ "sheet_name": "Candidates", "row_data": "" }))
        .await?;

    assert!(result.is_success());
    assert_eq!(sheet.requests()[0]["row_data"], json!([""]));
    Ok(())
}

#[tokio::test]
async fn test_add_row_non_200_carries_status() -> anyhow::Result<()> {
    let sheet = spawn_webhook(404, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&sheet.url, &sheet.url, 5))?;

    let result = registry
        .invoke("add_spreadsheet_row", json!({ "sheet_name": "Missing", "row_data": "x" }))
        .await?;

    assert_eq!(
        result,
        CallResult::failure("Failed to add row to Google Sheet. Status code: 404", Some(404))
    );
    Ok(())
}

#[tokio::test]
async fn test_connection_failure_is_a_failure_result() -> anyhow::Result<()> {
    let url = dead_url().await;
    let registry = builtin_registry(&webhooks(&url, &url, 5))?;

    let email = registry.invoke("send_email", email_args()).await?;
    assert!(!email.is_success());
    assert_eq!(email.status_code(), None);
    assert!(email.text().starts_with("Failed to send email. Webhook unreachable"));

    let row = registry
        .invoke("add_spreadsheet_row", json!({ "sheet_name": "S", "row_data": "1,2" }))
        .await?;
    assert!(!row.is_success());
    assert_eq!(row.status_code(), None);
    Ok(())
}

#[tokio::test]
async fn test_slow_webhook_times_out() -> anyhow::Result<()> {
    let slow = spawn_webhook(200, Duration::from_secs(5)).await;
    let registry = fast_timeout_registry(&slow.url, &slow.url, Duration::from_millis(300));

    let started = std::time::Instant::now();
    let email = registry.invoke("send_email", email_args()).await?;
    let row = registry
        .invoke("add_spreadsheet_row", json!({ "sheet_name": "S", "row_data": "1" }))
        .await?;

    assert!(started.elapsed() < Duration::from_secs(4));
    for result in [email, row] {
        assert!(!result.is_success());
        assert_eq!(result.status_code(), None);
        assert!(result.text().contains("timed out"), "unexpected: {}", result.text());
    }
    assert_eq!(slow.hits(), 2);
    Ok(())
}

#[tokio::test]
async fn test_unknown_function_makes_no_call() -> anyhow::Result<()> {
    let hook = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&hook.url, &hook.url, 5))?;

    let err = registry.invoke("delete_candidate", json!({})).await.unwrap_err();
    assert_eq!(err, RegistryError::UnknownFunction("delete_candidate".to_string()));
    assert_eq!(hook.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_missing_argument_makes_no_call() -> anyhow::Result<()> {
    let hook = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&hook.url, &hook.url, 5))?;

    let result = registry
        .invoke("send_email", json!({ "to": "a@example.com", "subject": "Hi" }))
        .await?;

    assert!(!result.is_success());
    assert!(result.text().contains("body"));
    assert_eq!(hook.hits(), 0);
    Ok(())
}

#[tokio::test]
async fn test_concurrent_calls_each_post_once() -> anyhow::Result<()> {
    let hook = spawn_webhook(200, Duration::from_millis(50)).await;
    let registry = Arc::new(builtin_registry(&webhooks(&hook.url, &hook.url, 5))?);

    let calls = (0..5).map(|i| {
        let registry = registry.clone();
        async move {
            registry
                .invoke(
                    "add_spreadsheet_row",
                    json!({ "sheet_name": "Load", "row_data": format!("row {}", i) }),
                )
                .await
        }
    });
    let results = futures::future::join_all(calls).await;

    assert!(results.iter().all(|r| matches!(r, Ok(res) if res.is_success())));
    assert_eq!(hook.hits(), 5);
    Ok(())
}

#[tokio::test]
async fn test_model_tool_call_round_trip() -> anyhow::Result<()> {
    use interview_agent::agent::tools::{dispatch_tool_call, ToolCall};

    let hook = spawn_webhook(200, Duration::ZERO).await;
    let registry = builtin_registry(&webhooks(&hook.url, &hook.url, 5))?;

    let call: ToolCall = serde_json::from_value(json!({
        "id": "call_abc",
        "type": "function",
        "function": {
            "name": "send_email",
            "arguments": "{\"to\":\"candidate@example.com\",\"subject\":\"Next steps\",\"body\":\"We will be in touch.\"}"
        }
    }))?;
    let message = dispatch_tool_call(&registry, &call).await;

    assert_eq!(message.role, "tool");
    assert_eq!(message.tool_call_id, "call_abc");
    assert_eq!(message.content, "Email sent successfully.");
    assert_eq!(hook.requests()[0]["subject"], "Next steps");
    Ok(())
}
