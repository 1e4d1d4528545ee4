//! In-process webhook endpoint for integration tests

#![allow(dead_code)]

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use interview_agent::config::WebhooksConfig;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    delay: Duration,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// A running mock webhook
pub struct MockWebhook {
    pub url: String,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl MockWebhook {
    /// JSON bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

async fn record(State(state): State<MockState>, Json(body): Json<Value>) -> StatusCode {
    state.requests.lock().unwrap().push(body);
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    state.status
}

/// Serve `POST /hook` answering `status` after `delay`
pub async fn spawn_webhook(status: u16, delay: Duration) -> MockWebhook {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        delay,
        requests: requests.clone(),
    };

    let app = Router::new().route("/hook", post(record)).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockWebhook {
        url: format!("http://{}/hook", addr),
        requests,
    }
}

/// An address nothing is listening on
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/hook", addr)
}

/// Webhook settings pointing at the given URLs
pub fn webhooks(email_url: &str, sheet_url: &str, timeout_secs: u64) -> WebhooksConfig {
    WebhooksConfig {
        email_url: Some(email_url.to_string()),
        sheet_url: Some(sheet_url.to_string()),
        timeout_secs,
        validate_recipient: true,
    }
}
