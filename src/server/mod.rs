//! Function invocation server
//!
//! Lets an out-of-process conversation engine list and call the registered
//! functions over HTTP.

pub mod http;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::agent::AgentProfile;
use crate::functions::FunctionRegistry;

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    pub registry: Arc<FunctionRegistry>,
    pub profile: Arc<AgentProfile>,
}

impl ServerState {
    pub fn new(registry: Arc<FunctionRegistry>, profile: Arc<AgentProfile>) -> Self {
        Self { registry, profile }
    }
}

/// Build the router
pub fn router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/status", get(http::status_handler))
        .route("/api/agent", get(http::agent_handler))
        .route("/api/tools", get(http::list_tools_handler))
        .route("/api/functions", get(http::list_functions_handler))
        .route("/api/functions/{name}", post(http::invoke_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server and run until the process is stopped
pub async fn start(host: &str, port: u16, state: ServerState) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

    let functions: Vec<String> = state.registry.describe().into_iter().map(|d| d.name).collect();
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Serving {} function(s) on http://{}: {}", functions.len(), addr, functions.join(", "));
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
