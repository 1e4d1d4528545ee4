//! HTTP handlers for function listing and invocation

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::agent::tools::tool_definitions;
use crate::functions::RegistryError;
use crate::server::ServerState;

/// Status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub functions: usize,
}

/// Health and registry size
pub async fn status_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(StatusResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        functions: state.registry.len(),
    })
}

/// Registered function descriptors
pub async fn list_functions_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.registry.describe())
}

/// OpenAI-compatible tool definitions
pub async fn list_tools_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(tool_definitions(&state.registry))
}

/// Agent profile with tools
pub async fn agent_handler(State(state): State<ServerState>) -> impl IntoResponse {
    Json(state.profile.manifest(&state.registry)).into_response()
}

/// Invoke a function with a JSON arguments object.
///
/// Handler failures are still a 200: the call was dispatched and the
/// failure is part of the result the engine renders.
pub async fn invoke_handler(
    State(state): State<ServerState>,
    Path(name): Path<String>,
    Json(args): Json<Value>,
) -> impl IntoResponse {
    match state.registry.invoke(&name, args).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e @ RegistryError::UnknownFunction(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
