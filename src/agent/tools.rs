//! Bridge between registered functions and OpenAI-style tool calling
//!
//! The conversation engine advertises [`ToolDefinition`]s to the model and
//! hands back the model's [`ToolCall`]s. Dispatch never fails: every outcome,
//! including malformed calls, becomes a `tool` message the model can read.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::warn;

use crate::functions::{CallResult, FunctionDescriptor, FunctionRegistry};

/// Tool definition for OpenAI-compatible function calling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub r#type: String,
    pub function: FunctionDefinition,
}

/// Function definition for tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Tool call from LLM response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_call_type")]
    pub r#type: String,
    pub function: FunctionCall,
}

fn default_call_type() -> String {
    "function".to_string()
}

/// Function call details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    #[serde(default)]
    pub name: String,
    /// Arguments can arrive as either a JSON string or a raw JSON object
    /// depending on the model. Normalized to a string.
    #[serde(default, deserialize_with = "deserialize_arguments")]
    pub arguments: String,
}

fn deserialize_arguments<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// Result message fed back to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolMessage {
    pub role: String,
    pub content: String,
    pub tool_call_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ToolMessage {
    pub fn tool_result(tool_call_id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.into(),
            tool_call_id: tool_call_id.into(),
            name: Some(name.into()),
        }
    }
}

/// JSON Schema for a descriptor's parameters. All parameters are required.
pub fn parameters_schema(descriptor: &FunctionDescriptor) -> Value {
    let mut properties = Map::new();
    for param in &descriptor.parameters {
        properties.insert(
            param.name.clone(),
            json!({
                "type": param.param_type.json_type(),
                "description": param.description,
            }),
        );
    }

    let required: Vec<&str> = descriptor.parameters.iter().map(|p| p.name.as_str()).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Convert one descriptor
pub fn tool_definition(descriptor: &FunctionDescriptor) -> ToolDefinition {
    ToolDefinition {
        r#type: "function".to_string(),
        function: FunctionDefinition {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: parameters_schema(descriptor),
        },
    }
}

/// All registered functions as tool definitions, in registration order
pub fn tool_definitions(registry: &FunctionRegistry) -> Vec<ToolDefinition> {
    registry.describe().iter().map(tool_definition).collect()
}

/// Run a model tool call through the registry
pub async fn dispatch_tool_call(registry: &FunctionRegistry, call: &ToolCall) -> ToolMessage {
    let name = call.function.name.as_str();
    let content = match execute(registry, call).await {
        Ok(CallResult::Success { message }) => message,
        Ok(CallResult::Failure { reason, .. }) => format!("Error: {}", reason),
        Err(reason) => {
            warn!("Tool call {} ({}) rejected: {}", call.id, name, reason);
            format!("Error: {}", reason)
        }
    };

    ToolMessage::tool_result(call.id.clone(), name, content)
}

async fn execute(registry: &FunctionRegistry, call: &ToolCall) -> Result<CallResult, String> {
    let raw = call.function.arguments.trim();
    let args: Value = if raw.is_empty() {
        Value::Object(Map::new())
    } else {
        serde_json::from_str(raw).map_err(|e| format!("arguments are not valid JSON: {}", e))?
    };

    registry
        .invoke(&call.function.name, args)
        .await
        .map_err(|e| e.to_string())
}
