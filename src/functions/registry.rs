//! Function registry for the conversation engine
//!
//! Holds the callable side-effect functions together with their declared
//! parameter contracts. The registry is built once at startup and is
//! read-only afterwards, so it can be shared behind an `Arc` without locks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::validate::{validate_arguments, FunctionArgs};

/// Parameter types a function may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
}

impl ParameterType {
    /// JSON Schema type name
    pub fn json_type(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
        }
    }

    /// Whether a JSON value has this type
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParameterType::String => value.is_string(),
            ParameterType::Number => value.is_number(),
            ParameterType::Boolean => value.is_boolean(),
        }
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.json_type())
    }
}

/// Declared parameter of a callable function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Argument name as the model must send it
    pub name: String,
    /// Primitive type tag
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    /// Model-facing documentation
    pub description: String,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, param_type: ParameterType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
        }
    }

    /// Shorthand for a string parameter
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParameterType::String, description)
    }
}

/// Call contract advertised to the language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Unique function name
    pub name: String,
    /// What the function does, written for the model
    pub description: String,
    /// Declared parameters, all required
    pub parameters: Vec<ParameterSpec>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a declared parameter
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.parameters.push(spec);
        self
    }

    /// Look up a declared parameter by name
    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Outcome of a function call, rendered back into the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CallResult {
    Success {
        message: String,
    },
    Failure {
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status_code: Option<u16>,
    },
}

impl CallResult {
    pub fn success(message: impl Into<String>) -> Self {
        CallResult::Success { message: message.into() }
    }

    pub fn failure(reason: impl Into<String>, status_code: Option<u16>) -> Self {
        CallResult::Failure {
            reason: reason.into(),
            status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success { .. })
    }

    /// HTTP status carried by a failure, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CallResult::Success { .. } => None,
            CallResult::Failure { status_code, .. } => *status_code,
        }
    }

    /// Text the agent can speak or log
    pub fn text(&self) -> &str {
        match self {
            CallResult::Success { message } => message,
            CallResult::Failure { reason, .. } => reason,
        }
    }
}

/// Registry-level failures. These are wiring bugs, not user errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Function already registered: {0}")]
    DuplicateName(String),
}

/// Failures raised by a handler while performing its side effect
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Failed to send email. {reason}")]
    EmailDelivery {
        reason: String,
        status_code: Option<u16>,
    },

    #[error("Failed to add row to Google Sheet. {reason}")]
    SheetAppend {
        reason: String,
        status_code: Option<u16>,
    },

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

impl HandlerError {
    /// HTTP status returned by the webhook, when one was received
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HandlerError::EmailDelivery { status_code, .. }
            | HandlerError::SheetAppend { status_code, .. } => *status_code,
            HandlerError::InvalidArguments(_) => None,
        }
    }
}

impl From<HandlerError> for CallResult {
    fn from(err: HandlerError) -> Self {
        CallResult::failure(err.to_string(), err.status_code())
    }
}

/// A side-effect bound to a function name
#[async_trait]
pub trait FunctionHandler: Send + Sync {
    /// Perform the call with arguments already checked against the descriptor
    async fn call(&self, args: FunctionArgs) -> Result<String, HandlerError>;
}

/// Adapts an async closure into a [`FunctionHandler`]
pub struct FnHandler<F>(F);

impl<F> FnHandler<F> {
    pub fn new<Fut>(f: F) -> Self
    where
        F: Fn(FunctionArgs) -> Fut + Send + Sync,
        Fut: Future<Output = Result<String, HandlerError>> + Send + 'static,
    {
        Self(f)
    }
}

#[async_trait]
impl<F, Fut> FunctionHandler for FnHandler<F>
where
    F: Fn(FunctionArgs) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, HandlerError>> + Send + 'static,
{
    async fn call(&self, args: FunctionArgs) -> Result<String, HandlerError> {
        (self.0)(args).await
    }
}

struct Entry {
    descriptor: FunctionDescriptor,
    handler: Arc<dyn FunctionHandler>,
}

/// Name-indexed set of callable functions, kept in registration order
#[derive(Default)]
pub struct FunctionRegistry {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl FunctionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function. The first registration of a name wins.
    pub fn register(
        &mut self,
        descriptor: FunctionDescriptor,
        handler: Arc<dyn FunctionHandler>,
    ) -> Result<(), RegistryError> {
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateName(descriptor.name));
        }

        info!(
            "Registered function: {} ({} parameters)",
            descriptor.name,
            descriptor.parameters.len()
        );
        self.index.insert(descriptor.name.clone(), self.entries.len());
        self.entries.push(Entry { descriptor, handler });
        Ok(())
    }

    /// Look up the handler for a name
    pub fn resolve(&self, name: &str) -> Result<Arc<dyn FunctionHandler>, RegistryError> {
        self.entry(name).map(|e| e.handler.clone())
    }

    /// All descriptors in registration order
    pub fn describe(&self) -> Vec<FunctionDescriptor> {
        self.entries.iter().map(|e| e.descriptor.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate arguments and run the named function.
    ///
    /// An unknown name is returned as `Err` without touching any handler.
    /// Everything that goes wrong after resolution (bad arguments, webhook
    /// failures) comes back as [`CallResult::Failure`].
    pub async fn invoke(&self, name: &str, args: Value) -> Result<CallResult, RegistryError> {
        let entry = self.entry(name)?;
        let call_id = Uuid::new_v4();

        let args = match validate_arguments(&entry.descriptor, args) {
            Ok(args) => args,
            Err(e) => {
                warn!(%call_id, function = name, "Rejected call: {}", e);
                return Ok(e.into());
            }
        };

        debug!(%call_id, function = name, "Invoking function");
        let start = Instant::now();
        let result = entry.handler.call(args).await;
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok(match result {
            Ok(message) => {
                info!(%call_id, function = name, duration_ms, "Function call succeeded");
                CallResult::success(message)
            }
            Err(e) => {
                warn!(%call_id, function = name, duration_ms, "Function call failed: {}", e);
                e.into()
            }
        })
    }

    fn entry(&self, name: &str) -> Result<&Entry, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| RegistryError::UnknownFunction(name.to_string()))
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.entries.iter().map(|e| &e.descriptor.name).collect::<Vec<_>>())
            .finish()
    }
}
