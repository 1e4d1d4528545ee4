//! Argument checking at the registry boundary

use serde_json::{Map, Value};

use super::registry::{FunctionDescriptor, HandlerError};

/// Arguments that passed validation against a descriptor
#[derive(Debug, Clone, Default)]
pub struct FunctionArgs {
    values: Map<String, Value>,
}

impl FunctionArgs {
    /// String argument
    pub fn str(&self, name: &str) -> Result<&str, HandlerError> {
        self.values
            .get(name)
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::InvalidArguments(format!("'{}' must be a string", name)))
    }

    /// Numeric argument
    pub fn number(&self, name: &str) -> Result<f64, HandlerError> {
        self.values
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| HandlerError::InvalidArguments(format!("'{}' must be a number", name)))
    }

    /// Boolean argument
    pub fn bool(&self, name: &str) -> Result<bool, HandlerError> {
        self.values
            .get(name)
            .and_then(Value::as_bool)
            .ok_or_else(|| HandlerError::InvalidArguments(format!("'{}' must be a boolean", name)))
    }
}

/// Check a JSON arguments object against the declared parameters.
///
/// Every declared parameter is required, must carry its declared type, and
/// no undeclared key is accepted. Key order is irrelevant.
pub fn validate_arguments(descriptor: &FunctionDescriptor, args: Value) -> Result<FunctionArgs, HandlerError> {
    let values = match args {
        Value::Object(map) => map,
        // Models sometimes send null for zero-argument calls
        Value::Null => Map::new(),
        other => {
            return Err(HandlerError::InvalidArguments(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )))
        }
    };

    for key in values.keys() {
        if descriptor.parameter(key).is_none() {
            return Err(HandlerError::InvalidArguments(format!(
                "unexpected parameter '{}' for {}",
                key, descriptor.name
            )));
        }
    }

    let missing: Vec<&str> = descriptor
        .parameters
        .iter()
        .filter(|p| !values.contains_key(&p.name))
        .map(|p| p.name.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(HandlerError::InvalidArguments(format!(
            "missing required parameter(s) for {}: {}",
            descriptor.name,
            missing.join(", ")
        )));
    }

    for spec in &descriptor.parameters {
        let value = &values[&spec.name];
        if !spec.param_type.matches(value) {
            return Err(HandlerError::InvalidArguments(format!(
                "'{}' must be a {}, got {}",
                spec.name,
                spec.param_type,
                json_kind(value)
            )));
        }
    }

    Ok(FunctionArgs { values })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
