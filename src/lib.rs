//! Interview Agent - function dispatcher for a voice interview agent
//!
//! The conversation engine (room transport, speech-to-text, language model,
//! text-to-speech) is external. This library supplies what it is configured
//! with:
//! - An explicit registry of callable side-effect functions
//! - `send_email` and `add_spreadsheet_row`, each one outbound webhook POST
//! - The interview profile: system prompt, greeting, provider selections
//! - An OpenAI-style tool-calling bridge and a small HTTP surface
//!
//! # Example
//!
//! ```ignore
//! use interview_agent::{config::Config, functions};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load(None)?;
//!     let registry = functions::builtin_registry(&config.webhooks)?;
//!     let result = registry
//!         .invoke("add_spreadsheet_row", serde_json::json!({
//!             "sheet_name": "Candidates",
//!             "row_data": "Ana, 5 years, Discord",
//!         }))
//!         .await?;
//!     println!("{}", result.text());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod functions;
pub mod server;
pub mod webhook;

// Re-export commonly used types for convenience
pub use agent::{AgentProfile, ToolCall, ToolDefinition, ToolMessage};
pub use config::Config;
pub use functions::{
    builtin_registry, CallResult, FunctionDescriptor, FunctionHandler, FunctionRegistry,
    HandlerError, ParameterSpec, ParameterType, RegistryError,
};
pub use webhook::{WebhookClient, WebhookError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
