//! Agent module - interview profile and tool-calling bridge

pub mod profile;
pub mod prompts;
pub mod tools;

pub use profile::{AgentManifest, AgentProfile, AutoSubscribe, ProviderChoice, TranscriptionOptions};
pub use tools::{dispatch_tool_call, tool_definitions, ToolCall, ToolDefinition, ToolMessage};
