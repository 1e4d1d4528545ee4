//! Agent profile handed to the conversation engine
//!
//! Everything the engine needs to run the interview: prompt, greeting,
//! provider selections and the callable functions.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::prompts::{INTERVIEW_GREETING, INTERVIEW_SYSTEM_PROMPT};
use super::tools::{tool_definitions, ToolDefinition};
use crate::config::AgentConfig;
use crate::functions::FunctionRegistry;

/// Which room tracks the agent subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoSubscribe {
    SubscribeAll,
    SubscribeNone,
    AudioOnly,
    VideoOnly,
}

/// A provider and its optional model/voice selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderChoice {
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

impl ProviderChoice {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: None,
            voice: None,
        }
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }
}

/// Transcript publishing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionOptions {
    pub user_transcription: bool,
    pub agent_transcription: bool,
}

/// Voice pipeline configuration and prompt payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    pub system_prompt: String,
    pub greeting: String,
    pub allow_interruptions: bool,
    pub stt: ProviderChoice,
    pub llm: ProviderChoice,
    pub tts: ProviderChoice,
    pub vad: String,
    pub transcription: TranscriptionOptions,
    pub auto_subscribe: AutoSubscribe,
}

/// Profile plus the functions the model may call
#[derive(Debug, Clone, Serialize)]
pub struct AgentManifest<'a> {
    #[serde(flatten)]
    pub profile: &'a AgentProfile,
    pub tools: Vec<ToolDefinition>,
}

impl AgentProfile {
    /// The built-in Community Manager interview
    pub fn interview() -> Self {
        Self::with_prompts(&AgentConfig::default(), INTERVIEW_SYSTEM_PROMPT, INTERVIEW_GREETING)
    }

    /// Build from configuration, loading prompt files when configured
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        let system_prompt = match &config.system_prompt_path {
            Some(path) => read_prompt(path, "system prompt")?,
            None => INTERVIEW_SYSTEM_PROMPT.to_string(),
        };
        let greeting = match &config.greeting_path {
            Some(path) => read_prompt(path, "greeting")?,
            None => INTERVIEW_GREETING.to_string(),
        };

        Ok(Self::with_prompts(config, system_prompt, greeting))
    }

    fn with_prompts(config: &AgentConfig, system_prompt: impl Into<String>, greeting: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            greeting: greeting.into(),
            allow_interruptions: config.allow_interruptions,
            stt: ProviderChoice::new(&config.stt_provider),
            llm: ProviderChoice::new(&config.llm_provider).model(&config.llm_model),
            tts: ProviderChoice::new(&config.tts_provider).voice(&config.tts_voice),
            vad: config.vad.clone(),
            transcription: TranscriptionOptions {
                user_transcription: config.user_transcription,
                agent_transcription: config.agent_transcription,
            },
            auto_subscribe: config.auto_subscribe,
        }
    }

    /// Render the document the conversation engine consumes
    pub fn manifest<'a>(&'a self, registry: &FunctionRegistry) -> AgentManifest<'a> {
        AgentManifest {
            profile: self,
            tools: tool_definitions(registry),
        }
    }
}

fn read_prompt(path: &Path, what: &str) -> Result<String> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} from {}", what, path.display()))?;
    let text = text.trim();
    if text.is_empty() {
        anyhow::bail!("{} file {} is empty", what, path.display());
    }
    Ok(text.to_string())
}
