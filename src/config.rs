//! Configuration management
//!
//! Webhook endpoints, agent pipeline selections and the HTTP listener.
//! Loaded from a TOML file, then overridden from the environment.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

use crate::agent::AutoSubscribe;

/// Environment variable overriding `webhooks.email_url`
pub const ENV_EMAIL_WEBHOOK_URL: &str = "INTERVIEW_AGENT_EMAIL_WEBHOOK_URL";
/// Environment variable overriding `webhooks.sheet_url`
pub const ENV_SHEET_WEBHOOK_URL: &str = "INTERVIEW_AGENT_SHEET_WEBHOOK_URL";
/// Environment variable overriding `webhooks.timeout_secs`
pub const ENV_WEBHOOK_TIMEOUT_SECS: &str = "INTERVIEW_AGENT_WEBHOOK_TIMEOUT_SECS";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Outbound webhook settings
    #[serde(default)]
    pub webhooks: WebhooksConfig,
    /// Voice pipeline and prompt settings
    #[serde(default)]
    pub agent: AgentConfig,
    /// Function invocation server
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhooksConfig {
    /// Endpoint receiving `{to, subject, body}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_url: Option<String>,
    /// Endpoint receiving `{sheet_name, row_data}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_url: Option<String>,
    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Reject implausible recipient addresses before calling the webhook
    #[serde(default = "default_true")]
    pub validate_recipient: bool,
}

fn default_timeout_secs() -> u64 {
    crate::webhook::DEFAULT_TIMEOUT.as_secs()
}

fn default_true() -> bool {
    true
}

impl Default for WebhooksConfig {
    fn default() -> Self {
        Self {
            email_url: None,
            sheet_url: None,
            timeout_secs: default_timeout_secs(),
            validate_recipient: true,
        }
    }
}

impl WebhooksConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject settings that would make every call fail
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            bail!("webhooks.timeout_secs must be at least 1 second");
        }
        Ok(())
    }

    /// Parsed email webhook URL
    pub fn email_endpoint(&self) -> Result<Url> {
        parse_endpoint("email", self.email_url.as_deref(), ENV_EMAIL_WEBHOOK_URL)
    }

    /// Parsed spreadsheet webhook URL
    pub fn sheet_endpoint(&self) -> Result<Url> {
        parse_endpoint("sheet", self.sheet_url.as_deref(), ENV_SHEET_WEBHOOK_URL)
    }
}

fn parse_endpoint(kind: &str, raw: Option<&str>, env_var: &str) -> Result<Url> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => bail!(
            "No {} webhook URL configured. Set webhooks.{}_url or {}",
            kind,
            kind,
            env_var
        ),
    };

    let url = Url::parse(raw).with_context(|| format!("Invalid {} webhook URL: {}", kind, raw))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        bail!("{} webhook URL must be http or https, got {}", kind, url.scheme());
    }
    Ok(url)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Speech-to-text provider
    #[serde(default = "default_stt_provider")]
    pub stt_provider: String,
    /// Language model provider
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    /// Language model
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// Text-to-speech provider
    #[serde(default = "default_tts_provider")]
    pub tts_provider: String,
    /// Text-to-speech voice
    #[serde(default = "default_tts_voice")]
    pub tts_voice: String,
    /// Voice activity detector
    #[serde(default = "default_vad")]
    pub vad: String,
    /// Let the candidate interrupt the agent while it speaks
    #[serde(default = "default_true")]
    pub allow_interruptions: bool,
    /// Publish transcripts of what the candidate says
    #[serde(default = "default_true")]
    pub user_transcription: bool,
    /// Publish transcripts of what the agent says
    #[serde(default = "default_true")]
    pub agent_transcription: bool,
    /// Which room tracks to subscribe to
    #[serde(default = "default_auto_subscribe")]
    pub auto_subscribe: AutoSubscribe,
    /// Replace the built-in interview script
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_prompt_path: Option<PathBuf>,
    /// Replace the built-in opening greeting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting_path: Option<PathBuf>,
}

fn default_stt_provider() -> String {
    "deepgram".to_string()
}

fn default_llm_provider() -> String {
    "openai".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_tts_provider() -> String {
    "openai".to_string()
}

fn default_tts_voice() -> String {
    "shimmer".to_string()
}

fn default_vad() -> String {
    "silero".to_string()
}

fn default_auto_subscribe() -> AutoSubscribe {
    AutoSubscribe::AudioOnly
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            stt_provider: default_stt_provider(),
            llm_provider: default_llm_provider(),
            llm_model: default_llm_model(),
            tts_provider: default_tts_provider(),
            tts_voice: default_tts_voice(),
            vad: default_vad(),
            allow_interruptions: true,
            user_transcription: true,
            agent_transcription: true,
            auto_subscribe: default_auto_subscribe(),
            system_prompt_path: None,
            greeting_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing file yields defaults. Environment overrides are applied
    /// last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => config_path()?,
        };

        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            Self::from_toml_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?
        } else {
            Config::default()
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse TOML contents
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.webhooks.validate()
    }

    /// Apply overrides from an environment lookup
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_EMAIL_WEBHOOK_URL) {
            self.webhooks.email_url = Some(url);
        }
        if let Some(url) = lookup(ENV_SHEET_WEBHOOK_URL) {
            self.webhooks.sheet_url = Some(url);
        }
        if let Some(secs) = lookup(ENV_WEBHOOK_TIMEOUT_SECS) {
            self.webhooks.timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", ENV_WEBHOOK_TIMEOUT_SECS))?;
        }
        self.validate()
    }

    /// Save configuration to `path`, or to the default location
    pub fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => config_path()?,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(path)
    }
}

/// Get the configuration file path
pub fn config_path() -> Result<PathBuf> {
    let base = directories::ProjectDirs::from("com", "interview-agent", "interview-agent")
        .context("Failed to get project directories")?;
    Ok(base.config_dir().join("config.toml"))
}

/// Get default configuration as TOML string
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| "# Default configuration\n".to_string())
}
