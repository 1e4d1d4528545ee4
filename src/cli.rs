//! CLI interface for interview-agent

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;

use crate::agent::tools::{tool_definition, tool_definitions};
use crate::agent::AgentProfile;
use crate::config::{self, Config};
use crate::functions::{self, builtin};
use crate::server::{self, ServerState};

#[derive(Parser)]
#[command(name = "interview-agent")]
#[command(about = "Function dispatcher and profile for the voice interview agent", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to config.toml (default: platform config directory)
    #[arg(short, long, global = true, env = "INTERVIEW_AGENT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the functions the model can call
    Functions {
        /// Print OpenAI tool definitions instead of descriptors
        #[arg(long)]
        tools: bool,
    },
    /// Invoke a function once and print the result
    Call {
        /// Function name
        name: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Print the agent manifest consumed by the conversation engine
    Profile,
    /// Start the function invocation server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Inspect or create the configuration file
    Config {
        /// Show the effective configuration
        #[arg(long)]
        show: bool,
        /// Write a default configuration file
        #[arg(long)]
        init: bool,
        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
        /// Print the configuration file path
        #[arg(long)]
        path: bool,
        /// Print the built-in defaults
        #[arg(long)]
        defaults: bool,
    },
}

/// Parse arguments and run the selected command
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config_file = cli.config.as_deref();

    match cli.command {
        Commands::Functions { tools } => {
            let descriptors = builtin::descriptors();
            let output = if tools {
                let defs: Vec<_> = descriptors.iter().map(tool_definition).collect();
                serde_json::to_string_pretty(&defs)?
            } else {
                serde_json::to_string_pretty(&descriptors)?
            };
            println!("{}", output);
        }
        Commands::Call { name, args } => {
            let config = Config::load(config_file)?;
            let registry = functions::builtin_registry(&config.webhooks)?;

            let args: Value = serde_json::from_str(&args).context("--args must be valid JSON")?;
            let result = registry.invoke(&name, args).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);

            if !result.is_success() {
                bail!("{} failed: {}", name, result.text());
            }
        }
        Commands::Profile => {
            let config = Config::load(config_file)?;
            let registry = functions::builtin_registry(&config.webhooks)?;
            let profile = AgentProfile::from_config(&config.agent)?;
            println!("{}", serde_json::to_string_pretty(&profile.manifest(&registry))?);
        }
        Commands::Serve { host, port } => {
            let config = Config::load(config_file)?;
            let registry = Arc::new(functions::builtin_registry(&config.webhooks)?);
            let profile = Arc::new(AgentProfile::from_config(&config.agent)?);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            println!("Tools advertised: {}", tool_definitions(&registry).len());
            server::start(&host, port, ServerState::new(registry, profile)).await?;
        }
        Commands::Config {
            show,
            init,
            force,
            path,
            defaults,
        } => {
            let target = match config_file {
                Some(p) => p.to_path_buf(),
                None => config::config_path()?,
            };

            if path {
                println!("{}", target.display());
            }

            if defaults {
                print!("{}", config::default_config_toml());
            }

            if init {
                if target.exists() && !force {
                    bail!("{} already exists (use --force to overwrite)", target.display());
                }
                let written = Config::default().save(Some(&target))?;
                println!("Wrote default configuration to {}", written.display());
            }

            if show || !(path || init || defaults) {
                let config = Config::load(Some(&target))?;
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}
