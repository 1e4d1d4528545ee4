//! Interview Agent - function dispatcher for the voice interview agent

use interview_agent::cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (INFO for this crate by default, override with RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("interview_agent=info,tower_http=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    cli::run().await
}
