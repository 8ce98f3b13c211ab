use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use figma_probe::probe::config::{ProbeConfig, DEFAULT_API_URL};
use figma_probe::probe::env_file::EnvFileLocator;
use figma_probe::probe::CredentialProbe;
use figma_probe::shared;

#[derive(Parser)]
#[command(name = "figma-probe")]
#[command(about = "Check that a Figma access token can read a file's version history", long_about = None)]
struct Cli {
    /// Figma access token (read from the settings file when omitted)
    #[arg(long)]
    token: Option<String>,

    /// Figma file id (read from the settings file when omitted)
    #[arg(long)]
    file_id: Option<String>,

    /// Settings file to read instead of ../.env
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Figma API base URL
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Also write diagnostic logs to this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = shared::logging::init_logging(cli.log_dir.as_deref(), "figma-probe")?;

    let config = ProbeConfig {
        api_url: cli.api_url,
        env_file: cli.env_file.map(EnvFileLocator::Fixed).unwrap_or_default(),
    };

    // The outcome is reported on stdout; the exit status is 0 either way.
    match CredentialProbe::from_config(&config) {
        Ok(probe) => {
            probe
                .probe_with_outcome(cli.token.as_deref(), cli.file_id.as_deref())
                .await;
        }
        Err(e) => {
            tracing::error!("Failed to create HTTP client: {}", e);
            println!("✗ Request failed: {e}");
        }
    }

    Ok(())
}
