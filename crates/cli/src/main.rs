use clap::Parser;
use condo_core::CONDO_IDENTITY_TOKEN_VAR;
use std::path::PathBuf;

mod commands;

use commands::Commands;

#[derive(Parser)]
#[command(name = "condo-admin")]
#[command(about = "Privileged operations for the condominium administration console", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON configuration file (defaults to $CONDO_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the callable functions base URL
    #[arg(long, global = true)]
    functions_url: Option<String>,

    /// Identity token of the signed-in operator
    #[arg(long, env = CONDO_IDENTITY_TOKEN_VAR, hide_env_values = true, global = true)]
    identity_token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    condo_utils::tracing::init()?;

    let cli = Cli::parse();

    let mut loader = condo_config::ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.file(path);
    }
    if let Some(url) = cli.functions_url {
        loader = loader.functions_base_url(url);
    }
    let config = loader.load()?;

    cli.command.execute(config, cli.identity_token).await?;
    Ok(())
}
