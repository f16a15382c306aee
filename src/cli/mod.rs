pub mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::ExplorerConfig;

/// Chain explorer CLI
#[derive(Parser, Debug)]
#[command(name = "explorer-cli")]
#[command(version = crate::version::VERSION_NUMBER)]
#[command(about = "Browse the chain registry and check endpoint health", long_about = None)]
pub struct Cli {
    /// Chain registry document URL
    #[arg(long, global = true, env = "CHAIN_REGISTRY_URL")]
    pub registry_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List chains in the registry
    Chains(commands::ChainsArgs),

    /// Show a chain's configuration
    Show(commands::ShowArgs),

    /// Run one probe round against a chain's endpoints
    Probe(commands::ProbeArgs),

    /// List a chain's assets
    Assets(commands::AssetsArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    dotenv::dotenv().ok();

    let mut config = ExplorerConfig::from_env();
    if let Some(url) = cli.registry_url {
        config.registry_url = url;
    }

    match cli.command {
        Commands::Chains(args) => commands::list_chains(config, args).await,
        Commands::Show(args) => commands::show_chain(config, args).await,
        Commands::Probe(args) => commands::probe_chain(config, args).await,
        Commands::Assets(args) => commands::list_assets(config, args).await,
    }
}
