use anyhow::Result;
use chain_explorer::cli::{execute, Cli};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Quiet by default so tables stay readable
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
