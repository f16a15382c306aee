// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use chain_explorer::{
    api::{start_server, AppState},
    config::ExplorerConfig,
    probe::{build_probe_client, EndpointMonitor},
    registry::{Catalog, RegistryClient},
};
use std::{env, sync::Arc};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    info!("Starting {}", chain_explorer::version::get_version_string());

    let config = ExplorerConfig::from_env();
    config.validate().map_err(|e| anyhow!(e))?;

    // The catalog is fetched once and treated as read-only
    let registry = RegistryClient::new(&config)?;
    let catalog = Catalog::new(registry.fetch_chains().await?);
    info!(
        chains = catalog.len(),
        network_types = ?catalog.network_types(),
        "Chain catalog loaded"
    );

    let http_client = build_probe_client(&config.user_agent)?;
    let monitor = Arc::new(EndpointMonitor::new(&http_client));

    let initial = match config.initial_chain.as_deref() {
        Some(name) => {
            let chain = catalog.get(name);
            if chain.is_none() {
                warn!(chain = %name, "INITIAL_CHAIN not in registry, using first entry");
            }
            chain.or_else(|| catalog.default_chain())
        }
        None => catalog.default_chain(),
    };
    if let Some(chain) = initial {
        monitor.select(&chain.chain_name, &chain.apis).await?;
    }

    let state = AppState {
        catalog: Arc::new(catalog),
        registry: Arc::new(registry),
        monitor: monitor.clone(),
    };

    let listener = TcpListener::bind(config.bind_address()).await?;
    start_server(state, listener, shutdown_signal()).await?;

    monitor.shutdown().await;
    info!("Chain explorer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
