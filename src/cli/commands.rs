// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use clap::Args;
use tracing::info;

use crate::config::ExplorerConfig;
use crate::probe::{
    build_probe_client, project, strategy_for, BatchProber, ProjectedEndpoints, ProtocolClass,
};
use crate::registry::{Catalog, Chain, ChainFilter, RegistryClient};

/// Arguments for the chains command
#[derive(Args, Debug)]
pub struct ChainsArgs {
    /// Case-insensitive match on chain name, chain id or pretty name
    #[arg(long)]
    pub search: Option<String>,

    /// Network type to show (e.g. mainnet, testnet); "all" for every type
    #[arg(long)]
    pub network_type: Option<String>,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Chain name or chain id
    pub chain: String,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Chain name or chain id
    pub chain: String,

    /// Only this protocol class (rest, rpc, grpc, json-rpc)
    #[arg(long)]
    pub class: Option<ProtocolClass>,
}

/// Arguments for the assets command
#[derive(Args, Debug)]
pub struct AssetsArgs {
    /// Chain name or chain id
    pub chain: String,
}

async fn load_catalog(config: &ExplorerConfig) -> Result<(RegistryClient, Catalog)> {
    config.validate().map_err(|e| anyhow!(e))?;
    let registry = RegistryClient::new(config)?;
    let chains = registry.fetch_chains().await?;
    Ok((registry, Catalog::new(chains)))
}

fn find_chain<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Chain> {
    catalog
        .get(name)
        .ok_or_else(|| anyhow!("Chain '{}' not found in registry", name))
}

pub async fn list_chains(config: ExplorerConfig, args: ChainsArgs) -> Result<()> {
    let (_, catalog) = load_catalog(&config).await?;
    let filter = ChainFilter::new(args.search, args.network_type);
    let chains = filter.apply(catalog.chains());

    println!("{:<24} {:<20} {:<24} {}", "NAME", "CHAIN ID", "PRETTY NAME", "NETWORK");
    for chain in &chains {
        println!(
            "{:<24} {:<20} {:<24} {}",
            chain.chain_name,
            chain.chain_id,
            chain.display_name(),
            chain.network_type
        );
    }
    println!();
    println!(
        "{} of {} chains (network types: {})",
        chains.len(),
        catalog.len(),
        catalog.network_types().join(", ")
    );
    Ok(())
}

pub async fn show_chain(config: ExplorerConfig, args: ShowArgs) -> Result<()> {
    let (_, catalog) = load_catalog(&config).await?;
    let chain = find_chain(&catalog, &args.chain)?;

    println!("{} ({})", chain.display_name(), chain.chain_id);
    println!("  Chain name:    {}", chain.chain_name);
    println!("  Network type:  {}", chain.network_type);
    println!("  Bech32 prefix: {}", chain.bech32_prefix);
    if let Some(status) = &chain.status {
        println!("  Status:        {}", status);
    }
    if let Some(website) = &chain.website {
        println!("  Website:       {}", website);
    }
    if let Some(description) = &chain.description {
        println!("  Description:   {}", description);
    }

    for class in ProtocolClass::ALL {
        let endpoints = chain.apis.endpoints(class);
        if endpoints.is_empty() {
            continue;
        }
        println!();
        println!("  {} endpoints:", class.as_str().to_uppercase());
        for endpoint in endpoints {
            let marker = if endpoint.restricted { " (restricted)" } else { "" };
            println!("    {} [{}]{}", endpoint.address, endpoint.provider, marker);
        }
    }

    if let Some(fees) = &chain.fees {
        println!();
        println!("  Fee tokens:");
        for token in &fees.fee_tokens {
            println!(
                "    {} min={} low={} avg={} high={}",
                token.denom,
                token.fixed_min_gas_price,
                token.low_gas_price,
                token.average_gas_price,
                token.high_gas_price
            );
        }
    }

    let channels = chain.ibc_channels();
    if !channels.is_empty() {
        println!();
        println!("  IBC channels:");
        for channel in channels {
            println!(
                "    {} {}/{} ({})",
                channel.chain_id, channel.port_id, channel.channel_id, channel.version
            );
        }
    }

    Ok(())
}

pub async fn probe_chain(config: ExplorerConfig, args: ProbeArgs) -> Result<()> {
    let (_, catalog) = load_catalog(&config).await?;
    let chain = find_chain(&catalog, &args.chain)?;
    let http_client = build_probe_client(&config.user_agent)?;
    let prober = BatchProber::new();

    let classes: Vec<ProtocolClass> = match args.class {
        Some(class) => vec![class],
        None => ProtocolClass::ALL.to_vec(),
    };

    info!(chain = %chain.chain_name, "Probing endpoints");

    for class in classes {
        let strategy = strategy_for(class, &http_client);
        let round = prober
            .run_round(chain.apis.endpoints(class), strategy.as_ref(), strategy.default_timeout())
            .await;

        println!();
        println!(
            "{} ({} endpoints, {} restricted)",
            class.as_str().to_uppercase(),
            round.outcomes.len(),
            round.restricted_count()
        );

        match project(&round) {
            ProjectedEndpoints::Live(rows) => {
                for row in rows {
                    println!(
                        "  {:<56} {:<20} {:>12} {:>8}  {}",
                        row.url,
                        row.provider,
                        row.height_display(),
                        row.latency_display(),
                        row.status.as_str()
                    );
                    if let Some(message) = &row.error_message {
                        println!("      {}", message);
                    }
                }
            }
            ProjectedEndpoints::Listing(rows) => {
                for row in rows {
                    println!("  {:<56} {}", row.url, row.provider);
                }
            }
        }
    }

    Ok(())
}

pub async fn list_assets(config: ExplorerConfig, args: AssetsArgs) -> Result<()> {
    let (registry, catalog) = load_catalog(&config).await?;
    let chain = find_chain(&catalog, &args.chain)?;
    let assets = registry.fetch_asset_list(chain).await;

    if assets.is_empty() {
        println!("No assets listed for {}", chain.display_name());
        return Ok(());
    }

    println!("{:<12} {:<40} {:>8}  {}", "SYMBOL", "BASE", "DECIMALS", "NAME");
    for asset in &assets {
        println!(
            "{:<12} {:<40} {:>8}  {}",
            asset.symbol, asset.base, asset.decimals, asset.name
        );
    }
    Ok(())
}
