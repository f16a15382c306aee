// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP client for the chain registry

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::types::{Asset, AssetList, Chain, RegistryError};
use crate::config::ExplorerConfig;

const REGISTRY_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches the chain catalog and per-chain asset lists
pub struct RegistryClient {
    http_client: Client,
    registry_url: String,
}

impl RegistryClient {
    pub fn new(config: &ExplorerConfig) -> Result<Self, RegistryError> {
        let http_client = Client::builder()
            .timeout(REGISTRY_TIMEOUT)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            http_client,
            registry_url: config.registry_url.clone(),
        })
    }

    pub fn registry_url(&self) -> &str {
        &self.registry_url
    }

    /// Fetch the full chain list
    pub async fn fetch_chains(&self) -> Result<Vec<Chain>, RegistryError> {
        let chains: Vec<Chain> = self.get_json(&self.registry_url).await?;
        info!(
            registry = %self.registry_url,
            chains = chains.len(),
            "Loaded chain registry"
        );
        Ok(chains)
    }

    /// Fetch the asset list of a chain.
    ///
    /// Chains without an asset list URL, and any fetch failure, yield an
    /// empty list.
    pub async fn fetch_asset_list(&self, chain: &Chain) -> Vec<Asset> {
        let Some(url) = chain.asset_list_url() else {
            debug!(chain = %chain.chain_name, "No asset list declared");
            return Vec::new();
        };

        match self.get_json::<AssetList>(url).await {
            Ok(list) => list.assets,
            Err(e) => {
                warn!(chain = %chain.chain_name, "Error fetching asset list: {}", e);
                Vec::new()
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RegistryError> {
        debug!("Fetching registry document: {}", url);

        let response = self.http_client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
