// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Probe strategies, one per protocol class
//!
//! REST and RPC are live-checked over HTTP. gRPC and JSON-RPC are listed
//! only: no transport for them is exercised, a round just echoes the
//! declared endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;
use url::Url;

use super::types::{ProbeError, ProbeOutcome, ProtocolClass};
use crate::registry::EndpointDescriptor;

pub const REST_LIVENESS_PATH: &str = "/cosmos/base/tendermint/v1beta1/blocks/latest";
pub const RPC_LIVENESS_PATH: &str = "/status";

pub const REST_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);
pub const RPC_PROBE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Extracts an optional height from a successful response body
pub type HeightParser = fn(&[u8]) -> Result<Option<String>, ProbeError>;

/// How a protocol class is checked
#[async_trait]
pub trait ProbeStrategy: Send + Sync {
    fn class(&self) -> ProtocolClass;

    /// Whether a network call is made at all
    fn is_live(&self) -> bool;

    /// Per-request budget used when the caller does not override it
    fn default_timeout(&self) -> Duration;

    /// Probe a single endpoint.
    ///
    /// Never fails: every failure mode is folded into `ProbeOutcome::error`.
    /// Time-bounding is the caller's job.
    async fn probe(&self, endpoint: &EndpointDescriptor) -> ProbeOutcome;
}

/// HTTP GET against a fixed liveness path, parsed for a block height
pub struct HttpLivenessStrategy {
    class: ProtocolClass,
    path: &'static str,
    parse: HeightParser,
    timeout: Duration,
    http_client: Client,
}

impl HttpLivenessStrategy {
    pub fn new(
        class: ProtocolClass,
        path: &'static str,
        parse: HeightParser,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            class,
            path,
            parse,
            timeout,
            http_client,
        }
    }

    /// Cosmos SDK REST: latest block header height
    pub fn rest(http_client: Client) -> Self {
        Self::new(
            ProtocolClass::Rest,
            REST_LIVENESS_PATH,
            parse_rest_height,
            REST_PROBE_TIMEOUT,
            http_client,
        )
    }

    /// Tendermint RPC: sync info latest block height
    pub fn rpc(http_client: Client) -> Self {
        Self::new(
            ProtocolClass::Rpc,
            RPC_LIVENESS_PATH,
            parse_rpc_height,
            RPC_PROBE_TIMEOUT,
            http_client,
        )
    }

    /// Full liveness URL for an endpoint address
    pub fn liveness_url(&self, address: &str) -> Result<String, ProbeError> {
        let parsed = Url::parse(address)
            .map_err(|e| ProbeError::Unreachable(format!("Invalid address '{}': {}", address, e)))?;
        if !["http", "https"].contains(&parsed.scheme()) {
            return Err(ProbeError::Unreachable(format!(
                "Unsupported scheme '{}' for {}",
                parsed.scheme(),
                address
            )));
        }
        Ok(format!("{}{}", address.trim_end_matches('/'), self.path))
    }

    async fn fetch_height(&self, url: &str) -> Result<Option<String>, ProbeError> {
        // Time-bounded by the caller
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Unreachable(format!("Failed to fetch: HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ProbeError::Unreachable(e.to_string()))?;

        (self.parse)(&body)
    }
}

#[async_trait]
impl ProbeStrategy for HttpLivenessStrategy {
    fn class(&self) -> ProtocolClass {
        self.class
    }

    fn is_live(&self) -> bool {
        true
    }

    fn default_timeout(&self) -> Duration {
        self.timeout
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> ProbeOutcome {
        let url = match self.liveness_url(&endpoint.address) {
            Ok(url) => url,
            Err(e) => return ProbeOutcome::failure(endpoint.clone(), e),
        };

        let start = Instant::now();
        match self.fetch_height(&url).await {
            Ok(height) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                debug!(class = %self.class, endpoint = %endpoint.address, latency_ms, "Probe succeeded");
                ProbeOutcome::success(endpoint.clone(), latency_ms, height)
            }
            Err(e) => {
                debug!(class = %self.class, endpoint = %endpoint.address, "Probe failed: {}", e);
                ProbeOutcome::failure(endpoint.clone(), e)
            }
        }
    }
}

/// Pass-through for classes that are shown but not checked
pub struct ListingStrategy {
    class: ProtocolClass,
}

impl ListingStrategy {
    pub fn new(class: ProtocolClass) -> Self {
        Self { class }
    }

    pub fn grpc() -> Self {
        Self::new(ProtocolClass::Grpc)
    }

    pub fn json_rpc() -> Self {
        Self::new(ProtocolClass::JsonRpc)
    }
}

#[async_trait]
impl ProbeStrategy for ListingStrategy {
    fn class(&self) -> ProtocolClass {
        self.class
    }

    fn is_live(&self) -> bool {
        false
    }

    fn default_timeout(&self) -> Duration {
        Duration::ZERO
    }

    async fn probe(&self, endpoint: &EndpointDescriptor) -> ProbeOutcome {
        ProbeOutcome::listed(endpoint.clone())
    }
}

/// Build the HTTP client shared by live strategies
pub fn build_probe_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(user_agent).build()
}

/// The strategy used for a protocol class
pub fn strategy_for(class: ProtocolClass, http_client: &Client) -> Arc<dyn ProbeStrategy> {
    match class {
        ProtocolClass::Rest => Arc::new(HttpLivenessStrategy::rest(http_client.clone())),
        ProtocolClass::Rpc => Arc::new(HttpLivenessStrategy::rpc(http_client.clone())),
        ProtocolClass::Grpc => Arc::new(ListingStrategy::grpc()),
        ProtocolClass::JsonRpc => Arc::new(ListingStrategy::json_rpc()),
    }
}

#[derive(Deserialize)]
struct LatestBlockResponse {
    block: Option<LatestBlock>,
}

#[derive(Deserialize)]
struct LatestBlock {
    header: Option<LatestBlockHeader>,
}

#[derive(Deserialize)]
struct LatestBlockHeader {
    height: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    result: Option<StatusResult>,
}

#[derive(Deserialize)]
struct StatusResult {
    sync_info: Option<SyncInfo>,
}

#[derive(Deserialize)]
struct SyncInfo {
    latest_block_height: Option<String>,
}

/// `{ block: { header: { height } } }`
pub fn parse_rest_height(body: &[u8]) -> Result<Option<String>, ProbeError> {
    let response: LatestBlockResponse =
        serde_json::from_slice(body).map_err(|e| ProbeError::ParseFailure(e.to_string()))?;
    Ok(response.block.and_then(|b| b.header).and_then(|h| h.height))
}

/// `{ result: { sync_info: { latest_block_height } } }`
pub fn parse_rpc_height(body: &[u8]) -> Result<Option<String>, ProbeError> {
    let response: StatusResponse =
        serde_json::from_slice(body).map_err(|e| ProbeError::ParseFailure(e.to_string()))?;
    Ok(response
        .result
        .and_then(|r| r.sync_info)
        .and_then(|s| s.latest_block_height))
}
