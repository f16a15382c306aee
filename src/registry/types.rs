// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chain registry records as published by the catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::probe::ProtocolClass;

/// A declared service endpoint of one protocol class.
///
/// Serializes in the catalog's own shape, with `restricted` added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawEndpoint")]
pub struct EndpointDescriptor {
    pub address: String,
    pub provider: String,
    /// Authorized-user marker as published, kept for re-serialization
    #[serde(rename = "authorizedUser", skip_serializing_if = "Option::is_none")]
    pub authorized_user: Option<String>,
    /// Carries an authorized-user marker; shown but never probed
    pub restricted: bool,
}

impl EndpointDescriptor {
    pub fn new(address: impl Into<String>, provider: impl Into<String>, restricted: bool) -> Self {
        Self {
            address: address.into(),
            provider: provider.into(),
            authorized_user: None,
            restricted,
        }
    }
}

/// Wire shape of an endpoint entry
#[derive(Deserialize)]
struct RawEndpoint {
    address: String,
    #[serde(default)]
    provider: String,
    #[serde(default, rename = "authorizedUser", alias = "authorized_user")]
    authorized_user: Option<String>,
    #[serde(default)]
    restricted: bool,
}

impl From<RawEndpoint> for EndpointDescriptor {
    fn from(raw: RawEndpoint) -> Self {
        // An empty marker counts as no marker
        let marked = raw
            .authorized_user
            .as_deref()
            .map(|user| !user.is_empty())
            .unwrap_or(false);
        Self {
            address: raw.address,
            provider: raw.provider,
            authorized_user: raw.authorized_user,
            restricted: marked || raw.restricted,
        }
    }
}

/// Endpoints declared by a chain, per protocol class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainApis {
    #[serde(default)]
    pub rest: Vec<EndpointDescriptor>,
    #[serde(default)]
    pub rpc: Vec<EndpointDescriptor>,
    #[serde(default)]
    pub grpc: Vec<EndpointDescriptor>,
    #[serde(default, rename = "json-rpc")]
    pub json_rpc: Vec<EndpointDescriptor>,
}

impl ChainApis {
    pub fn endpoints(&self, class: ProtocolClass) -> &[EndpointDescriptor] {
        match class {
            ProtocolClass::Rest => &self.rest,
            ProtocolClass::Rpc => &self.rpc,
            ProtocolClass::Grpc => &self.grpc,
            ProtocolClass::JsonRpc => &self.json_rpc,
        }
    }

    pub fn is_empty(&self) -> bool {
        ProtocolClass::ALL
            .iter()
            .all(|class| self.endpoints(*class).is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogoUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeToken {
    pub denom: String,
    #[serde(default)]
    pub fixed_min_gas_price: f64,
    #[serde(default)]
    pub low_gas_price: f64,
    #[serde(default)]
    pub average_gas_price: f64,
    #[serde(default)]
    pub high_gas_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fees {
    #[serde(default)]
    pub fee_tokens: Vec<FeeToken>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IbcChannel {
    pub chain_id: String,
    pub port_id: String,
    pub channel_id: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Minitia {
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_bridge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_denoms: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_l1: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ibc_channels: Option<Vec<IbcChannel>>,
    /// URL of the chain's asset list document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assetlist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minitia: Option<Minitia>,
}

/// One chain entry of the registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chain {
    pub chain_name: String,
    pub chain_id: String,
    #[serde(default)]
    pub pretty_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub network_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "logo_URIs", skip_serializing_if = "Option::is_none")]
    pub logo_uris: Option<LogoUris>,
    #[serde(default)]
    pub apis: ChainApis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fees: Option<Fees>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ChainMetadata>,
    #[serde(default)]
    pub bech32_prefix: String,
}

impl Chain {
    /// Display name, falling back to the chain id
    pub fn display_name(&self) -> &str {
        if self.pretty_name.is_empty() {
            &self.chain_id
        } else {
            &self.pretty_name
        }
    }

    pub fn ibc_channels(&self) -> &[IbcChannel] {
        self.metadata
            .as_ref()
            .and_then(|m| m.ibc_channels.as_deref())
            .unwrap_or(&[])
    }

    pub fn asset_list_url(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.assetlist.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceCounterparty {
    pub chain_name: String,
    pub base_denom: String,
    pub channel_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTrace {
    #[serde(rename = "type")]
    pub kind: String,
    pub counterparty: TraceCounterparty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub denom: String,
    #[serde(default)]
    pub type_asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub base: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display: String,
    pub symbol: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traces: Option<Vec<AssetTrace>>,
    #[serde(default, rename = "logo_URIs", skip_serializing_if = "Option::is_none")]
    pub logo_uris: Option<LogoUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
    #[serde(default)]
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub chain_name: String,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Errors fetching catalog documents
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Registry request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Registry returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("Failed to decode registry document: {0}")]
    Decode(#[from] serde_json::Error),
}
