// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Display shapes derived from probe rounds

use serde::{Deserialize, Serialize};

use super::types::ProbeRound;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTag {
    Online,
    Error,
}

impl StatusTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTag::Online => "Online",
            StatusTag::Error => "Error",
        }
    }
}

/// Status row of a live-checked endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointStatus {
    pub url: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub status: StatusTag,
}

impl EndpointStatus {
    /// Latency in seconds with two decimals, `-` when unknown
    pub fn latency_display(&self) -> String {
        match self.latency_ms {
            Some(ms) => format_latency(ms),
            None => "-".to_string(),
        }
    }

    pub fn height_display(&self) -> &str {
        self.block_height.as_deref().unwrap_or("-")
    }
}

/// Row of a listing-only endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointListing {
    pub url: String,
    pub provider: String,
}

/// Projection of one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectedEndpoints {
    Live(Vec<EndpointStatus>),
    Listing(Vec<EndpointListing>),
}

impl ProjectedEndpoints {
    pub fn len(&self) -> usize {
        match self {
            ProjectedEndpoints::Live(rows) => rows.len(),
            ProjectedEndpoints::Listing(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn format_latency(latency_ms: u64) -> String {
    format!("{:.2}s", latency_ms as f64 / 1000.0)
}

/// Merge descriptors and outcomes into the shape the display consumes
pub fn project(round: &ProbeRound) -> ProjectedEndpoints {
    if !round.class.is_live_checked() {
        return ProjectedEndpoints::Listing(
            round
                .outcomes
                .iter()
                .map(|o| EndpointListing {
                    url: o.endpoint.address.clone(),
                    provider: o.endpoint.provider.clone(),
                })
                .collect(),
        );
    }

    ProjectedEndpoints::Live(
        round
            .outcomes
            .iter()
            .map(|o| {
                let error_message = o.error.as_ref().map(|e| e.to_string());
                let status = if error_message.is_some() {
                    StatusTag::Error
                } else {
                    StatusTag::Online
                };
                EndpointStatus {
                    url: o.endpoint.address.clone(),
                    provider: o.endpoint.provider.clone(),
                    block_height: o.height.clone(),
                    latency_ms: o.latency_ms,
                    error_message,
                    status,
                }
            })
            .collect(),
    )
}
