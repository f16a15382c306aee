// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Core types for endpoint health probing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::registry::EndpointDescriptor;

/// Category of endpoint, each with its own liveness semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolClass {
    Rest,
    Rpc,
    Grpc,
    JsonRpc,
}

impl ProtocolClass {
    pub const ALL: [ProtocolClass; 4] = [
        ProtocolClass::Rest,
        ProtocolClass::Rpc,
        ProtocolClass::Grpc,
        ProtocolClass::JsonRpc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolClass::Rest => "rest",
            ProtocolClass::Rpc => "rpc",
            ProtocolClass::Grpc => "grpc",
            ProtocolClass::JsonRpc => "json-rpc",
        }
    }

    /// Only REST and RPC get a liveness call
    pub fn is_live_checked(&self) -> bool {
        matches!(self, ProtocolClass::Rest | ProtocolClass::Rpc)
    }

    /// Whether endpoints carrying an authorized-user marker are dropped
    /// before a round. The catalog has no such marker for JSON-RPC.
    pub fn filters_restricted(&self) -> bool {
        !matches!(self, ProtocolClass::JsonRpc)
    }
}

impl fmt::Display for ProtocolClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rest" => Ok(ProtocolClass::Rest),
            "rpc" => Ok(ProtocolClass::Rpc),
            "grpc" => Ok(ProtocolClass::Grpc),
            "json-rpc" | "jsonrpc" | "json_rpc" => Ok(ProtocolClass::JsonRpc),
            other => Err(format!(
                "Unknown protocol class '{}', expected rest, rpc, grpc or json-rpc",
                other
            )),
        }
    }
}

/// Discriminant of a probe failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeErrorKind {
    Unreachable,
    Timeout,
    ParseFailure,
}

/// Failure of a single probe. Local to that probe, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, non-2xx status
    #[error("{0}")]
    Unreachable(String),

    /// Exceeded the per-probe budget
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// 2xx response whose body could not be parsed
    #[error("Invalid response body: {0}")]
    ParseFailure(String),
}

impl ProbeError {
    pub fn kind(&self) -> ProbeErrorKind {
        match self {
            ProbeError::Unreachable(_) => ProbeErrorKind::Unreachable,
            ProbeError::Timeout { .. } => ProbeErrorKind::Timeout,
            ProbeError::ParseFailure(_) => ProbeErrorKind::ParseFailure,
        }
    }
}

/// Result of probing one endpoint.
///
/// A live-checked probe is either a success (`latency_ms` set, `error` unset)
/// or a failure (`error` set). Listing-only classes produce neither.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeOutcome {
    pub endpoint: EndpointDescriptor,
    pub latency_ms: Option<u64>,
    pub height: Option<String>,
    pub error: Option<ProbeError>,
}

impl ProbeOutcome {
    pub fn success(endpoint: EndpointDescriptor, latency_ms: u64, height: Option<String>) -> Self {
        Self {
            endpoint,
            latency_ms: Some(latency_ms),
            height,
            error: None,
        }
    }

    pub fn failure(endpoint: EndpointDescriptor, error: ProbeError) -> Self {
        Self {
            endpoint,
            latency_ms: None,
            height: None,
            error: Some(error),
        }
    }

    /// Configuration-only entry, no liveness signal
    pub fn listed(endpoint: EndpointDescriptor) -> Self {
        Self {
            endpoint,
            latency_ms: None,
            height: None,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.latency_ms.is_some()
    }

    pub fn error_kind(&self) -> Option<ProbeErrorKind> {
        self.error.as_ref().map(ProbeError::kind)
    }
}

/// One complete probing pass over the endpoints of a protocol class
#[derive(Debug, Clone)]
pub struct ProbeRound {
    pub class: ProtocolClass,
    pub started_at: DateTime<Utc>,
    /// One per filtered input, in input order
    pub outcomes: Vec<ProbeOutcome>,
    /// Endpoint count before restricted filtering
    pub input_count: usize,
}

impl ProbeRound {
    pub fn restricted_count(&self) -> usize {
        self.input_count - self.outcomes.len()
    }

    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn error_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.error.is_some()).count()
    }
}
