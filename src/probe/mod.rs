// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Endpoint health probing
//!
//! For the selected chain, each protocol class gets its own scheduler that
//! probes the declared endpoints concurrently, every 30 seconds:
//! - REST: `GET /cosmos/base/tendermint/v1beta1/blocks/latest`
//! - RPC: `GET /status`
//! - gRPC and JSON-RPC: listed, not checked
//!
//! A slow or failing endpoint never blocks or aborts its round, and rounds
//! overtaken by a chain switch or teardown are never published.

pub mod monitor;
pub mod projection;
pub mod prober;
pub mod scheduler;
pub mod strategy;
pub mod types;

pub use monitor::{EndpointMonitor, HealthView};
pub use projection::{
    format_latency, project, EndpointListing, EndpointStatus, ProjectedEndpoints, StatusTag,
};
pub use prober::BatchProber;
pub use scheduler::{
    ProbeScheduler, SchedulerConfig, SchedulerError, SchedulerState, REFRESH_INTERVAL,
};
pub use strategy::{
    build_probe_client, strategy_for, HttpLivenessStrategy, ListingStrategy, ProbeStrategy,
    REST_PROBE_TIMEOUT, RPC_PROBE_TIMEOUT,
};
pub use types::{ProbeError, ProbeErrorKind, ProbeOutcome, ProbeRound, ProtocolClass};
