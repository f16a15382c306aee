// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod probe;
pub mod registry;
pub mod version;

// Re-export main types
pub use config::ExplorerConfig;
pub use probe::{
    BatchProber, EndpointMonitor, HealthView, ProbeError, ProbeOutcome, ProbeRound,
    ProbeScheduler, ProbeStrategy, ProtocolClass,
};
pub use registry::{Catalog, Chain, ChainApis, EndpointDescriptor, RegistryClient};
