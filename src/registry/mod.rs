// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Chain registry: catalog records, HTTP client, and chain list filtering
//!
//! The registry is an external read-only JSON document listing chains and
//! their declared endpoints. It is fetched once; asset lists are fetched per
//! chain on demand.

pub mod catalog;
pub mod client;
pub mod types;

pub use catalog::{Catalog, ChainFilter};
pub use client::RegistryClient;
pub use types::{
    Asset, AssetList, AssetTrace, Chain, ChainApis, ChainMetadata, EndpointDescriptor, FeeToken,
    Fees, IbcChannel, LogoUris, Minitia, RegistryError, TraceCounterparty,
};
