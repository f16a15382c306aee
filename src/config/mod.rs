// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod explorer;

pub use explorer::{ExplorerConfig, DEFAULT_REGISTRY_URL};
