// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTTP API over the chain catalog and live endpoint health

pub mod errors;
pub mod handlers;
pub mod http_server;

pub use errors::{ApiError, ErrorResponse};
pub use handlers::{ChainListResponse, ChainQuery, ChainSummary, HealthResponse, SelectResponse};
pub use http_server::{router, start_server, AppState};
