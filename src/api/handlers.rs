// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request handlers for the explorer API

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::probe::HealthView;
use crate::registry::{Asset, Chain, ChainFilter, IbcChannel};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub chains: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChainQuery {
    pub search: Option<String>,
    pub network_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain_name: String,
    pub chain_id: String,
    pub pretty_name: String,
    pub network_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&Chain> for ChainSummary {
    fn from(chain: &Chain) -> Self {
        Self {
            chain_name: chain.chain_name.clone(),
            chain_id: chain.chain_id.clone(),
            pretty_name: chain.display_name().to_string(),
            network_type: chain.network_type.clone(),
            status: chain.status.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainListResponse {
    pub chains: Vec<ChainSummary>,
    pub network_types: Vec<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectResponse {
    pub selected: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::version::VERSION_NUMBER.to_string(),
        chains: state.catalog.len(),
    })
}

pub async fn list_chains_handler(
    State(state): State<AppState>,
    Query(query): Query<ChainQuery>,
) -> Json<ChainListResponse> {
    let filter = ChainFilter::new(query.search, query.network_type);
    let chains: Vec<ChainSummary> = filter
        .apply(state.catalog.chains())
        .into_iter()
        .map(ChainSummary::from)
        .collect();

    Json(ChainListResponse {
        total: chains.len(),
        chains,
        network_types: state.catalog.network_types(),
    })
}

pub async fn chain_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Chain>, ApiError> {
    state
        .catalog
        .get(&name)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::chain_not_found(&name))
}

pub async fn assets_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Asset>>, ApiError> {
    let chain = state
        .catalog
        .get(&name)
        .ok_or_else(|| ApiError::chain_not_found(&name))?;
    Ok(Json(state.registry.fetch_asset_list(chain).await))
}

pub async fn ibc_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<IbcChannel>>, ApiError> {
    let chain = state
        .catalog
        .get(&name)
        .ok_or_else(|| ApiError::chain_not_found(&name))?;
    Ok(Json(chain.ibc_channels().to_vec()))
}

pub async fn select_chain_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<SelectResponse>, ApiError> {
    let chain = state
        .catalog
        .get(&name)
        .ok_or_else(|| ApiError::chain_not_found(&name))?;

    state.monitor.select(&chain.chain_name, &chain.apis).await?;
    info!(chain = %chain.chain_name, "Chain selected via API");

    Ok(Json(SelectResponse {
        selected: chain.chain_name.clone(),
    }))
}

pub async fn endpoints_handler(State(state): State<AppState>) -> Json<HealthView> {
    Json(state.monitor.view().await)
}

/// Stop monitoring the selected chain
pub async fn deselect_handler(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.monitor.deselect().await?;
    info!("Endpoint monitoring cleared via API");
    Ok(StatusCode::NO_CONTENT)
}
