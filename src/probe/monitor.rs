// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Endpoint health for the currently selected chain, all protocol classes

use futures::future::join_all;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use super::projection::{project, ProjectedEndpoints};
use super::scheduler::{ProbeScheduler, SchedulerConfig, SchedulerError};
use super::strategy::{strategy_for, ProbeStrategy};
use super::types::ProtocolClass;
use crate::registry::ChainApis;

/// Latest projection per protocol class
#[derive(Debug, Clone, Default, Serialize)]
pub struct HealthView {
    pub chain_name: Option<String>,
    pub rest: Option<ProjectedEndpoints>,
    pub rpc: Option<ProjectedEndpoints>,
    pub grpc: Option<ProjectedEndpoints>,
    pub json_rpc: Option<ProjectedEndpoints>,
}

impl HealthView {
    fn slot(&mut self, class: ProtocolClass) -> &mut Option<ProjectedEndpoints> {
        match class {
            ProtocolClass::Rest => &mut self.rest,
            ProtocolClass::Rpc => &mut self.rpc,
            ProtocolClass::Grpc => &mut self.grpc,
            ProtocolClass::JsonRpc => &mut self.json_rpc,
        }
    }

    pub fn get(&self, class: ProtocolClass) -> Option<&ProjectedEndpoints> {
        match class {
            ProtocolClass::Rest => self.rest.as_ref(),
            ProtocolClass::Rpc => self.rpc.as_ref(),
            ProtocolClass::Grpc => self.grpc.as_ref(),
            ProtocolClass::JsonRpc => self.json_rpc.as_ref(),
        }
    }
}

/// One independent scheduler per protocol class, driven by chain selection.
///
/// Selection changes hold the `selected` lock across the whole fan-out, so
/// every scheduler follows the most recent selection.
pub struct EndpointMonitor {
    schedulers: Vec<ProbeScheduler>,
    selected: Mutex<Option<String>>,
}

impl EndpointMonitor {
    pub fn new(http_client: &Client) -> Self {
        Self::with_config(http_client, SchedulerConfig::default())
    }

    pub fn with_config(http_client: &Client, config: SchedulerConfig) -> Self {
        let strategies = ProtocolClass::ALL
            .iter()
            .map(|class| strategy_for(*class, http_client))
            .collect();
        Self::from_strategies(strategies, config)
    }

    pub fn from_strategies(strategies: Vec<Arc<dyn ProbeStrategy>>, config: SchedulerConfig) -> Self {
        Self {
            schedulers: strategies
                .into_iter()
                .map(|strategy| ProbeScheduler::with_config(strategy, config.clone()))
                .collect(),
            selected: Mutex::new(None),
        }
    }

    /// Make a chain current. All schedulers are updated concurrently.
    pub async fn select(&self, chain_name: &str, apis: &ChainApis) -> Result<(), SchedulerError> {
        let mut selected = self.selected.lock().await;
        info!(chain = %chain_name, "Selecting chain for endpoint monitoring");

        let updates = self
            .schedulers
            .iter()
            .map(|scheduler| scheduler.update(apis.endpoints(scheduler.class()).to_vec()));
        let result: Result<(), SchedulerError> = join_all(updates).await.into_iter().collect();

        if result.is_ok() {
            *selected = Some(chain_name.to_string());
        }
        result
    }

    /// Forget the selection; every scheduler goes idle
    pub async fn deselect(&self) -> Result<(), SchedulerError> {
        let mut selected = self.selected.lock().await;
        let updates = self
            .schedulers
            .iter()
            .map(|scheduler| scheduler.update(Vec::new()));
        let result: Result<(), SchedulerError> = join_all(updates).await.into_iter().collect();

        if let Some(chain) = selected.take() {
            info!(chain = %chain, "Endpoint monitoring idle");
        }
        result
    }

    pub async fn selected_chain(&self) -> Option<String> {
        self.selected.lock().await.clone()
    }

    pub fn scheduler(&self, class: ProtocolClass) -> Option<&ProbeScheduler> {
        self.schedulers.iter().find(|s| s.class() == class)
    }

    /// Latest projection for every class
    pub async fn view(&self) -> HealthView {
        // Held so a concurrent selection cannot split the view
        let selected = self.selected.lock().await;
        let mut view = HealthView {
            chain_name: selected.clone(),
            ..HealthView::default()
        };
        for scheduler in &self.schedulers {
            if let Some(round) = scheduler.snapshot().await {
                *view.slot(scheduler.class()) = Some(project(&round));
            }
        }
        view
    }

    pub async fn shutdown(&self) {
        let _selected = self.selected.lock().await;
        join_all(self.schedulers.iter().map(|s| s.stop())).await;
        info!("Endpoint monitoring stopped");
    }
}
