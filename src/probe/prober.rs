// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One concurrent probing round over a set of endpoints

use chrono::Utc;
use futures::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

use super::strategy::ProbeStrategy;
use super::types::{ProbeError, ProbeOutcome, ProbeRound};
use crate::registry::EndpointDescriptor;

/// Runs probe rounds
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchProber;

impl BatchProber {
    pub fn new() -> Self {
        Self
    }

    /// Probe every eligible endpoint concurrently.
    ///
    /// Restricted endpoints are dropped up front for classes that filter
    /// them. Every remaining endpoint yields exactly one outcome, in input
    /// order, whatever order the probes finish in. A probe exceeding
    /// `per_request_timeout` yields `ProbeError::Timeout`. The round itself
    /// cannot fail.
    pub async fn run_round(
        &self,
        endpoints: &[EndpointDescriptor],
        strategy: &dyn ProbeStrategy,
        per_request_timeout: Duration,
    ) -> ProbeRound {
        let class = strategy.class();
        let started_at = Utc::now();

        let eligible: Vec<&EndpointDescriptor> = endpoints
            .iter()
            .filter(|e| !(class.filters_restricted() && e.restricted))
            .collect();

        let live = strategy.is_live();
        let timeout_ms = per_request_timeout.as_millis() as u64;

        let probes = eligible.iter().map(|endpoint| async move {
            if !live {
                return strategy.probe(endpoint).await;
            }
            match timeout(per_request_timeout, strategy.probe(endpoint)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    debug!(class = %class, endpoint = %endpoint.address, timeout_ms, "Probe timed out");
                    ProbeOutcome::failure((*endpoint).clone(), ProbeError::Timeout { timeout_ms })
                }
            }
        });

        // join_all yields results in the order the futures were supplied
        let outcomes = join_all(probes).await;

        let round = ProbeRound {
            class,
            started_at,
            outcomes,
            input_count: endpoints.len(),
        };

        debug!(
            class = %class,
            probed = round.outcomes.len(),
            restricted = round.restricted_count(),
            succeeded = round.success_count(),
            "Probe round complete"
        );

        round
    }
}
