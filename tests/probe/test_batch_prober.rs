// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use chain_explorer::probe::{
    build_probe_client, project, BatchProber, HttpLivenessStrategy, ListingStrategy,
    ProbeError, ProbeErrorKind, ProbeStrategy, ProjectedEndpoints, StatusTag,
};
use chain_explorer::registry::EndpointDescriptor;
use std::time::{Duration, Instant};

use crate::common::{closed_address, spawn_stub, Reply, REST_PATH};

fn rest() -> HttpLivenessStrategy {
    HttpLivenessStrategy::rest(build_probe_client("explorer-tests").unwrap())
}

#[tokio::test]
async fn test_mixed_round_end_to_end() {
    let fast = spawn_stub(REST_PATH, Reply::rest_height("100", 50)).await;
    let hang = spawn_stub(REST_PATH, Reply::rest_height("1", 60_000)).await;
    let broken = spawn_stub(REST_PATH, Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;

    let endpoints = vec![
        EndpointDescriptor::new(&fast.url, "fast", false),
        EndpointDescriptor::new(&hang.url, "hang", false),
        EndpointDescriptor::new(&broken.url, "broken", false),
    ];

    let strategy = rest();
    let started = Instant::now();
    let round = BatchProber::new()
        .run_round(&endpoints, &strategy, strategy.default_timeout())
        .await;
    let elapsed = started.elapsed();

    // Bounded by the per-request budget, not the slowest endpoint
    assert!(elapsed >= Duration::from_millis(5000));
    assert!(elapsed < Duration::from_secs(15));

    assert_eq!(round.outcomes.len(), 3);
    assert_eq!(round.input_count, 3);

    let first = &round.outcomes[0];
    assert_eq!(first.endpoint.address, fast.url);
    assert_eq!(first.height.as_deref(), Some("100"));
    assert!(first.latency_ms.unwrap() >= 50);

    assert_eq!(
        round.outcomes[1].error,
        Some(ProbeError::Timeout { timeout_ms: 5000 })
    );
    assert_eq!(round.outcomes[2].error_kind(), Some(ProbeErrorKind::Unreachable));

    match project(&round) {
        ProjectedEndpoints::Live(rows) => {
            assert_eq!(rows[0].status, StatusTag::Online);
            assert_eq!(rows[0].block_height.as_deref(), Some("100"));
            assert_eq!(rows[1].status, StatusTag::Error);
            assert_eq!(rows[2].status, StatusTag::Error);
        }
        other => panic!("expected live rows, got {:?}", other),
    }
}

#[tokio::test]
async fn test_outcomes_follow_input_order() {
    let slow = spawn_stub(REST_PATH, Reply::rest_height("1", 300)).await;
    let quick = spawn_stub(REST_PATH, Reply::rest_height("2", 0)).await;
    let dead = closed_address().await;

    let endpoints = vec![
        EndpointDescriptor::new(&slow.url, "slow", false),
        EndpointDescriptor::new(&dead, "dead", false),
        EndpointDescriptor::new(&quick.url, "quick", false),
    ];

    let round = BatchProber::new()
        .run_round(&endpoints, &rest(), Duration::from_secs(2))
        .await;

    let addresses: Vec<&str> = round
        .outcomes
        .iter()
        .map(|o| o.endpoint.address.as_str())
        .collect();
    assert_eq!(addresses, vec![slow.url.as_str(), dead.as_str(), quick.url.as_str()]);
    assert_eq!(round.success_count(), 2);
    assert_eq!(round.error_count(), 1);
}

#[tokio::test]
async fn test_short_timeout_override() {
    let hang = spawn_stub(REST_PATH, Reply::rest_height("1", 60_000)).await;
    let endpoints = vec![EndpointDescriptor::new(&hang.url, "hang", false)];

    let round = BatchProber::new()
        .run_round(&endpoints, &rest(), Duration::from_millis(200))
        .await;

    assert_eq!(
        round.outcomes[0].error,
        Some(ProbeError::Timeout { timeout_ms: 200 })
    );
}

#[tokio::test]
async fn test_restricted_endpoint_is_never_contacted() {
    let open = spawn_stub(REST_PATH, Reply::rest_height("10", 0)).await;
    let private = spawn_stub(REST_PATH, Reply::rest_height("10", 0)).await;

    let endpoints = vec![
        EndpointDescriptor::new(&open.url, "open", false),
        EndpointDescriptor::new(&private.url, "private", true),
    ];

    let round = BatchProber::new()
        .run_round(&endpoints, &rest(), Duration::from_secs(2))
        .await;

    assert_eq!(round.outcomes.len(), 1);
    assert_eq!(round.restricted_count(), 1);
    assert_eq!(open.hits(), 1);
    assert_eq!(private.hits(), 0);
}

#[tokio::test]
async fn test_rounds_are_independent() {
    let stub = spawn_stub(REST_PATH, Reply::rest_height("55", 0)).await;
    let endpoints = vec![EndpointDescriptor::new(&stub.url, "stub", false)];
    let prober = BatchProber::new();
    let strategy = rest();

    let first = prober.run_round(&endpoints, &strategy, Duration::from_secs(2)).await;
    let second = prober.run_round(&endpoints, &strategy, Duration::from_secs(2)).await;

    assert_eq!(first.outcomes[0].height, second.outcomes[0].height);
    assert_eq!(first.outcomes[0].endpoint, second.outcomes[0].endpoint);
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_json_rpc_listing_keeps_restricted() {
    let endpoints = vec![
        EndpointDescriptor::new("https://evm.example.com", "public", false),
        EndpointDescriptor::new("https://evm-private.example.com", "private", true),
    ];

    let round = BatchProber::new()
        .run_round(&endpoints, &ListingStrategy::json_rpc(), Duration::ZERO)
        .await;

    assert_eq!(round.outcomes.len(), 2);
    assert!(round.outcomes.iter().all(|o| o.error.is_none() && o.latency_ms.is_none()));
}
