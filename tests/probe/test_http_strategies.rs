// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use chain_explorer::probe::{
    build_probe_client, HttpLivenessStrategy, ProbeErrorKind, ProbeStrategy, ProtocolClass,
};
use chain_explorer::registry::EndpointDescriptor;

use crate::common::{closed_address, spawn_stub, Reply, REST_PATH, RPC_PATH};

fn rest() -> HttpLivenessStrategy {
    HttpLivenessStrategy::rest(build_probe_client("explorer-tests").unwrap())
}

fn rpc() -> HttpLivenessStrategy {
    HttpLivenessStrategy::rpc(build_probe_client("explorer-tests").unwrap())
}

#[tokio::test]
async fn test_rest_probe_reports_height_and_latency() {
    let stub = spawn_stub(REST_PATH, Reply::rest_height("4242", 20)).await;
    let endpoint = EndpointDescriptor::new(&stub.url, "stub", false);

    let outcome = rest().probe(&endpoint).await;

    assert!(outcome.is_success(), "unexpected error: {:?}", outcome.error);
    assert_eq!(outcome.height.as_deref(), Some("4242"));
    assert!(outcome.latency_ms.unwrap() >= 20);
    assert_eq!(outcome.endpoint, endpoint);
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_rpc_probe_reads_sync_info() {
    let stub = spawn_stub(RPC_PATH, Reply::rpc_height("987654", 0)).await;
    let endpoint = EndpointDescriptor::new(&stub.url, "stub", false);

    let strategy = rpc();
    assert_eq!(strategy.class(), ProtocolClass::Rpc);

    let outcome = strategy.probe(&endpoint).await;
    assert_eq!(outcome.height.as_deref(), Some("987654"));
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let stub = spawn_stub(REST_PATH, Reply::rest_height("7", 0)).await;
    let endpoint = EndpointDescriptor::new(format!("{}/", stub.url), "stub", false);

    let outcome = rest().probe(&endpoint).await;

    assert!(outcome.is_success());
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_server_error_is_unreachable() {
    let stub = spawn_stub(REST_PATH, Reply::Status(StatusCode::INTERNAL_SERVER_ERROR)).await;
    let endpoint = EndpointDescriptor::new(&stub.url, "stub", false);

    let outcome = rest().probe(&endpoint).await;

    assert_eq!(outcome.error_kind(), Some(ProbeErrorKind::Unreachable));
    assert!(outcome.height.is_none());
    assert!(outcome.latency_ms.is_none());
    assert!(outcome.error.unwrap().to_string().contains("500"));
}

#[tokio::test]
async fn test_garbage_body_is_parse_failure() {
    let stub = spawn_stub(REST_PATH, Reply::Text("<html>maintenance</html>")).await;
    let endpoint = EndpointDescriptor::new(&stub.url, "stub", false);

    let outcome = rest().probe(&endpoint).await;

    assert_eq!(outcome.error_kind(), Some(ProbeErrorKind::ParseFailure));
}

#[tokio::test]
async fn test_refused_connection_is_unreachable() {
    let endpoint = EndpointDescriptor::new(closed_address().await, "gone", false);

    let outcome = rpc().probe(&endpoint).await;

    assert_eq!(outcome.error_kind(), Some(ProbeErrorKind::Unreachable));
}

#[tokio::test]
async fn test_wrong_path_is_unreachable() {
    // Stub only answers the RPC path, so the REST probe gets a 404
    let stub = spawn_stub(RPC_PATH, Reply::rpc_height("1", 0)).await;
    let endpoint = EndpointDescriptor::new(&stub.url, "stub", false);

    let outcome = rest().probe(&endpoint).await;

    assert_eq!(outcome.error_kind(), Some(ProbeErrorKind::Unreachable));
    assert_eq!(stub.hits(), 0);
}
