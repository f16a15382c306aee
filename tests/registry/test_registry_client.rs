// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::http::StatusCode;
use chain_explorer::config::ExplorerConfig;
use chain_explorer::probe::ProtocolClass;
use chain_explorer::registry::{Catalog, Chain, RegistryClient, RegistryError};
use serde_json::json;

use crate::common::{closed_address, spawn_document, spawn_stub, Reply};

fn client_for(url: String) -> RegistryClient {
    let config = ExplorerConfig {
        registry_url: url,
        ..ExplorerConfig::default()
    };
    RegistryClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_chains() {
    let stub = spawn_document(
        "/chains.json",
        json!([
            {
                "chain_name": "minimove",
                "chain_id": "minimove-2",
                "pretty_name": "Minimove",
                "network_type": "testnet",
                "bech32_prefix": "init",
                "apis": {
                    "rpc": [{ "address": "https://rpc.minimove.example", "provider": "Initia Labs" }],
                    "rest": [
                        { "address": "https://rest.minimove.example", "provider": "Initia Labs" },
                        { "address": "https://rest-private.minimove.example", "provider": "Initia Labs", "authorizedUser": "relayer" }
                    ]
                },
                "unknown_field": { "ignored": true }
            }
        ]),
    )
    .await;

    let client = client_for(format!("{}/chains.json", stub.url));
    let chains = client.fetch_chains().await.unwrap();

    assert_eq!(chains.len(), 1);
    let chain = &chains[0];
    assert_eq!(chain.chain_name, "minimove");
    assert_eq!(chain.apis.endpoints(ProtocolClass::Rpc).len(), 1);
    let rest = chain.apis.endpoints(ProtocolClass::Rest);
    assert!(!rest[0].restricted);
    assert!(rest[1].restricted);
    assert!(chain.apis.endpoints(ProtocolClass::JsonRpc).is_empty());

    let catalog = Catalog::new(chains);
    assert!(catalog.get("minimove-2").is_some());
}

#[tokio::test]
async fn test_missing_registry_is_status_error() {
    let stub = spawn_stub("/other.json", Reply::Status(StatusCode::OK)).await;
    let client = client_for(format!("{}/chains.json", stub.url));

    match client.fetch_chains().await {
        Err(RegistryError::Status { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/chains.json"));
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_registry_is_decode_error() {
    let stub = spawn_stub("/chains.json", Reply::Text("not json")).await;
    let client = client_for(format!("{}/chains.json", stub.url));

    assert!(matches!(
        client.fetch_chains().await,
        Err(RegistryError::Decode(_))
    ));
}

#[tokio::test]
async fn test_asset_list_failure_yields_empty() {
    let dead = closed_address().await;
    let client = client_for(format!("{}/chains.json", dead));

    let chain: Chain = serde_json::from_value(json!({
        "chain_name": "broken",
        "chain_id": "broken-1",
        "metadata": { "assetlist": format!("{}/assetlist.json", dead) }
    }))
    .unwrap();

    assert!(client.fetch_asset_list(&chain).await.is_empty());
}

#[tokio::test]
async fn test_fetch_asset_list() {
    let stub = spawn_document(
        "/assetlist.json",
        json!({
            "chain_name": "minimove",
            "assets": [
                { "denom": "umin", "base": "umin", "symbol": "MIN", "decimals": 6 },
                { "denom": "ibc/ABC", "base": "ibc/ABC", "symbol": "USDC", "decimals": 6,
                  "traces": [{ "type": "ibc", "counterparty": { "chain_name": "noble", "base_denom": "uusdc", "channel_id": "channel-3" } }] }
            ]
        }),
    )
    .await;
    let client = client_for(format!("{}/chains.json", stub.url));

    let chain: Chain = serde_json::from_value(json!({
        "chain_name": "minimove",
        "chain_id": "minimove-2",
        "metadata": { "assetlist": format!("{}/assetlist.json", stub.url) }
    }))
    .unwrap();

    let assets = client.fetch_asset_list(&chain).await;
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[1].symbol, "USDC");
    assert_eq!(assets[1].traces.as_ref().unwrap()[0].counterparty.chain_name, "noble");
}
