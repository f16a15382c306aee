use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    assets_handler, chain_handler, deselect_handler, endpoints_handler, health_handler,
    ibc_handler, list_chains_handler, select_chain_handler,
};
use crate::probe::EndpointMonitor;
use crate::registry::{Catalog, RegistryClient};

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub registry: Arc<RegistryClient>,
    pub monitor: Arc<EndpointMonitor>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/chains", get(list_chains_handler))
        .route("/v1/chains/:name", get(chain_handler))
        .route("/v1/chains/:name/assets", get(assets_handler))
        .route("/v1/chains/:name/ibc", get(ibc_handler))
        .route("/v1/chains/:name/select", post(select_chain_handler))
        .route("/v1/endpoints", get(endpoints_handler).delete(deselect_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves
pub async fn start_server<F>(state: AppState, listener: TcpListener, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
