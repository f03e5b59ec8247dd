//! Server assembly: routes, middleware layers, and the listener.

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use gym_core::config::CorsConfig;
use gym_core::{Config, Result, WorkoutService, WorkoutStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::routes::routes;

/// Build the full application router around `service`
pub fn build_router(service: WorkoutService, config: &Config) -> Router {
    let mut router = routes()
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer(&config.cors) {
        router = router.layer(cors);
    }

    router
}

/// CORS layer for the configured origins, or `None` when disabled
pub fn build_cors_layer(cors: &CorsConfig) -> Option<CorsLayer> {
    if cors.allowed_origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    if cors.allowed_origins.iter().any(|origin| origin.trim() == "*") {
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter_map(|s| match HeaderValue::from_str(s) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %s, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(layer.allow_origin(origins))
}

/// Run the API until Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let store = Arc::new(WorkoutStore::new());
    let service = WorkoutService::new(store, config.request_deadline());
    let app = build_router(service, &config);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Gym API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gym API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Unable to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
