// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the contact API.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use postbox_core::{MessageStore, PostboxError};
use postbox_service::{FormService, MessageService};

use crate::handlers;

/// Health state for the unauthenticated health endpoint.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Message submission service. The mutex scopes the service's
    /// single-slot form memo across handler invocations.
    pub messages: Arc<Mutex<MessageService>>,
    /// Form definition CRUD service.
    pub forms: Arc<FormService>,
    /// Archive for accepted submissions.
    pub archive: Arc<dyn MessageStore>,
    /// Base URL for RFC 7807 problem types.
    pub problem_base_url: Option<String>,
    /// Health state for the health endpoint.
    pub health: HealthState,
}

/// Gateway server configuration (mirrors ServerConfig from postbox-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the API router.
///
/// Routes:
/// - `GET /health`
/// - `POST /api/messages` (create); GET/PUT/DELETE are 501 stubs
/// - `GET|POST /api/forms`, `GET|PUT|DELETE /api/forms/{id}`
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/api/messages",
            post(handlers::create_message).get(handlers::list_messages),
        )
        .route(
            "/api/messages/{id}",
            get(handlers::get_message)
                .put(handlers::update_message)
                .delete(handlers::delete_message),
        )
        .route(
            "/api/forms",
            get(handlers::list_forms).post(handlers::create_form),
        )
        .route(
            "/api/forms/{id}",
            get(handlers::get_form)
                .put(handlers::update_form)
                .delete(handlers::delete_form),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server and serve until shutdown.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), PostboxError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| PostboxError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("API server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PostboxError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use postbox_test_utils::{MemoryFormRepo, MemoryMessageStore, RecordingSender};

    #[test]
    fn gateway_state_is_clone() {
        let repo = Arc::new(MemoryFormRepo::new());
        let sender = Arc::new(RecordingSender::new());
        let state = GatewayState {
            messages: Arc::new(Mutex::new(MessageService::new(repo.clone(), sender))),
            forms: Arc::new(FormService::new(repo)),
            archive: Arc::new(MemoryMessageStore::new()),
            problem_base_url: None,
            health: HealthState {
                start_time: std::time::Instant::now(),
            },
        };
        let _cloned = state.clone();
    }

    #[test]
    fn server_config_debug() {
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
        };
        let debug = format!("{config:?}");
        assert!(debug.contains("127.0.0.1"));
    }
}
