// SPDX-FileCopyrightText: 2026 Postbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `postbox serve` command implementation.
//!
//! Wires the SQLite form repository and message archive, the SMTP sender,
//! and the execute services into the gateway, then serves the HTTP API
//! until shutdown.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use postbox_config::PostboxConfig;
use postbox_core::{FormRepo, PostboxError};
use postbox_email::SmtpSender;
use postbox_gateway::{GatewayState, HealthState, ServerConfig, start_server};
use postbox_service::{FormService, MessageService};
use postbox_storage::SqliteStorage;

/// Runs the `postbox serve` command.
pub async fn run_serve(config: PostboxConfig) -> Result<(), PostboxError> {
    init_tracing(&config.service.log_level);

    info!(service = %config.service.name, "starting postbox serve");

    let storage = Arc::new(SqliteStorage::open(&config.storage).await?);
    let sender = Arc::new(SmtpSender::new(&config.smtp)?);

    let repo: Arc<dyn FormRepo> = storage.clone();
    let messages = MessageService::new(repo.clone(), sender);
    let forms = FormService::new(repo);

    let state = GatewayState {
        messages: Arc::new(Mutex::new(messages)),
        forms: Arc::new(forms),
        archive: storage.clone(),
        problem_base_url: config.server.problem_base_url.clone(),
        health: HealthState {
            start_time: std::time::Instant::now(),
        },
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let result = start_server(&server_config, state).await;

    // Flush the WAL on the way out, whatever took the server down.
    if let Err(e) = storage.close().await {
        tracing::warn!(error = %e, "storage close failed");
    }

    result
}

/// Initialize the tracing subscriber from the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("postbox={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
