//! Server Implementation
//!
//! HTTP server startup plus the background no-show sweep.

use std::time::Duration;

use crate::core::{Config, Result, ServerError, ServerState};
use crate::db::DbService;

/// HTTP Server
pub struct Server {
    config: Config,
    state: Option<ServerState>,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: None,
        }
    }

    /// Create server with existing state (shared with tests or tooling)
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self {
            config,
            state: Some(state),
        }
    }

    pub async fn run(&self) -> Result<()> {
        let state = match &self.state {
            Some(s) => s.clone(),
            None => {
                let db_dir = self.config.database_dir();
                std::fs::create_dir_all(&db_dir)?;
                let db = DbService::new(&db_dir)
                    .await
                    .map_err(|e| ServerError::Database(e.to_string()))?;
                ServerState::new(self.config.clone(), db.db)
            }
        };

        spawn_noshow_sweep(state.clone());

        let app = crate::api::build_app(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("Venue server starting on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutting down...");
}

/// Periodically sweep the default venue's overdue confirmed reservations
/// into noshow. Failures are logged and the loop keeps running.
fn spawn_noshow_sweep(state: ServerState) {
    let interval_secs = state.config.noshow_sweep_interval_secs.max(1);
    let grace = state.config.noshow_grace_minutes;
    let venue = state.config.default_venue.clone();

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let manager = state.manager_for(&venue);
            match manager.auto_mark_noshows(grace).await {
                Ok(marked) if !marked.is_empty() => {
                    tracing::info!(venue = %venue, count = marked.len(), "no-show sweep");
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!(venue = %venue, error = %e, "no-show sweep failed");
                }
            }
        }
    });
}
