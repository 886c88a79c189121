//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`availability`] - slot listing and specific-time checks
//! - [`reservations`] - booking, lifecycle, reminders, walk-ins
//! - [`statistics`] - day overview, table timeline, range stats
//! - [`tables`] - dining table management
//! - [`service_periods`] - weekly service window management
//! - [`closed_days`] - closure rules
//! - [`setup`] - default venue layout installation
//!
//! Every venue-scoped route lives under `/api/venues/{venue}/...`.

pub mod availability;
pub mod closed_days;
pub mod health;
pub mod reservations;
pub mod service_periods;
pub mod setup;
pub mod statistics;
pub mod tables;

// Re-export the handler result type
pub use crate::utils::AppResult;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// HTTP access log middleware
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Build the full application router
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(availability::router())
        .merge(reservations::router())
        .merge(statistics::router())
        .merge(tables::router())
        .merge(service_periods::router())
        .merge(closed_days::router())
        .merge(setup::router())
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(log_request))
}
