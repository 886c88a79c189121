//! Statistics API module

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/venues/{venue}/day-overview", get(handler::day_overview))
        .route("/api/venues/{venue}/table-timeline", get(handler::table_timeline))
        .route("/api/venues/{venue}/stats", get(handler::stats))
}
