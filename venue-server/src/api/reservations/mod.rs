//! Reservation API module
//!
//! Booking, listing, guest edits, lifecycle transitions and reminder
//! plumbing. The walk-in route lives here too since it is just a booking
//! at the current minute.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .nest("/api/venues/{venue}/reservations", routes())
        .route("/api/venues/{venue}/walkin", post(handler::walkin))
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/reminders", get(handler::reminders))
        .route("/{id}", put(handler::update))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/reminder-sent", post(handler::reminder_sent))
}
