//! Availability API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::reservations::AvailabilityReply;
use crate::reservations::types::SlotAvailability;
use crate::utils::AppResult;
use crate::utils::time::{parse_date, parse_hhmm};

#[derive(Deserialize)]
pub struct SlotsQuery {
    /// YYYY-MM-DD, defaults to today
    date: Option<String>,
    /// Defaults to 2
    party_size: Option<i32>,
}

#[derive(Serialize)]
pub struct SlotsReply {
    date: NaiveDate,
    party_size: i32,
    slots: Vec<SlotAvailability>,
}

/// GET /api/venues/:venue/availability?date&party_size - slot listing
pub async fn slots(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<SlotsQuery>,
) -> AppResult<Json<SlotsReply>> {
    let date = match query.date.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let party_size = query.party_size.unwrap_or(2);

    let manager = state.manager_for(&venue);
    let slots = manager.available_slots(date, party_size).await?;
    Ok(Json(SlotsReply {
        date,
        party_size,
        slots,
    }))
}

#[derive(Deserialize)]
pub struct CheckPayload {
    pub date: String,
    pub time: String,
    pub party_size: i32,
}

/// POST /api/venues/:venue/availability/check - specific-time check
pub async fn check(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<CheckPayload>,
) -> AppResult<Json<AvailabilityReply>> {
    let date = parse_date(&payload.date)?;
    let time = parse_hhmm(&payload.time)?;

    let manager = state.manager_for(&venue);
    let reply = manager
        .check_availability(date, time, payload.party_size)
        .await?;
    Ok(Json(reply))
}
