//! Reservation API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Reservation, ReservationStatus, ReservationUpdate};
use crate::db::repository::DiningTableRepository;
use crate::reservations::{BookingOutcome, BookingRequest};
use crate::utils::time::{fmt_hhmm, parse_date, parse_hhmm};
use crate::utils::{AppError, AppResult};

/// Booking payload; dates and times arrive as strings
#[derive(Debug, Deserialize, Validate)]
pub struct ReservationCreate {
    pub date: String,
    pub time: String,
    #[validate(range(min = 1, max = 50))]
    pub party_size: i32,
    #[validate(length(min = 1, max = 100))]
    pub guest_name: String,
    pub guest_phone: Option<String>,
    #[validate(email)]
    pub guest_email: Option<String>,
    pub language: Option<String>,
    pub zone_preference: Option<String>,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub source: Option<String>,
    pub guest_id: Option<String>,
}

/// POST /api/venues/:venue/reservations - the booking protocol
///
/// 201 with the confirmation, or 409 carrying the denial reason and
/// alternative slots.
pub async fn create(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<(StatusCode, Json<BookingOutcome>)> {
    payload.validate()?;
    let date = parse_date(&payload.date)?;
    let time = parse_hhmm(&payload.time)?;

    let manager = state.manager_for(&venue);
    let outcome = manager
        .create_reservation(BookingRequest {
            date,
            time,
            party_size: payload.party_size,
            guest_name: payload.guest_name,
            guest_phone: payload.guest_phone,
            guest_email: payload.guest_email,
            language: payload.language.unwrap_or_else(|| "en".to_string()),
            zone_preference: payload.zone_preference,
            notes: payload.notes,
            special_requests: payload.special_requests,
            source: payload.source.unwrap_or_else(|| "dashboard".to_string()),
            guest_id: payload.guest_id,
        })
        .await?;

    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    };
    Ok((status, Json(outcome)))
}

#[derive(Deserialize)]
pub struct ListQuery {
    date: Option<String>,
    status: Option<String>,
    limit: Option<usize>,
}

/// Listing row with the table name and zone joined in
#[derive(Serialize)]
pub struct ReservationView {
    pub id: String,
    pub date: NaiveDate,
    pub time: String,
    pub end_time: Option<String>,
    pub party_size: i32,
    pub guest_name: String,
    pub guest_phone: Option<String>,
    pub language: String,
    pub table: Option<String>,
    pub zone: Option<String>,
    pub status: ReservationStatus,
    pub source: String,
    pub notes: Option<String>,
    pub special_requests: Option<String>,
    pub created_at: DateTime<Utc>,
}

fn view(row: Reservation, tables: &HashMap<String, (String, String)>) -> ReservationView {
    let joined = row
        .table
        .as_ref()
        .and_then(|id| tables.get(&id.to_string()));
    ReservationView {
        id: row.id.as_ref().map(|r| r.to_string()).unwrap_or_default(),
        date: row.date,
        time: fmt_hhmm(row.time),
        end_time: row.end_time.map(fmt_hhmm),
        party_size: row.party_size,
        guest_name: row.guest_name,
        guest_phone: row.guest_phone,
        language: row.language,
        table: joined.map(|(name, _)| name.clone()),
        zone: joined.map(|(_, zone)| zone.clone()),
        status: row.status,
        source: row.source,
        notes: row.notes,
        special_requests: row.special_requests,
        created_at: row.created_at,
    }
}

async fn table_lookup(
    state: &ServerState,
    venue: &str,
) -> AppResult<HashMap<String, (String, String)>> {
    let tables = DiningTableRepository::new(state.db.clone())
        .find_all(venue)
        .await?;
    Ok(tables
        .into_iter()
        .filter_map(|t| {
            t.id.as_ref()
                .map(|id| (id.to_string(), (t.name.clone(), t.zone.clone())))
        })
        .collect())
}

/// GET /api/venues/:venue/reservations?date&status&limit - filtered listing
pub async fn list(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let date = query.date.as_deref().map(parse_date).transpose()?;
    let status = query
        .status
        .as_deref()
        .map(|s| {
            s.parse::<ReservationStatus>()
                .map_err(AppError::validation)
        })
        .transpose()?;
    let limit = query.limit.unwrap_or(100);

    let manager = state.manager_for(&venue);
    let rows = manager.list_reservations(date, status, limit).await?;
    let tables = table_lookup(&state, &venue).await?;
    Ok(Json(rows.into_iter().map(|r| view(r, &tables)).collect()))
}

/// PUT /api/venues/:venue/reservations/:id - guest-facing edits only
///
/// Date, time, table and party size are engine-owned; rebooking means
/// cancelling and booking again.
pub async fn update(
    State(state): State<ServerState>,
    Path((venue, id)): Path<(String, String)>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<ReservationView>> {
    let manager = state.manager_for(&venue);
    let updated = manager
        .update_reservation(&id, payload)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;
    let tables = table_lookup(&state, &venue).await?;
    Ok(Json(view(updated, &tables)))
}

#[derive(Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

#[derive(Serialize)]
pub struct StatusReply {
    pub status: ReservationStatus,
}

/// PUT /api/venues/:venue/reservations/:id/status - drive a transition
///
/// 400 for a status outside the four reachable targets, 409 when the
/// state machine refuses the edge.
pub async fn update_status(
    State(state): State<ServerState>,
    Path((venue, id)): Path<(String, String)>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<StatusReply>> {
    let next: ReservationStatus = payload
        .status
        .parse()
        .map_err(AppError::validation)?;
    if next == ReservationStatus::Confirmed {
        return Err(AppError::validation(
            "confirmed is the initial status, not a transition target",
        ));
    }

    let manager = state.manager_for(&venue);
    if manager.transition(&id, next).await? {
        Ok(Json(StatusReply { status: next }))
    } else {
        Err(AppError::conflict(format!(
            "Reservation {} cannot move to {}",
            id,
            next.as_str()
        )))
    }
}

#[derive(Deserialize)]
pub struct RemindersQuery {
    hours_before: Option<i64>,
}

/// GET /api/venues/:venue/reservations/reminders?hours_before - rows whose
/// guests should be reminded now; marking is a separate call
pub async fn reminders(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<RemindersQuery>,
) -> AppResult<Json<Vec<ReservationView>>> {
    let hours = query
        .hours_before
        .unwrap_or(state.config.reminder_hours_before);

    let manager = state.manager_for(&venue);
    let rows = manager.get_reservations_needing_reminder(hours).await?;
    let tables = table_lookup(&state, &venue).await?;
    Ok(Json(rows.into_iter().map(|r| view(r, &tables)).collect()))
}

/// POST /api/venues/:venue/reservations/:id/reminder-sent - stamp delivery
pub async fn reminder_sent(
    State(state): State<ServerState>,
    Path((venue, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let manager = state.manager_for(&venue);
    if manager.mark_reminder_sent(&id).await? {
        Ok(Json(true))
    } else {
        Err(AppError::not_found(format!(
            "Reservation {} not found",
            id
        )))
    }
}

#[derive(Deserialize, Validate)]
pub struct WalkinPayload {
    #[validate(range(min = 1, max = 50))]
    pub party_size: i32,
    pub guest_name: Option<String>,
}

/// POST /api/venues/:venue/walkin - book the current minute, seat at once
pub async fn walkin(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<WalkinPayload>,
) -> AppResult<(StatusCode, Json<BookingOutcome>)> {
    payload.validate()?;
    let manager = state.manager_for(&venue);
    let outcome = manager
        .create_walkin(payload.party_size, payload.guest_name)
        .await?;
    let status = if outcome.success {
        StatusCode::CREATED
    } else {
        StatusCode::CONFLICT
    };
    Ok((status, Json(outcome)))
}
