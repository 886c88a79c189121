//! Service Period API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::NaiveTime;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{ServicePeriod, ServicePeriodCreate};
use crate::db::repository::ServicePeriodRepository;
use crate::utils::time::parse_hhmm;
use crate::utils::{AppError, AppResult};

/// GET /api/venues/:venue/service-periods - active periods, week ordered
pub async fn list(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
) -> AppResult<Json<Vec<ServicePeriod>>> {
    let repo = ServicePeriodRepository::new(state.db.clone());
    let periods = repo.find_active(&venue).await?;
    Ok(Json(periods))
}

/// POST /api/venues/:venue/service-periods - create a period
///
/// Times arrive as HH:MM strings and are parsed here; the engine only ever
/// sees chrono types.
pub async fn create(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<ServicePeriodCreate>,
) -> AppResult<(StatusCode, Json<ServicePeriod>)> {
    payload.validate()?;

    let start_time = parse_hhmm(&payload.start_time)?;
    let end_time = parse_hhmm(&payload.end_time)?;
    let last_seating = payload
        .last_seating
        .as_deref()
        .map(parse_hhmm)
        .transpose()?;
    validate_window(start_time, end_time, last_seating)?;

    let repo = ServicePeriodRepository::new(state.db.clone());
    let period = repo
        .create(ServicePeriod {
            id: None,
            venue,
            name: payload.name,
            day_of_week: payload.day_of_week,
            start_time,
            end_time,
            last_seating,
            slot_duration_min: payload.slot_duration_min.unwrap_or(90),
            slot_interval_min: payload.slot_interval_min.unwrap_or(30),
            max_covers: payload.max_covers,
            active: true,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(period)))
}

/// The stored ordering is `start_time <= last_seating <= end_time`
/// (last_seating defaulting to end_time). A period violating it would be
/// found by the covering lookup while generating an empty slot grid, so it
/// is rejected at creation.
fn validate_window(
    start_time: NaiveTime,
    end_time: NaiveTime,
    last_seating: Option<NaiveTime>,
) -> Result<(), AppError> {
    if start_time > end_time {
        return Err(AppError::validation("start_time must not be after end_time"));
    }
    if let Some(last) = last_seating {
        if last > end_time {
            return Err(AppError::validation(
                "last_seating must not be after end_time",
            ));
        }
        if start_time > last {
            return Err(AppError::validation(
                "last_seating must not be before start_time",
            ));
        }
    }
    Ok(())
}

/// DELETE /api/venues/:venue/service-periods/:id - deactivate
pub async fn delete(
    State(state): State<ServerState>,
    Path((_venue, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = ServicePeriodRepository::new(state.db.clone());
    let result = repo.deactivate(&id).await?;
    Ok(Json(result))
}
