//! Closed Day API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::db::models::{ClosedDay, ClosedDayCreate};
use crate::db::repository::ClosedDayRepository;
use crate::utils::time::parse_date;
use crate::utils::{AppError, AppResult};

/// GET /api/venues/:venue/closed-days - every closure rule
pub async fn list(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
) -> AppResult<Json<Vec<ClosedDay>>> {
    let repo = ClosedDayRepository::new(state.db.clone());
    let days = repo.find_all(&venue).await?;
    Ok(Json(days))
}

/// POST /api/venues/:venue/closed-days - record a closure
pub async fn create(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<ClosedDayCreate>,
) -> AppResult<(StatusCode, Json<ClosedDay>)> {
    if let Some(weekday) = payload.recurring_weekday
        && weekday > 6
    {
        return Err(AppError::validation("recurring_weekday must be 0-6"));
    }
    let date = payload.date.as_deref().map(parse_date).transpose()?;

    let repo = ClosedDayRepository::new(state.db.clone());
    let day = repo
        .create(ClosedDay {
            id: None,
            venue,
            date,
            recurring_weekday: payload.recurring_weekday,
            reason: payload.reason.unwrap_or_else(|| "Closed".to_string()),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(day)))
}
