//! Venue setup API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::repository::{
    ClosedDayRepository, DiningTableRepository, ServicePeriodRepository,
};
use crate::reservations::setup::{SetupSummary, install_defaults};
use crate::utils::{AppError, AppResult};

#[derive(Deserialize, Default)]
pub struct SetupPayload {
    /// 0 = Monday .. 6 = Sunday; defaults to Monday
    pub rest_day: Option<u8>,
}

/// POST /api/venues/:venue/setup - install the default layout
pub async fn setup(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    payload: Option<Json<SetupPayload>>,
) -> AppResult<(StatusCode, Json<SetupSummary>)> {
    let payload = payload.map(|Json(p)| p).unwrap_or_default();
    if let Some(rest_day) = payload.rest_day
        && rest_day > 6
    {
        return Err(AppError::validation("rest_day must be 0-6"));
    }

    let tables = DiningTableRepository::new(state.db.clone());
    let periods = ServicePeriodRepository::new(state.db.clone());
    let closed_days = ClosedDayRepository::new(state.db.clone());

    let summary = install_defaults(&tables, &periods, &closed_days, &venue, payload.rest_day).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}
