//! Statistics API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{Duration, Local};
use serde::Deserialize;

use crate::core::ServerState;
use crate::reservations::stats::{DayOverview, StatsReport, TableTimeline};
use crate::utils::AppResult;
use crate::utils::time::parse_date;

#[derive(Deserialize)]
pub struct DateQuery {
    /// YYYY-MM-DD, defaults to today
    date: Option<String>,
}

fn resolve_date(raw: Option<&str>) -> AppResult<chrono::NaiveDate> {
    match raw {
        Some(raw) => parse_date(raw),
        None => Ok(Local::now().date_naive()),
    }
}

/// GET /api/venues/:venue/day-overview?date - dashboard day view
pub async fn day_overview(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DayOverview>> {
    let date = resolve_date(query.date.as_deref())?;
    let manager = state.manager_for(&venue);
    Ok(Json(manager.day_overview(date).await?))
}

/// GET /api/venues/:venue/table-timeline?date - who sits where and when
pub async fn table_timeline(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<TableTimeline>>> {
    let date = resolve_date(query.date.as_deref())?;
    let manager = state.manager_for(&venue);
    Ok(Json(manager.table_timeline(date).await?))
}

#[derive(Deserialize)]
pub struct RangeQuery {
    from: Option<String>,
    to: Option<String>,
}

/// GET /api/venues/:venue/stats?from&to - range statistics
///
/// Defaults to the last 30 days.
pub async fn stats(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Query(query): Query<RangeQuery>,
) -> AppResult<Json<StatsReport>> {
    let today = Local::now().date_naive();
    let to = match query.to.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today,
    };
    let from = match query.from.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => today - Duration::days(30),
    };

    let manager = state.manager_for(&venue);
    Ok(Json(manager.stats(from, to).await?))
}
