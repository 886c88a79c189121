//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::DiningTableRepository;
use crate::utils::{AppError, AppResult};

/// GET /api/venues/:venue/tables - active tables, zone/name ordered
pub async fn list(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_active(&venue).await?;
    Ok(Json(tables))
}

/// POST /api/venues/:venue/tables - create a table
pub async fn create(
    State(state): State<ServerState>,
    Path(venue): Path<String>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<(StatusCode, Json<DiningTable>)> {
    payload.validate()?;
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(&venue, payload).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

/// PUT /api/venues/:venue/tables/:id - edit a table
pub async fn update(
    State(state): State<ServerState>,
    Path((venue, id)): Path<(String, String)>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|t| t.venue == venue)
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    let table = repo.update(&id, payload).await?;
    Ok(Json(table))
}

/// DELETE /api/venues/:venue/tables/:id - deactivate (history stays)
pub async fn delete(
    State(state): State<ServerState>,
    Path((venue, id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    let repo = DiningTableRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .filter(|t| t.venue == venue)
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", id)))?;
    let result = repo.deactivate(&id).await?;
    Ok(Json(result))
}
