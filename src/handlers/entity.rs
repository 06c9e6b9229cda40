//! Table CRUD handlers: list, read, create, update, delete.
//!
//! Each handler resolves the table descriptor from the path segment, checks
//! out one pooled connection, runs a single statement through CrudService,
//! and maps the outcome to the wire shapes. The connection returns to the
//! pool when the handler exits, on success and on error alike.

use crate::db;
use crate::error::ApiError;
use crate::registry::TableDescriptor;
use crate::response;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

fn resolve_table(state: &AppState, segment: &str) -> Result<&'static TableDescriptor, ApiError> {
    state
        .registry
        .descriptor(segment)
        .ok_or_else(|| ApiError::NotFound("Not found".into()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, ApiError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(ApiError::BadRequest("body must be a JSON object".into())),
    }
}

pub async fn list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let table = resolve_table(&state, &segment)?;
    let mut conn = db::acquire(&state.pool).await?;
    let rows = CrudService::list(&mut conn, table).await?;
    Ok(Json(rows))
}

pub async fn read(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, i64)>,
) -> Result<Json<Value>, ApiError> {
    let table = resolve_table(&state, &segment)?;
    let mut conn = db::acquire(&state.pool).await?;
    let row = CrudService::read(&mut conn, table, id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Not found".into()))?;
    Ok(Json(row))
}

pub async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let table = resolve_table(&state, &segment)?;
    tracing::debug!(table = table.name, body = ?body, "create request");
    let body = body_to_map(body)?;
    let mut conn = db::acquire(&state.pool).await?;
    let id = CrudService::create(&mut conn, table, &body).await?;
    Ok(response::created(format!("{} record created", table.name), id))
}

pub async fn update(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, i64)>,
    Json(body): Json<Value>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let table = resolve_table(&state, &segment)?;
    tracing::debug!(table = table.name, id, body = ?body, "update request");
    let body = body_to_map(body)?;
    let mut conn = db::acquire(&state.pool).await?;
    match CrudService::update(&mut conn, table, id, &body).await? {
        None => Ok(response::message("No valid fields to update".into())),
        Some(0) => Err(ApiError::NotFound(format!(
            "No {} record found with ID {} to update",
            table.name, id
        ))),
        Some(_) => Ok(response::message(format!("{} record updated", table.name))),
    }
}

pub async fn delete(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, i64)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let table = resolve_table(&state, &segment)?;
    tracing::debug!(table = table.name, id, "delete request");
    let mut conn = db::acquire(&state.pool).await?;
    match CrudService::delete(&mut conn, table, id).await? {
        0 => Err(ApiError::NotFound(format!(
            "No {} record found with ID {}",
            table.name, id
        ))),
        _ => Ok(response::message(format!("{} record deleted", table.name))),
    }
}
