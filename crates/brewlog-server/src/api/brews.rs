// ABOUTME: Brew CRUD API handlers: list, create, get, update, and delete.
// ABOUTME: Validates input before touching storage and maps absence to 404 "Brew not found".

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use brewlog_core::{Brew, BrewId, BrewInput, PageQuery};
use serde::Serialize;

use crate::app_state::SharedState;
use crate::error::ApiError;

const ID_PARAM: &str = "brew_id";

/// Response body after deleting a brew.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

fn brew_id(path: Result<Path<BrewId>, PathRejection>) -> Result<BrewId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|e| ApiError::from_path_rejection(ID_PARAM, e))
}

fn brew_input(body: Result<Json<BrewInput>, JsonRejection>) -> Result<BrewInput, ApiError> {
    body.map(|Json(input)| input)
        .map_err(ApiError::from_json_rejection)
}

/// GET /brews/?skip=&limit= - Newest-first page of brews.
pub async fn list_brews(
    State(state): State<SharedState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Vec<Brew>>, ApiError> {
    let Query(query) = query.map_err(ApiError::from_query_rejection)?;
    let page = query.validate()?;

    let brews = state.with_service(move |svc| svc.list(page)).await?;
    tracing::debug!(skip = page.skip, limit = page.limit, count = brews.len(), "listed brews");
    Ok(Json(brews))
}

/// POST /brews/ - Create a brew.
pub async fn create_brew(
    State(state): State<SharedState>,
    body: Result<Json<BrewInput>, JsonRejection>,
) -> Result<Json<Brew>, ApiError> {
    let fields = brew_input(body)?.validate()?;

    let brew = state.with_service(move |svc| svc.create(&fields)).await?;
    tracing::info!(id = brew.id, bean_type = %brew.fields.bean_type, "brew created");
    Ok(Json(brew))
}

/// GET /brews/{brew_id} - Fetch one brew.
pub async fn get_brew(
    State(state): State<SharedState>,
    path: Result<Path<BrewId>, PathRejection>,
) -> Result<Json<Brew>, ApiError> {
    let id = brew_id(path)?;

    match state.with_service(move |svc| svc.get(id)).await? {
        Some(brew) => Ok(Json(brew)),
        None => {
            tracing::debug!(id, "brew not found");
            Err(ApiError::NotFound)
        }
    }
}

/// PUT /brews/{brew_id} - Replace every field of a brew. Input is validated
/// before existence is checked.
pub async fn update_brew(
    State(state): State<SharedState>,
    path: Result<Path<BrewId>, PathRejection>,
    body: Result<Json<BrewInput>, JsonRejection>,
) -> Result<Json<Brew>, ApiError> {
    let id = brew_id(path)?;
    let fields = brew_input(body)?.validate()?;

    match state.with_service(move |svc| svc.update(id, &fields)).await? {
        Some(brew) => {
            tracing::info!(id, "brew updated");
            Ok(Json(brew))
        }
        None => {
            tracing::debug!(id, "update target not found");
            Err(ApiError::NotFound)
        }
    }
}

/// DELETE /brews/{brew_id} - Permanently remove a brew.
pub async fn delete_brew(
    State(state): State<SharedState>,
    path: Result<Path<BrewId>, PathRejection>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = brew_id(path)?;

    if state.with_service(move |svc| svc.delete(id)).await? {
        tracing::info!(id, "brew deleted");
        Ok(Json(DeleteResponse {
            message: "Brew deleted successfully",
        }))
    } else {
        tracing::debug!(id, "delete target not found");
        Err(ApiError::NotFound)
    }
}
