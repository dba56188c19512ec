// handlers/pantries.rs - /pantries route handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::parse_id;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::resources::pantry::{PantryDraft, PantryPatch};
use crate::services::resource_service::to_public_list;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PantryEnvelope {
    pantry: PantryDraft,
}

#[derive(Debug, Deserialize)]
pub struct PantryPatchEnvelope {
    pantry: PantryPatch,
}

/// GET /pantries - List all pantries
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let docs = state.pantries().list().await?;
    Ok(Json(json!({ "pantries": to_public_list(&docs) })))
}

/// GET /pantries/:id - Show a single pantry
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let doc = state.pantries().show(parse_id(&id)?).await?;
    Ok(Json(json!({ "pantry": doc.to_public() })))
}

/// POST /pantries - Create a pantry owned by the current user
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<PantryEnvelope>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let doc = state.pantries().create(auth.user_id, body.pantry).await?;
    Ok((StatusCode::CREATED, Json(json!({ "pantry": doc.to_public() }))))
}

/// PATCH /pantries/:id - Replace the entry list of an owned pantry
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<PantryPatchEnvelope>,
) -> Result<StatusCode, ApiError> {
    state.pantries().update(Some(auth.user_id), parse_id(&id)?, body.pantry).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /pantries/:id - Remove an owned pantry
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.pantries().delete(Some(auth.user_id), parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
