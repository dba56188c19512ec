// handlers/items.rs - /items route handlers

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
use crate::resources::item::{ItemDraft, ItemPatch};
use crate::services::resource_service::to_public_list;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemEnvelope {
    item: ItemDraft,
}

#[derive(Debug, Deserialize)]
pub struct ItemPatchEnvelope {
    item: ItemPatch,
}

/// GET /items - List all items
pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let docs = state.items().list().await?;
    Ok(Json(json!({ "items": to_public_list(&docs) })))
}

/// GET /items/:id - Show a single item
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let doc = state.items().show(parse_id(&id)?).await?;
    Ok(Json(json!({ "item": doc.to_public() })))
}

/// POST /items - Create an item owned by the current user
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<ItemEnvelope>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let doc = state.items().create(auth.user_id, body.item).await?;
    Ok((StatusCode::CREATED, Json(json!({ "item": doc.to_public() }))))
}

/// PATCH /items/:id - Partially update an owned item
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ItemPatchEnvelope>,
) -> Result<StatusCode, ApiError> {
    state.items().update(Some(auth.user_id), parse_id(&id)?, body.item).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /items/:id - Remove an owned item
pub async fn destroy(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.items().delete(Some(auth.user_id), parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
