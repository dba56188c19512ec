// handlers/auth.rs - account registration and token acquisition

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::user_service::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsEnvelope {
    credentials: Credentials,
}

/// POST /auth/register - Create a new account
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<CredentialsEnvelope>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let user = state
        .users()
        .register(&body.credentials.email, &body.credentials.password)
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "user": user }))))
}

/// POST /auth/login - Verify credentials and receive a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<CredentialsEnvelope>,
) -> Result<Json<Session>, ApiError> {
    let session = state
        .users()
        .login(&body.credentials.email, &body.credentials.password, &state.config.security)
        .await?;
    Ok(Json(session))
}

/// GET /auth/whoami - The account behind the presented token
pub async fn whoami(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let user = state.users().find(auth.user_id).await?;
    Ok(Json(json!({ "user": user })))
}
