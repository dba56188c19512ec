use std::sync::Arc;

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use inventory_api_rust::config::AppConfig;
use inventory_api_rust::routes;
use inventory_api_rust::state::AppState;
use inventory_api_rust::store::MemoryStore;

/// Build the full application over a fresh in-memory store. Suites drive it
/// in-process with `oneshot`, so no port binding or external database is
/// involved; state persists across requests through the shared store.
pub fn app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), Arc::new(AppConfig::test()));
    routes::app(state)
}

pub async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let body =
        if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };

    Ok((status, body))
}

/// Register an account and log it in, returning `(user_id, token)`.
pub async fn register_and_login(app: &Router, email: &str) -> Result<(String, String)> {
    let credentials = json!({ "credentials": { "email": email, "password": "12345" } });

    let (status, body) =
        request(app, Method::POST, "/auth/register", None, Some(credentials.clone())).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register failed: {} {}", status, body);
    let user_id = body["user"]["id"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("register response missing user id: {}", body))?
        .to_string();

    let (status, body) = request(app, Method::POST, "/auth/login", None, Some(credentials)).await?;
    anyhow::ensure!(status == StatusCode::OK, "login failed: {} {}", status, body);
    let token = body["token"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("login response missing token: {}", body))?
        .to_string();

    Ok((user_id, token))
}
