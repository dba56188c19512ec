//! Route dispatch: binds HTTP method + path to protocol operations.
//!
//! Reads are public; mutations declare an [`AuthUser`] argument and are
//! therefore token-required (see `middleware::auth`).
//!
//! [`AuthUser`]: crate::middleware::AuthUser

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, items, pantries};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Accounts and token acquisition
        .merge(auth_routes())
        // Resources
        .merge(item_routes())
        .merge(pantry_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/whoami", get(auth::whoami))
}

fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(items::list).post(items::create))
        .route(
            "/items/:id",
            get(items::show).patch(items::update).delete(items::destroy),
        )
}

fn pantry_routes() -> Router<AppState> {
    Router::new()
        .route("/pantries", get(pantries::list).post(pantries::create))
        .route(
            "/pantries/:id",
            get(pantries::show).patch(pantries::update).delete(pantries::destroy),
        )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Inventory API (Rust)",
        "version": version,
        "description": "Inventory tracking backend - items and pantries with token auth",
        "endpoints": {
            "auth": "/auth/register, /auth/login (public), /auth/whoami (token)",
            "items": "/items, /items/:id (reads public; mutations require a token)",
            "pantries": "/pantries, /pantries/:id (reads public; mutations require a token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}
