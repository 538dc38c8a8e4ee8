//! HTTP surface: the greeting and health endpoints consumed by the client
//! shell, plus CRUD for property records. The wasm client bundle is served
//! from /static.
use crate::errors::HomesteadError;
use crate::settings::Settings;
use crate::storage;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderName, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use miette::IntoDiagnostic;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub db: DatabaseConnection,
}

// Security headers middleware
async fn security_headers(request: Request<Body>, next: Next) -> impl IntoResponse {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    // X-Frame-Options: Prevent clickjacking
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );

    // X-Content-Type-Options: Prevent MIME sniffing
    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );

    // Content-Security-Policy: Restrict resource loading (allows the wasm shell)
    headers.insert(
        HeaderName::from_static("content-security-policy"),
        HeaderValue::from_static("default-src 'self'; script-src 'self' 'wasm-unsafe-eval'; style-src 'self' 'unsafe-inline'; img-src 'self' data:; connect-src 'self' http://localhost:8000"),
    );

    // Referrer-Policy: Control referrer information
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

pub fn router(state: AppState) -> Router {
    // The client shell may be served from a separate origin (dev server), so
    // the API answers cross-origin requests.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/hello-world/", get(hello_world))
        .route("/api/health-check/", get(health_check))
        .route(
            "/api/properties/",
            get(list_properties).post(create_property),
        )
        .route(
            "/api/properties/{id}/",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
        // Serve static files (WASM, JS, etc.)
        .nest_service("/static", ServeDir::new("static"))
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .with_state(state)
}

pub async fn serve(settings: Settings, db: DatabaseConnection) -> miette::Result<()> {
    let state = AppState {
        settings: Arc::new(settings),
        db,
    };

    let addr: SocketAddr = format!(
        "{}:{}",
        state.settings.server.host, state.settings.server.port
    )
    .parse()
    .map_err(|e| miette::miette!("bad listen addr: {e}"))?;

    let app = router(state);

    tracing::info!(%addr, "API listening");
    let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}

async fn hello_world() -> impl IntoResponse {
    Json(json!({
        "message": format!("Hello, world: {}", Utc::now().to_rfc3339()),
    }))
}

async fn health_check() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

async fn create_property(
    State(state): State<AppState>,
    Json(input): Json<storage::NewProperty>,
) -> impl IntoResponse {
    match storage::create_property(&state.db, input).await {
        Ok(property) => (StatusCode::CREATED, Json(property)).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn list_properties(State(state): State<AppState>) -> impl IntoResponse {
    match storage::list_properties(&state.db).await {
        Ok(properties) => (StatusCode::OK, Json(properties)).into_response(),
        Err(e) => storage_error(e),
    }
}

async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match storage::get_property(&state.db, &id).await {
        Ok(Some(property)) => (StatusCode::OK, Json(property)).into_response(),
        Ok(None) => not_found(),
        Err(e) => storage_error(e),
    }
}

async fn update_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(changes): Json<storage::PropertyChanges>,
) -> impl IntoResponse {
    match storage::update_property(&state.db, &id, changes).await {
        Ok(Some(property)) => (StatusCode::OK, Json(property)).into_response(),
        Ok(None) => not_found(),
        Err(e) => storage_error(e),
    }
}

async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match storage::delete_property(&state.db, &id).await {
        Ok(true) => (StatusCode::NO_CONTENT, ()).into_response(),
        Ok(false) => not_found(),
        Err(e) => storage_error(e),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({"error": "not_found"}))).into_response()
}

fn storage_error(e: HomesteadError) -> Response {
    match e {
        HomesteadError::BadRequest(msg) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "invalid_request", "error_description": msg})),
        )
            .into_response(),
        e => {
            tracing::warn!(error = %e, "storage operation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "internal_error", "error_description": e.to_string()})),
            )
                .into_response()
        }
    }
}
