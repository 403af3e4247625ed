use crate::infra::AppState;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use macro_menu::error::AppError;
use serde_json::json;
use std::io::ErrorKind;
use std::time::SystemTime;

const INDEX_PAGE: &str = include_str!("../assets/index.html");

pub(crate) fn menu_routes() -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/data/items", get(items_endpoint))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn index_page() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Streams the web artifact verbatim from disk.
pub(crate) async fn items_endpoint(
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let path = state.artifact_path.as_path();
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(AppError::ArtifactMissing(path.to_path_buf()))
        }
        Err(err) => return Err(err.into()),
    };

    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())],
        bytes,
    )
        .into_response();

    let modified = tokio::fs::metadata(path)
        .await
        .ok()
        .and_then(|metadata| metadata.modified().ok());
    if let Some(value) = modified.and_then(|time| HeaderValue::from_str(&http_date(time)).ok()) {
        response.headers_mut().insert(header::LAST_MODIFIED, value);
    }

    Ok(response)
}

fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format("%a, %d %b %Y %H:%M:%S GMT")
        .to_string()
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
