use std::sync::Arc;

use aggregator::UserAggregator;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use normalizer::NormalizedUser;
use prometheus::Encoder;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::error::{ApiError, ApiResult};

#[derive(Clone)]
pub struct ApiState {
    pub aggregator: Arc<UserAggregator>,
    pub metrics_path: &'static str,
}

pub fn build_router(state: Arc<ApiState>) -> Router {
    let metrics_path: &'static str = state.metrics_path;
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/github/:username", get(get_user))
        .route(metrics_path, get(metrics))
        .fallback(fallback)
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

#[instrument(skip(state))]
async fn get_user(
    State(state): State<Arc<ApiState>>,
    Path(username): Path<String>,
) -> ApiResult<Json<NormalizedUser>> {
    if username.trim().is_empty() {
        warn!("request received with empty username");
        return Err(ApiError::bad_request("Username must not be empty"));
    }

    info!(username, "incoming request for github user");
    let user = state.aggregator.get_user(&username).await?;
    Ok(Json(user))
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::route_not_found(format!("no matching endpoint for {}", uri.path()))
}

async fn metrics() -> ApiResult<impl IntoResponse> {
    let encoder = prometheus::TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    let content_type = encoder.format_type().to_string();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        buffer,
    ))
}
