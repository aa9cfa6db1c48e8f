use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::StreamExt;
use serde::Deserialize;

use crate::errors::ForgeError;
use crate::forge_config::{DefaultsConfig, check_max_iterations, check_threshold};
use crate::orchestrator::Forge;

// ── Shared application state ──────────────────────────────────────────

pub struct AppState {
    pub forge: Arc<Forge>,
    pub defaults: DefaultsConfig,
}

pub type SharedState = Arc<AppState>;

// ── Request payload types ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IndependentRequest {
    pub track: String,
    #[serde(default)]
    pub requirements: String,
}

#[derive(Deserialize)]
pub struct DepthRequest {
    pub track: String,
    pub problem_statement: String,
    pub threshold: Option<u8>,
    pub max_iterations: Option<u32>,
}

// ── Error handling ────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(serde_json::json!({"error": message}))).into_response()
    }
}

impl From<ForgeError> for ApiError {
    fn from(err: ForgeError) -> Self {
        match err {
            ForgeError::AlreadyRunning => ApiError::Conflict(err.to_string()),
            ForgeError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            ForgeError::Proposer(_) | ForgeError::Critic(_) => {
                tracing::error!(error = %err, "run failed");
                ApiError::Internal(err.to_string())
            }
        }
    }
}

// ── Router ────────────────────────────────────────────────────────────

pub fn api_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/api/status", get(get_status))
        .route("/api/independent", post(run_independent))
        .route("/api/depth", post(run_depth))
        .route("/api/depth/stop", post(stop_depth))
}

// ── Handlers ──────────────────────────────────────────────────────────

async fn root() -> impl IntoResponse {
    Json(serde_json::json!({"message": "Idea Forge API", "status": "running"}))
}

async fn health_check() -> &'static str {
    "ok"
}

async fn get_status(State(state): State<SharedState>) -> impl IntoResponse {
    Json(state.forge.status())
}

async fn run_independent(
    State(state): State<SharedState>,
    Json(req): Json<IndependentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.track.trim().is_empty() {
        return Err(ApiError::BadRequest("track must not be empty".into()));
    }
    let response = state
        .forge
        .run_independent(&req.track, &req.requirements)
        .await?;
    Ok(Json(response))
}

async fn run_depth(
    State(state): State<SharedState>,
    Json(req): Json<DepthRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let threshold = req.threshold.unwrap_or(state.defaults.threshold);
    let max_iterations = req.max_iterations.unwrap_or(state.defaults.max_iterations);
    check_threshold(threshold).map_err(ApiError::BadRequest)?;
    check_max_iterations(max_iterations).map_err(ApiError::BadRequest)?;
    if req.track.trim().is_empty() {
        return Err(ApiError::BadRequest("track must not be empty".into()));
    }

    let events = state
        .forge
        .run_depth(&req.track, &req.problem_statement, threshold, max_iterations)?;

    // Serializing a ProgressEvent cannot fail; an error event is sent instead
    // of dropping the frame if it ever does.
    let frames = events.map(|event| {
        Ok::<_, Infallible>(Event::default().json_data(&event).unwrap_or_else(|e| {
            Event::default().data(serde_json::json!({"error": e.to_string()}).to_string())
        }))
    });

    Ok(Sse::new(frames).keep_alive(KeepAlive::default()))
}

async fn stop_depth(State(state): State<SharedState>) -> impl IntoResponse {
    let flagged = state.forge.interrupt();
    tracing::info!(flagged, "interrupt requested over HTTP");
    Json(serde_json::json!({"message": "Interrupt signal sent"}))
}
