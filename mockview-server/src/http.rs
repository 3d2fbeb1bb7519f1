//! Mockview HTTP REST API
//!
//! Axum-based HTTP server exposing mock interviews and user answers.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a pure
//! inner function taking the store explicitly. The inner functions are directly
//! testable without axum dispatch machinery.
//!
//! Endpoints:
//! - GET  /                               — liveness text
//! - GET  /health                         — health check with storage status
//! - GET  /version                        — server version info
//! - POST /api/interviews                 — create a mock interview
//! - GET  /api/interviews/:mock_id        — fetch one interview, blob parsed
//! - GET  /api/interviewList/:user_email  — interviews created by a user
//! - POST /api/interviews/userAnswer      — store an answer
//! - GET  /api/feedback/:mock_id          — answers recorded for an interview

use std::sync::Arc;

use anyhow::Result;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use mockview_core::{InterviewStore, MockResponse, MockviewConfig, NewMockInterview, NewUserAnswer};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const LIVENESS_TEXT: &str = "Server is running";

const INTERVIEW_NOT_FOUND: &str = "Interview not found";
const CREATE_INTERVIEW_FAILED: &str = "Failed to create interview";
const FETCH_INTERVIEW_FAILED: &str = "Failed to fetch interview";
const POST_ANSWER_FAILED: &str = "Failed to post user answer";

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn InterviewStore>,
    pub config: MockviewConfig,
}

/// Build the Axum router with all endpoints. Any origin may call the API.
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/api/interviews", post(create_interview_handler))
        .route("/api/interviews/userAnswer", post(create_answer_handler))
        .route("/api/interviews/:mock_id", get(get_interview_handler))
        .route("/api/interviewList/:user_email", get(list_interviews_handler))
        .route("/api/feedback/:mock_id", get(feedback_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    store: Arc<dyn InterviewStore>,
    config: MockviewConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<()> {
    let addr = config.bind_addr();
    let state = Arc::new(HttpState { store, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Mockview HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Response DTOs
// ============================================================================

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }

    fn body(msg: &str) -> serde_json::Value {
        serde_json::json!(Self::new(msg))
    }
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Inner health check — asks the store and returns (status_code, json_body).
pub async fn health_inner(store: &dyn InterviewStore) -> (StatusCode, serde_json::Value) {
    match store.health().await {
        Ok(storage) => (
            StatusCode::OK,
            serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "storage": storage,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({
                "status": "unhealthy",
                "error": e.to_string(),
            }),
        ),
    }
}

/// Inner version — returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "api": "mockview/1",
    })
}

/// Inner create — stores the interview and echoes its new token.
pub async fn create_interview_inner(
    store: &dyn InterviewStore,
    req: NewMockInterview,
) -> (StatusCode, serde_json::Value) {
    match store.create_interview(req).await {
        Ok(interview) => (
            StatusCode::CREATED,
            serde_json::json!({
                "message": "Interview created successfully!",
                "mockId": interview.mock_id,
            }),
        ),
        Err(e) => {
            tracing::error!("Error creating interview: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::body(CREATE_INTERVIEW_FAILED),
            )
        }
    }
}

/// Inner lookup — one interview with `jsonMockResp` parsed back to JSON.
pub async fn get_interview_inner(
    store: &dyn InterviewStore,
    mock_id: &str,
) -> (StatusCode, serde_json::Value) {
    let interview = match store.find_interview(mock_id).await {
        Ok(Some(i)) => i,
        Ok(None) => return (StatusCode::NOT_FOUND, ErrorResponse::body(INTERVIEW_NOT_FOUND)),
        Err(e) => {
            tracing::error!("Error fetching interview: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::body(FETCH_INTERVIEW_FAILED),
            );
        }
    };

    let parsed = interview.parse_mock_resp();
    if let MockResponse::Corrupt(reason) = &parsed {
        tracing::warn!(mock_id, "Error parsing jsonMockResp: {}", reason);
    }

    to_json(StatusCode::OK, &interview.into_detail(parsed), FETCH_INTERVIEW_FAILED)
}

/// Inner listing — every interview created by `user_email`.
pub async fn list_interviews_inner(
    store: &dyn InterviewStore,
    user_email: &str,
    empty_not_found: bool,
) -> (StatusCode, serde_json::Value) {
    match store.list_interviews_by_creator(user_email).await {
        Ok(rows) => list_response(&rows, empty_not_found, FETCH_INTERVIEW_FAILED),
        Err(e) => {
            tracing::error!("Error fetching interviews: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::body(FETCH_INTERVIEW_FAILED),
            )
        }
    }
}

/// Inner answer submission — returns the stored row.
pub async fn create_answer_inner(
    store: &dyn InterviewStore,
    req: NewUserAnswer,
) -> (StatusCode, serde_json::Value) {
    match store.create_answer(req).await {
        Ok(answer) => (
            StatusCode::OK,
            serde_json::json!({
                "message": "User answer added successfully!",
                "data": answer,
            }),
        ),
        Err(e) => {
            tracing::error!("Error posting user answer: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::body(POST_ANSWER_FAILED),
            )
        }
    }
}

/// Inner feedback — every answer recorded against `mock_id`.
pub async fn feedback_inner(
    store: &dyn InterviewStore,
    mock_id: &str,
    empty_not_found: bool,
) -> (StatusCode, serde_json::Value) {
    match store.list_answers(mock_id).await {
        Ok(rows) => list_response(&rows, empty_not_found, FETCH_INTERVIEW_FAILED),
        Err(e) => {
            tracing::error!("Error fetching feedback: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::body(FETCH_INTERVIEW_FAILED),
            )
        }
    }
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn root_handler() -> &'static str {
    LIVENESS_TEXT
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(state.store.as_ref()).await;
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn create_interview_handler(
    State(state): State<Arc<HttpState>>,
    req: std::result::Result<Json<NewMockInterview>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = create_interview_inner(state.store.as_ref(), body_or_default(req)).await;
    (status, Json(body))
}

pub async fn get_interview_handler(
    State(state): State<Arc<HttpState>>,
    Path(mock_id): Path<String>,
) -> impl IntoResponse {
    let (status, body) = get_interview_inner(state.store.as_ref(), &mock_id).await;
    (status, Json(body))
}

pub async fn list_interviews_handler(
    State(state): State<Arc<HttpState>>,
    Path(user_email): Path<String>,
) -> impl IntoResponse {
    let (status, body) = list_interviews_inner(
        state.store.as_ref(),
        &user_email,
        state.config.http.empty_list_not_found,
    )
    .await;
    (status, Json(body))
}

pub async fn create_answer_handler(
    State(state): State<Arc<HttpState>>,
    req: std::result::Result<Json<NewUserAnswer>, JsonRejection>,
) -> impl IntoResponse {
    let (status, body) = create_answer_inner(state.store.as_ref(), body_or_default(req)).await;
    (status, Json(body))
}

pub async fn feedback_handler(
    State(state): State<Arc<HttpState>>,
    Path(mock_id): Path<String>,
) -> impl IntoResponse {
    let (status, body) = feedback_inner(
        state.store.as_ref(),
        &mock_id,
        state.config.http.empty_list_not_found,
    )
    .await;
    (status, Json(body))
}

// ============================================================================
// Helpers
// ============================================================================

/// A body that is missing, not JSON, or sent without a JSON content type is
/// read as an empty object; the store's NOT NULL columns then reject it.
fn body_or_default<T: Default>(body: std::result::Result<Json<T>, JsonRejection>) -> T {
    match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::warn!("Unreadable request body: {}", rejection);
            T::default()
        }
    }
}

fn to_json<T: Serialize>(
    status: StatusCode,
    value: &T,
    failure: &str,
) -> (StatusCode, serde_json::Value) {
    match serde_json::to_value(value) {
        Ok(v) => (status, v),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::body(failure))
        }
    }
}

/// An empty result is 404 unless the listing policy says otherwise.
fn list_response<T: Serialize>(
    rows: &[T],
    empty_not_found: bool,
    failure: &str,
) -> (StatusCode, serde_json::Value) {
    if rows.is_empty() && empty_not_found {
        return (StatusCode::NOT_FOUND, ErrorResponse::body(INTERVIEW_NOT_FOUND));
    }
    to_json(StatusCode::OK, &rows, failure)
}

// ============================================================================
// Unit Tests — call inner functions directly against the in-memory store
// ============================================================================
