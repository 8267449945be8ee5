//! HTTP API over the analysis pipeline.
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | `POST` | `/analyze` | `{"company": "..."}` | `AnalysisResult` JSON |
//! | `GET` | `/health` | | `{"status": "healthy", ...}` |
//!
//! Errors are returned as `{"error": "<message>"}` with `400` for a missing
//! company and `500` for anything that failed inside the pipeline.

use crate::errors::AppError;
use crate::models::AnalysisResult;
use crate::pipeline::Pipeline;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MissingCompany => StatusCode::BAD_REQUEST,
            AppError::Search(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Pull a non-blank `company` string out of the request body.
fn company_from_body(body: Result<Json<Value>, JsonRejection>) -> Result<String, AppError> {
    let Json(value) = body.map_err(|rejection| {
        warn!(error = %rejection, "Rejected request body");
        AppError::MissingCompany
    })?;
    value
        .get("company")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingCompany)
}

#[instrument(level = "info", skip_all)]
async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let company = company_from_body(body)?;
    info!(%company, "Analysis requested");

    // Run on its own task so a panic inside the pipeline becomes a 500.
    let pipeline = Arc::clone(&state.pipeline);
    let task_company = company.clone();
    let outcome = tokio::spawn(async move { pipeline.analyze(&task_company).await })
        .await
        .unwrap_or_else(|e| Err(AppError::Internal(format!("analysis task failed: {e}"))));

    match outcome {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!(%company, error = %e, "Analysis failed");
            Err(e)
        }
    }
}
