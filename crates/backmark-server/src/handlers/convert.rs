//! Conversion API endpoint.
//!
//! Accepts Backlog notation and returns the converted Markdown as JSON.
//! The JSON route (`POST /api/v1`) and the form route (`POST /convert`)
//! share the same conversion path and response shape.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Request payload carrying the Backlog text.
#[derive(Deserialize)]
pub(crate) struct ConvertRequest {
    /// Backlog notation to convert.
    #[serde(default)]
    body: Option<String>,
}

/// Successful conversion response.
#[derive(Serialize)]
struct ConvertResponse {
    success: bool,
    markdown: String,
}

/// Error response body.
#[derive(Serialize)]
struct ApiError {
    success: bool,
    error: String,
}

impl ApiError {
    fn response(status: StatusCode, error: impl Into<String>) -> Response {
        let body = Self {
            success: false,
            error: error.into(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handle POST /api/v1.
pub(crate) async fn convert_json(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConvertRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return ApiError::response(StatusCode::BAD_REQUEST, "Body is required.");
    };
    convert_impl(&state, request.body)
}

/// Handle POST /convert (form submission from the home page).
pub(crate) async fn convert_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<ConvertRequest>,
) -> Response {
    convert_impl(&state, request.body)
}

/// Handle any non-POST method on /api/v1.
pub(crate) async fn method_not_allowed() -> Response {
    ApiError::response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed.")
}

/// Handle unmatched /api/v1/* routes.
pub(crate) async fn not_found() -> Response {
    ApiError::response(StatusCode::OK, "Not Found.")
}

/// Shared conversion implementation.
fn convert_impl(state: &AppState, body: Option<String>) -> Response {
    let Some(body) = body.filter(|b| !b.is_empty()) else {
        return ApiError::response(StatusCode::BAD_REQUEST, "Body is required.");
    };

    if state.verbose {
        tracing::info!(bytes = body.len(), "Converting request body");
    }

    // The engine is a total function, so a panic here is a bug; contain it
    // and report a generic failure instead of crashing the worker.
    match std::panic::catch_unwind(|| backmark_convert::convert(&body)) {
        Ok(markdown) => Json(ConvertResponse {
            success: true,
            markdown,
        })
        .into_response(),
        Err(_) => {
            tracing::error!("Conversion panicked");
            ApiError::response(StatusCode::OK, "Conversion failed.")
        }
    }
}
