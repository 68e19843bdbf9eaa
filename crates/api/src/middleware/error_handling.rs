//! # Error Handling Middleware
//!
//! Maps scheduling errors to HTTP status codes and JSON error bodies so
//! every endpoint reports failures the same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use medqueue_core::errors::SchedulingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```ignore
/// async fn handler(State(state): State<Arc<ApiState>>) -> Result<Json<AppointmentAssignment>, AppError> {
///     let assignment = state.scheduler.schedule_appointment(&request).await?;
///     Ok(Json(assignment))
/// }
/// ```
#[derive(Debug)]
pub struct AppError(pub SchedulingError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            SchedulingError::Validation(_) => StatusCode::BAD_REQUEST,
            SchedulingError::NotFound(_) => StatusCode::NOT_FOUND,
            SchedulingError::NoDoctorsInDepartment(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SchedulingError::SchedulingExhausted { .. } => StatusCode::CONFLICT,
            SchedulingError::SlotOverflow { .. } => StatusCode::CONFLICT,
            SchedulingError::QueueContention { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SchedulingError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = ?self.0, "Request failed");
        }

        let body = Json(json!({
            "error": self.0.to_string(),
            "retryable": self.0.is_retryable(),
        }));

        (status, body).into_response()
    }
}

/// Allows `?` on `SchedulingResult` inside handlers.
impl From<SchedulingError> for AppError {
    fn from(err: SchedulingError) -> Self {
        AppError(err)
    }
}

/// Wraps raw storage errors as `SchedulingError::Storage`.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(SchedulingError::Storage(err))
    }
}
