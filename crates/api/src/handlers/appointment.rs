//! # Appointment Handlers
//!
//! The booking endpoint. All placement logic lives in the core scheduler;
//! this layer only validates the payload and reports the outcome.

use axum::{extract::State, Json};
use medqueue_core::{
    errors::SchedulingError,
    models::appointment::{AppointmentAssignment, ScheduleAppointmentRequest},
};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Books an appointment in a department.
///
/// ```text
/// POST /api/appointments
/// {"patient_id": 7, "department_id": 2, "reason": "Checkup", "requested_date": "2026-10-24"}
/// ```
///
/// # Errors
///
/// * `400` - Malformed ids, empty reason or unparseable date
/// * `409` - Department fully booked for the whole rollover window
/// * `422` - Department has no active doctors
/// * `503` - Storage failure or persistent queue contention; safe to retry
#[axum::debug_handler]
pub async fn schedule_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ScheduleAppointmentRequest>,
) -> Result<Json<AppointmentAssignment>, AppError> {
    let request_id = Uuid::new_v4();
    validate(&payload)?;

    info!(
        %request_id,
        patient_id = payload.patient_id,
        department_id = payload.department_id,
        requested_date = %payload.requested_date,
        "Scheduling appointment"
    );

    match state.scheduler.schedule_appointment(&payload).await {
        Ok(assignment) => Ok(Json(assignment)),
        Err(err) => {
            warn!(%request_id, error = %err, "Scheduling failed");
            Err(AppError(err))
        }
    }
}

fn validate(payload: &ScheduleAppointmentRequest) -> Result<(), SchedulingError> {
    if payload.patient_id <= 0 {
        return Err(SchedulingError::Validation("patient_id must be positive".to_string()));
    }
    if payload.department_id <= 0 {
        return Err(SchedulingError::Validation("department_id must be positive".to_string()));
    }
    if matches!(payload.preferred_doctor_id, Some(id) if id <= 0) {
        return Err(SchedulingError::Validation("preferred_doctor_id must be positive".to_string()));
    }
    if payload.reason.trim().is_empty() {
        return Err(SchedulingError::Validation("reason is required".to_string()));
    }
    Ok(())
}
