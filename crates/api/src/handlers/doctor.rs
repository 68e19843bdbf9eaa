use axum::{
    extract::{Path, Query, State},
    Json,
};
use medqueue_core::{
    models::appointment::{AvailableSlotsResponse, ShiftCapacityResponse},
    scheduling::{calendar::parse_calendar_date, listing::format_slot},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar date as `YYYY-MM-DD`
    pub date: String,
}

/// Free half-hour slots between 09:00 and 17:00.
///
/// This listing uses its own fixed grid and does not reflect the 25-minute
/// queue slots the booking endpoint hands out.
#[axum::debug_handler]
pub async fn available_slots(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let date = parse_calendar_date(&query.date)?;
    let slots = state.scheduler.list_available_slots(doctor_id, date).await?;

    Ok(Json(AvailableSlotsResponse {
        doctor_id,
        date,
        slots: slots.into_iter().map(format_slot).collect(),
    }))
}

/// The doctor's shift window and patient capacity on a date.
#[axum::debug_handler]
pub async fn shift_capacity(
    State(state): State<Arc<ApiState>>,
    Path(doctor_id): Path<i64>,
    Query(query): Query<DateQuery>,
) -> Result<Json<ShiftCapacityResponse>, AppError> {
    let date = parse_calendar_date(&query.date)?;
    let capacity = state.scheduler.resolve_shift_capacity(doctor_id, date).await;

    Ok(Json(ShiftCapacityResponse {
        doctor_id,
        date,
        capacity,
    }))
}
