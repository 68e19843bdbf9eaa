use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use medqueue_api::handlers::doctor::{available_slots, shift_capacity, DateQuery};
use medqueue_core::models::{
    appointment::AppointmentStatus,
    doctor::{DoctorShift, ShiftSource},
};
use medqueue_db::mock::repositories::MockSchedulerRepo;
use pretty_assertions::assert_eq;

use crate::test_utils::{mock_state, TestContext};

fn query(date: &str) -> Query<DateQuery> {
    Query(DateQuery {
        date: date.to_string(),
    })
}

#[tokio::test]
async fn test_available_slots_full_grid_for_empty_day() {
    let ctx = TestContext::with_doctors(&[1]);

    let Json(response) = available_slots(State(ctx.build_state()), Path(1), query("2026-10-20"))
        .await
        .unwrap();

    assert_eq!(response.doctor_id, 1);
    assert_eq!(response.date, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    assert_eq!(response.slots.len(), 16);
    assert_eq!(response.slots.first().map(String::as_str), Some("09:00"));
    assert_eq!(response.slots.last().map(String::as_str), Some("16:30"));
}

#[tokio::test]
async fn test_available_slots_ignores_cancelled_bookings() {
    let ctx = TestContext::with_doctors(&[1]);
    let day = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
    // Seeded on the queue grid from 08:00, so only 09:15 onwards could clash
    // with the half-hour listing and none of these do.
    ctx.store.seed_appointment(1, day, AppointmentStatus::Scheduled);
    ctx.store.seed_appointment(1, day, AppointmentStatus::Cancelled);

    let Json(response) = available_slots(State(ctx.build_state()), Path(1), query("2026-10-20"))
        .await
        .unwrap();

    assert_eq!(response.slots.len(), 16);
}

#[tokio::test]
async fn test_available_slots_rejects_bad_date() {
    let ctx = TestContext::with_doctors(&[1]);

    let err = available_slots(State(ctx.build_state()), Path(1), query("tomorrow"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shift_capacity_default_window() {
    let ctx = TestContext::with_doctors(&[1]);

    let Json(response) = shift_capacity(State(ctx.build_state()), Path(1), query("2026-10-19"))
        .await
        .unwrap();

    assert_eq!(response.capacity.max_patients, 19);
    assert_eq!(response.capacity.source, ShiftSource::Default);
}

#[tokio::test]
async fn test_shift_capacity_configured_window() {
    let ctx = TestContext::with_doctors(&[1]);
    ctx.store.set_shift(DoctorShift {
        doctor_id: 1,
        day_of_week: "Monday".to_string(),
        start_time: chrono::NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        end_time: chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        is_available: true,
    });

    let Json(response) = shift_capacity(State(ctx.build_state()), Path(1), query("2026-10-19"))
        .await
        .unwrap();

    assert_eq!(response.capacity.max_patients, 4);
    assert_eq!(response.capacity.source, ShiftSource::Configured);

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["start_time"], "08:00");
    assert_eq!(json["end_time"], "10:00");
}

#[tokio::test]
async fn test_shift_capacity_lookup_failure_falls_back() {
    let mut repo = MockSchedulerRepo::new();
    repo.expect_get_shift()
        .returning(|_, _| Err(eyre::eyre!("timeout")));

    let Json(response) = shift_capacity(State(mock_state(repo)), Path(3), query("2026-10-19"))
        .await
        .unwrap();

    assert_eq!(response.capacity.max_patients, 19);
    assert_eq!(response.capacity.source, ShiftSource::Fallback);
}
