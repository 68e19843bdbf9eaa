use axum::{extract::State, http::StatusCode, Json};
use chrono::NaiveDate;
use medqueue_api::handlers::appointment::schedule_appointment;
use medqueue_core::errors::SchedulingError;
use medqueue_db::mock::repositories::MockSchedulerRepo;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::{mock_state, request, TestContext};

#[tokio::test]
async fn test_schedule_appointment_first_in_queue() {
    let ctx = TestContext::with_doctors(&[1]);

    let Json(assignment) = schedule_appointment(State(ctx.build_state()), Json(request(7, "2026-10-19")))
        .await
        .unwrap();

    assert_eq!(assignment.doctor_id, 1);
    assert_eq!(assignment.queue_number, 1);
    assert_eq!(assignment.appointment_date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
    assert_eq!(assignment.notes, "Queue number 1");
    assert_eq!(ctx.store.appointments().len(), 1);
}

#[tokio::test]
async fn test_schedule_appointment_on_saturday_lands_on_monday() {
    let ctx = TestContext::with_doctors(&[1]);

    let Json(assignment) = schedule_appointment(State(ctx.build_state()), Json(request(7, "2026-10-24")))
        .await
        .unwrap();

    assert_eq!(assignment.appointment_date, NaiveDate::from_ymd_opt(2026, 10, 26).unwrap());
    assert!(assignment.weekend_adjusted);
    assert!(assignment.notes.contains("weekend adjustment"));
}

#[rstest]
#[case::zero_patient(0, 1, "Checkup", None)]
#[case::negative_department(5, -2, "Checkup", None)]
#[case::blank_reason(5, 1, "   ", None)]
#[case::bad_preferred_doctor(5, 1, "Checkup", Some(0))]
#[tokio::test]
async fn test_schedule_appointment_rejects_invalid_payload(
    #[case] patient_id: i64,
    #[case] department_id: i64,
    #[case] reason: &str,
    #[case] preferred_doctor_id: Option<i64>,
) {
    let ctx = TestContext::with_doctors(&[1]);
    let mut payload = request(patient_id, "2026-10-19");
    payload.department_id = department_id;
    payload.reason = reason.to_string();
    payload.preferred_doctor_id = preferred_doctor_id;

    let err = schedule_appointment(State(ctx.build_state()), Json(payload))
        .await
        .unwrap_err();

    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    assert!(ctx.store.appointments().is_empty());
}

#[tokio::test]
async fn test_schedule_appointment_unparseable_date() {
    let ctx = TestContext::with_doctors(&[1]);

    let err = schedule_appointment(State(ctx.build_state()), Json(request(7, "19/10/2026")))
        .await
        .unwrap_err();

    assert!(matches!(err.0, SchedulingError::Validation(_)));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_schedule_appointment_empty_department() {
    let ctx = TestContext::new();

    let err = schedule_appointment(State(ctx.build_state()), Json(request(7, "2026-10-19")))
        .await
        .unwrap_err();

    assert!(matches!(err.0, SchedulingError::NoDoctorsInDepartment(1)));
    assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_schedule_appointment_storage_failure_is_retryable() {
    let mut repo = MockSchedulerRepo::new();
    repo.expect_list_doctor_loads()
        .returning(|_, _| Err(eyre::eyre!("connection reset")));

    let err = schedule_appointment(State(mock_state(repo)), Json(request(7, "2026-10-19")))
        .await
        .unwrap_err();

    assert!(err.0.is_retryable());
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}
