use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use medqueue_api::middleware::error_handling::AppError;
use medqueue_core::errors::SchedulingError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

fn exhausted() -> SchedulingError {
    SchedulingError::SchedulingExhausted {
        department_id: 2,
        from: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        to: NaiveDate::from_ymd_opt(2026, 10, 27).unwrap(),
    }
}

#[rstest]
#[case::validation(SchedulingError::Validation("bad".to_string()), StatusCode::BAD_REQUEST)]
#[case::not_found(SchedulingError::NotFound("doctor".to_string()), StatusCode::NOT_FOUND)]
#[case::no_doctors(SchedulingError::NoDoctorsInDepartment(4), StatusCode::UNPROCESSABLE_ENTITY)]
#[case::exhausted(exhausted(), StatusCode::CONFLICT)]
#[case::overflow(SchedulingError::SlotOverflow { queue_number: 60 }, StatusCode::CONFLICT)]
#[case::contention(SchedulingError::QueueContention { attempts: 16 }, StatusCode::SERVICE_UNAVAILABLE)]
#[case::storage(SchedulingError::Storage(eyre::eyre!("down")), StatusCode::SERVICE_UNAVAILABLE)]
fn test_error_status_mapping(#[case] error: SchedulingError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_reports_retryable() {
    let response = AppError(SchedulingError::QueueContention { attempts: 3 }).into_response();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["retryable"], true);
    assert!(body["error"].as_str().unwrap().contains('3'));
}

#[tokio::test]
async fn test_error_body_for_client_error() {
    let response = AppError(exhausted()).into_response();

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["retryable"], false);
}

#[test]
fn test_eyre_report_maps_to_storage() {
    let err: AppError = eyre::eyre!("pool closed").into();

    assert!(matches!(err.0, SchedulingError::Storage(_)));
    assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
}
