use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Department {0} has no active doctors assigned")]
    NoDoctorsInDepartment(i64),

    #[error(
        "Department {department_id} is fully booked from {from} to {to}; please try a later date or contact the hospital"
    )]
    SchedulingExhausted {
        department_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    },

    #[error("Queue position {queue_number} would start after midnight")]
    SlotOverflow { queue_number: i32 },

    #[error("Could not claim a queue number after {attempts} attempts")]
    QueueContention { attempts: u32 },

    #[error("Database error: {0}")]
    Storage(#[from] eyre::Report),
}

impl SchedulingError {
    /// Whether the same request may succeed if the caller simply tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SchedulingError::Storage(_) | SchedulingError::QueueContention { .. }
        )
    }
}

pub type SchedulingResult<T> = Result<T, SchedulingError>;
