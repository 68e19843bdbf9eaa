use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub staff_id: String,
    pub is_active: bool,
}

/// A doctor's configured working window for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorShift {
    pub doctor_id: i64,
    /// English weekday name, e.g. "Monday".
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

/// An active department doctor annotated with the number of live
/// appointments they already hold on a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorLoad {
    pub doctor_id: i64,
    pub name: String,
    pub current_patients: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShiftSource {
    Configured,
    Default,
    /// The shift lookup failed and the default window was used instead.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCapacity {
    #[serde(with = "super::serde_hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "super::serde_hhmm")]
    pub end_time: NaiveTime,
    pub max_patients: i64,
    pub source: ShiftSource,
}
