use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    #[serde(rename = "no-show")]
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::NoShow => "no-show",
        }
    }

    /// Counts against a doctor's capacity for the day.
    pub fn occupies_capacity(&self) -> bool {
        !matches!(
            self,
            AppointmentStatus::Cancelled | AppointmentStatus::Completed | AppointmentStatus::NoShow
        )
    }

    /// Blocks its time on the public available-slot listing. Completed visits
    /// still hold their slot there.
    pub fn occupies_listing_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::NoShow)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            "no-show" => Ok(AppointmentStatus::NoShow),
            other => Err(format!("unknown appointment status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    #[serde(with = "super::serde_hhmm")]
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: String,
    pub notes: String,
    pub queue_number: i32,
    pub created_at: DateTime<Utc>,
}

/// A fully computed appointment row, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: String,
    pub notes: String,
    pub queue_number: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleAppointmentRequest {
    pub patient_id: i64,
    pub department_id: i64,
    pub reason: String,
    /// Calendar date as `YYYY-MM-DD`; a datetime string is cut to its date part.
    pub requested_date: String,
    #[serde(default)]
    pub preferred_doctor_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentAssignment {
    pub appointment_id: i64,
    pub doctor_id: i64,
    pub doctor_name: String,
    pub appointment_date: NaiveDate,
    #[serde(with = "super::serde_hhmm")]
    pub appointment_time: NaiveTime,
    pub queue_number: i32,
    pub notes: String,
    pub weekend_adjusted: bool,
    pub rolled_over: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub doctor_id: i64,
    pub date: NaiveDate,
    pub slots: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCapacityResponse {
    pub doctor_id: i64,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub capacity: super::doctor::ShiftCapacity,
}
