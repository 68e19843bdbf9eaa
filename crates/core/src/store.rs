//! The storage contract the scheduler runs against.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;

use crate::models::{
    appointment::{Appointment, NewAppointment},
    doctor::{Doctor, DoctorLoad, DoctorShift},
};

/// Result of trying to write a computed appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted(Appointment),
    /// Another booking claimed this queue number for the doctor and date first.
    QueueNumberTaken,
    /// The doctor filled up between selection and the write.
    CapacityReached,
}

/// Relational store backing the scheduler.
///
/// `insert_appointment` must check the queue number and the doctor's live
/// load and perform the insert as one serialised step per
/// (doctor, date). Everything else is a plain read.
#[async_trait]
pub trait SchedulerStore: Send + Sync {
    async fn get_shift(&self, doctor_id: i64, weekday: &str) -> Result<Option<DoctorShift>>;

    /// Active doctors in the department, each with the count of appointments
    /// on `date` that still occupy capacity.
    async fn list_doctor_loads(&self, department_id: i64, date: NaiveDate) -> Result<Vec<DoctorLoad>>;

    async fn find_department_doctor(&self, department_id: i64, doctor_id: i64) -> Result<Option<Doctor>>;

    async fn count_active_appointments(&self, doctor_id: i64, date: NaiveDate) -> Result<i64>;

    async fn max_queue_number(&self, doctor_id: i64, date: NaiveDate) -> Result<Option<i32>>;

    async fn insert_appointment(&self, record: &NewAppointment, max_patients: i64) -> Result<InsertOutcome>;

    /// Times held by appointments that are neither cancelled nor no-shows.
    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> Result<Vec<NaiveTime>>;
}
