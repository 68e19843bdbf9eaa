use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Result, eyre};
use medqueue_core::models::{
    appointment::{Appointment, AppointmentStatus},
    doctor::{Doctor, DoctorLoad, DoctorShift},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub staff_id: String,
    pub is_active: bool,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            email: row.email,
            staff_id: row.staff_id,
            is_active: row.is_active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorShift {
    pub doctor_id: i64,
    pub day_of_week: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
}

impl From<DbDoctorShift> for DoctorShift {
    fn from(row: DbDoctorShift) -> Self {
        DoctorShift {
            doctor_id: row.doctor_id,
            day_of_week: row.day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            is_available: row.is_available,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctorLoad {
    pub doctor_id: i64,
    pub name: String,
    pub current_patients: i64,
}

impl From<DbDoctorLoad> for DoctorLoad {
    fn from(row: DbDoctorLoad) -> Self {
        DoctorLoad {
            doctor_id: row.doctor_id,
            name: row.name,
            current_patients: row.current_patients,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: String,
    pub reason: String,
    pub notes: String,
    pub queue_number: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = eyre::Report;

    fn try_from(row: DbAppointment) -> Result<Self> {
        let status = row
            .status
            .parse::<AppointmentStatus>()
            .map_err(|e| eyre!("Appointment {}: {}", row.id, e))?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            appointment_date: row.appointment_date,
            appointment_time: row.appointment_time,
            status,
            reason: row.reason,
            notes: row.notes,
            queue_number: row.queue_number,
            created_at: row.created_at,
        })
    }
}
