//! PostgreSQL implementation of the scheduler's storage contract.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::{Result, WrapErr};
use medqueue_core::{
    models::{
        appointment::NewAppointment,
        doctor::{Doctor, DoctorLoad, DoctorShift},
    },
    store::{InsertOutcome, SchedulerStore},
};
use tracing::debug;

use crate::{DbPool, repositories};

#[derive(Clone)]
pub struct PgSchedulerStore {
    pool: DbPool,
}

impl PgSchedulerStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SchedulerStore for PgSchedulerStore {
    async fn get_shift(&self, doctor_id: i64, weekday: &str) -> Result<Option<DoctorShift>> {
        let shift = repositories::shift::get_shift(&self.pool, doctor_id, weekday)
            .await
            .wrap_err_with(|| format!("Failed to load {} shift for doctor {}", weekday, doctor_id))?;

        Ok(shift.map(Into::into))
    }

    async fn list_doctor_loads(&self, department_id: i64, date: NaiveDate) -> Result<Vec<DoctorLoad>> {
        let loads = repositories::doctor::list_doctor_loads(&self.pool, department_id, date)
            .await
            .wrap_err_with(|| format!("Failed to load doctors for department {}", department_id))?;

        Ok(loads.into_iter().map(Into::into).collect())
    }

    async fn find_department_doctor(&self, department_id: i64, doctor_id: i64) -> Result<Option<Doctor>> {
        let doctor = repositories::doctor::find_department_doctor(&self.pool, department_id, doctor_id)
            .await
            .wrap_err("Failed to look up preferred doctor")?;

        Ok(doctor.map(Into::into))
    }

    async fn count_active_appointments(&self, doctor_id: i64, date: NaiveDate) -> Result<i64> {
        repositories::appointment::count_active_appointments(&self.pool, doctor_id, date).await
    }

    async fn max_queue_number(&self, doctor_id: i64, date: NaiveDate) -> Result<Option<i32>> {
        repositories::appointment::max_queue_number(&self.pool, doctor_id, date).await
    }

    async fn insert_appointment(&self, record: &NewAppointment, max_patients: i64) -> Result<InsertOutcome> {
        let doctor_id = record.doctor_id;
        let date = record.appointment_date;

        let mut tx = self.pool.begin().await?;

        repositories::appointment::lock_doctor_day(&mut *tx, doctor_id, date).await?;

        // Re-check under the lock; the caller's reads may be stale.
        let current_max = repositories::appointment::max_queue_number(&mut *tx, doctor_id, date).await?;
        if record.queue_number != current_max.unwrap_or(0) + 1 {
            debug!(doctor_id, %date, wanted = record.queue_number, ?current_max, "Queue number moved on");
            tx.rollback().await?;
            return Ok(InsertOutcome::QueueNumberTaken);
        }

        let active = repositories::appointment::count_active_appointments(&mut *tx, doctor_id, date).await?;
        if active >= max_patients {
            debug!(doctor_id, %date, active, max_patients, "Doctor full at insert time");
            tx.rollback().await?;
            return Ok(InsertOutcome::CapacityReached);
        }

        let row = match repositories::appointment::insert_appointment(&mut *tx, record).await {
            Ok(row) => row,
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tx.rollback().await?;
                return Ok(InsertOutcome::QueueNumberTaken);
            }
            Err(err) => return Err(err).wrap_err("Failed to insert appointment"),
        };

        tx.commit().await?;

        Ok(InsertOutcome::Inserted(row.try_into()?))
    }

    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        repositories::appointment::booked_times(&self.pool, doctor_id, date).await
    }
}
