//! Appointment queries. These take any executor so the booking path can run
//! them inside its locking transaction.

use crate::models::DbAppointment;
use chrono::{NaiveDate, NaiveTime};
use eyre::Result;
use medqueue_core::models::appointment::NewAppointment;
use sqlx::{Executor, Postgres};

pub async fn count_active_appointments<'e, E>(
    executor: E,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<i64>
where
    E: Executor<'e, Database = Postgres>,
{
    let count = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*)
        FROM appointments
        WHERE doctor_id = $1
            AND appointment_date = $2
            AND status NOT IN ('cancelled', 'completed', 'no-show')
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_one(executor)
    .await?;

    Ok(count)
}

pub async fn max_queue_number<'e, E>(
    executor: E,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<Option<i32>>
where
    E: Executor<'e, Database = Postgres>,
{
    let max = sqlx::query_scalar::<_, Option<i32>>(
        r#"
        SELECT MAX(queue_number)
        FROM appointments
        WHERE doctor_id = $1 AND appointment_date = $2
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_one(executor)
    .await?;

    Ok(max)
}

/// Blocks until this transaction holds the booking lock for the doctor's day.
/// Released automatically on commit or rollback.
pub async fn lock_doctor_day<'e, E>(executor: E, doctor_id: i64, date: NaiveDate) -> Result<()>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
        .bind(format!("appointments:{}:{}", doctor_id, date))
        .execute(executor)
        .await?;

    Ok(())
}

pub async fn insert_appointment<'e, E>(
    executor: E,
    record: &NewAppointment,
) -> Result<DbAppointment, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments
            (patient_id, doctor_id, appointment_date, appointment_time, status, reason, notes, queue_number)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, patient_id, doctor_id, appointment_date, appointment_time,
                  status, reason, notes, queue_number, created_at
        "#,
    )
    .bind(record.patient_id)
    .bind(record.doctor_id)
    .bind(record.appointment_date)
    .bind(record.appointment_time)
    .bind(record.status.as_str())
    .bind(&record.reason)
    .bind(&record.notes)
    .bind(record.queue_number)
    .fetch_one(executor)
    .await
}

pub async fn booked_times<'e, E>(
    executor: E,
    doctor_id: i64,
    date: NaiveDate,
) -> Result<Vec<NaiveTime>>
where
    E: Executor<'e, Database = Postgres>,
{
    let times = sqlx::query_scalar::<_, NaiveTime>(
        r#"
        SELECT appointment_time
        FROM appointments
        WHERE doctor_id = $1
            AND appointment_date = $2
            AND status NOT IN ('cancelled', 'no-show')
        ORDER BY appointment_time ASC
        "#,
    )
    .bind(doctor_id)
    .bind(date)
    .fetch_all(executor)
    .await?;

    Ok(times)
}
