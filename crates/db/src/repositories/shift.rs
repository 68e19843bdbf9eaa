use crate::models::DbDoctorShift;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_shift(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    day_of_week: &str,
) -> Result<Option<DbDoctorShift>> {
    let shift = sqlx::query_as::<_, DbDoctorShift>(
        r#"
        SELECT doctor_id, day_of_week, start_time, end_time, is_available
        FROM doctor_shifts
        WHERE doctor_id = $1 AND day_of_week = $2
        "#,
    )
    .bind(doctor_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    Ok(shift)
}

pub async fn upsert_shift(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    day_of_week: &str,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
    is_available: bool,
) -> Result<DbDoctorShift> {
    let shift = sqlx::query_as::<_, DbDoctorShift>(
        r#"
        INSERT INTO doctor_shifts (doctor_id, day_of_week, start_time, end_time, is_available)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (doctor_id, day_of_week)
        DO UPDATE SET start_time = $3, end_time = $4, is_available = $5
        RETURNING doctor_id, day_of_week, start_time, end_time, is_available
        "#,
    )
    .bind(doctor_id)
    .bind(day_of_week)
    .bind(start_time)
    .bind(end_time)
    .bind(is_available)
    .fetch_one(pool)
    .await?;

    Ok(shift)
}
