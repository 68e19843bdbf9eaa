use crate::models::{DbDoctor, DbDoctorLoad};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};

/// Active doctors in a department with their live load on `date`,
/// least loaded first.
pub async fn list_doctor_loads(
    pool: &Pool<Postgres>,
    department_id: i64,
    date: NaiveDate,
) -> Result<Vec<DbDoctorLoad>> {
    let loads = sqlx::query_as::<_, DbDoctorLoad>(
        r#"
        SELECT d.id AS doctor_id, d.name, COUNT(a.id) AS current_patients
        FROM doctors d
        JOIN doctor_departments dd ON dd.doctor_id = d.id
        LEFT JOIN appointments a
            ON a.doctor_id = d.id
            AND a.appointment_date = $2
            AND a.status NOT IN ('cancelled', 'completed', 'no-show')
        WHERE dd.department_id = $1 AND d.is_active
        GROUP BY d.id, d.name
        ORDER BY current_patients ASC, d.id ASC
        "#,
    )
    .bind(department_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(loads)
}

pub async fn find_department_doctor(
    pool: &Pool<Postgres>,
    department_id: i64,
    doctor_id: i64,
) -> Result<Option<DbDoctor>> {
    let doctor = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT d.id, d.name, d.email, d.staff_id, d.is_active
        FROM doctors d
        JOIN doctor_departments dd ON dd.doctor_id = d.id
        WHERE dd.department_id = $1 AND d.id = $2
        "#,
    )
    .bind(department_id)
    .bind(doctor_id)
    .fetch_optional(pool)
    .await?;

    Ok(doctor)
}

pub async fn create_department(pool: &Pool<Postgres>, name: &str) -> Result<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO departments (name)
        VALUES ($1)
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

pub async fn create_doctor(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    staff_id: &str,
) -> Result<DbDoctor> {
    let doctor = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (name, email, staff_id)
        VALUES ($1, $2, $3)
        RETURNING id, name, email, staff_id, is_active
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(staff_id)
    .fetch_one(pool)
    .await?;

    Ok(doctor)
}

pub async fn assign_to_department(
    pool: &Pool<Postgres>,
    doctor_id: i64,
    department_id: i64,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO doctor_departments (doctor_id, department_id)
        VALUES ($1, $2)
        ON CONFLICT (doctor_id, department_id) DO NOTHING
        "#,
    )
    .bind(doctor_id)
    .bind(department_id)
    .execute(pool)
    .await?;

    Ok(())
}
