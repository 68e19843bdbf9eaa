use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create departments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS departments (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            staff_id VARCHAR(64) NOT NULL UNIQUE,
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctor_departments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_departments (
            doctor_id BIGINT NOT NULL REFERENCES doctors(id),
            department_id BIGINT NOT NULL REFERENCES departments(id),
            PRIMARY KEY (doctor_id, department_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create doctor_shifts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_shifts (
            id BIGSERIAL PRIMARY KEY,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id),
            day_of_week VARCHAR(9) NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            is_available BOOLEAN NOT NULL DEFAULT TRUE,
            CONSTRAINT doctor_shifts_doctor_day_key UNIQUE (doctor_id, day_of_week)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. The unique key backs up the per-doctor,
    // per-day lock taken when a queue number is claimed.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id BIGSERIAL PRIMARY KEY,
            patient_id BIGINT NOT NULL,
            doctor_id BIGINT NOT NULL REFERENCES doctors(id),
            appointment_date DATE NOT NULL,
            appointment_time TIME NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'scheduled',
            reason TEXT NOT NULL,
            notes TEXT NOT NULL DEFAULT '',
            queue_number INTEGER NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT appointments_valid_status
                CHECK (status IN ('scheduled', 'completed', 'cancelled', 'no-show')),
            CONSTRAINT appointments_positive_queue CHECK (queue_number >= 1),
            CONSTRAINT appointments_doctor_date_queue_key
                UNIQUE (doctor_id, appointment_date, queue_number)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_appointments_doctor_date ON appointments(doctor_id, appointment_date);
        CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id);
        CREATE INDEX IF NOT EXISTS idx_doctor_departments_department_id ON doctor_departments(department_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
