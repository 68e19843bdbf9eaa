use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use medqueue_core::{
    models::{
        appointment::NewAppointment,
        doctor::{Doctor, DoctorLoad, DoctorShift},
    },
    store::{InsertOutcome, SchedulerStore},
};
use mockall::mock;

// Mock store for testing
mock! {
    pub SchedulerRepo {}

    #[async_trait]
    impl SchedulerStore for SchedulerRepo {
        async fn get_shift(&self, doctor_id: i64, weekday: &str) -> eyre::Result<Option<DoctorShift>>;

        async fn list_doctor_loads(
            &self,
            department_id: i64,
            date: NaiveDate,
        ) -> eyre::Result<Vec<DoctorLoad>>;

        async fn find_department_doctor(
            &self,
            department_id: i64,
            doctor_id: i64,
        ) -> eyre::Result<Option<Doctor>>;

        async fn count_active_appointments(&self, doctor_id: i64, date: NaiveDate) -> eyre::Result<i64>;

        async fn max_queue_number(&self, doctor_id: i64, date: NaiveDate) -> eyre::Result<Option<i32>>;

        async fn insert_appointment(
            &self,
            record: &NewAppointment,
            max_patients: i64,
        ) -> eyre::Result<InsertOutcome>;

        async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> eyre::Result<Vec<NaiveTime>>;
    }
}
