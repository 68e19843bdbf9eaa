//! In-process `SchedulerStore` for tests and local runs without PostgreSQL.
//!
//! Honours the same contract as the PostgreSQL store: the queue number and
//! capacity re-check and the insert happen under one lock.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::{Result, eyre};
use medqueue_core::{
    models::{
        appointment::{Appointment, AppointmentStatus, NewAppointment},
        doctor::{Doctor, DoctorLoad, DoctorShift},
    },
    scheduling::{capacity::DEFAULT_SHIFT_START, queue::time_slot_for_queue},
    store::{InsertOutcome, SchedulerStore},
};

#[derive(Default)]
struct MemoryState {
    doctors: BTreeMap<i64, Doctor>,
    memberships: BTreeSet<(i64, i64)>,
    shifts: HashMap<(i64, String), DoctorShift>,
    appointments: Vec<Appointment>,
    next_id: i64,
    failing_shift_lookups: bool,
}

impl MemoryState {
    fn day(&self, doctor_id: i64, date: NaiveDate) -> impl Iterator<Item = &Appointment> {
        self.appointments
            .iter()
            .filter(move |a| a.doctor_id == doctor_id && a.appointment_date == date)
    }

    fn active_count(&self, doctor_id: i64, date: NaiveDate) -> i64 {
        self.day(doctor_id, date)
            .filter(|a| a.status.occupies_capacity())
            .count() as i64
    }

    fn max_queue(&self, doctor_id: i64, date: NaiveDate) -> Option<i32> {
        self.day(doctor_id, date).map(|a| a.queue_number).max()
    }

    fn push(&mut self, record: &NewAppointment) -> Appointment {
        self.next_id += 1;
        let appointment = Appointment {
            id: self.next_id,
            patient_id: record.patient_id,
            doctor_id: record.doctor_id,
            appointment_date: record.appointment_date,
            appointment_time: record.appointment_time,
            status: record.status,
            reason: record.reason.clone(),
            notes: record.notes.clone(),
            queue_number: record.queue_number,
            created_at: Utc::now(),
        };
        self.appointments.push(appointment.clone());
        appointment
    }
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_doctor(&self, doctor: Doctor, department_ids: &[i64]) {
        let mut state = self.state();
        for department_id in department_ids {
            state.memberships.insert((*department_id, doctor.id));
        }
        state.doctors.insert(doctor.id, doctor);
    }

    pub fn set_shift(&self, shift: DoctorShift) {
        self.state()
            .shifts
            .insert((shift.doctor_id, shift.day_of_week.clone()), shift);
    }

    /// Makes every shift lookup fail until switched back off.
    pub fn fail_shift_lookups(&self, failing: bool) {
        self.state().failing_shift_lookups = failing;
    }

    /// Books directly at the next queue position, bypassing capacity checks.
    pub fn seed_appointment(&self, doctor_id: i64, date: NaiveDate, status: AppointmentStatus) -> Appointment {
        let mut state = self.state();
        let queue_number = state.max_queue(doctor_id, date).unwrap_or(0) + 1;
        let appointment_time =
            time_slot_for_queue(DEFAULT_SHIFT_START, queue_number).unwrap_or(DEFAULT_SHIFT_START);

        state.push(&NewAppointment {
            patient_id: 0,
            doctor_id,
            appointment_date: date,
            appointment_time,
            status,
            reason: "seeded".to_string(),
            notes: String::new(),
            queue_number,
        })
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.state().appointments.clone()
    }
}

#[async_trait]
impl SchedulerStore for InMemoryStore {
    async fn get_shift(&self, doctor_id: i64, weekday: &str) -> Result<Option<DoctorShift>> {
        let state = self.state();
        if state.failing_shift_lookups {
            return Err(eyre!("shift lookup unavailable"));
        }
        Ok(state.shifts.get(&(doctor_id, weekday.to_string())).cloned())
    }

    async fn list_doctor_loads(&self, department_id: i64, date: NaiveDate) -> Result<Vec<DoctorLoad>> {
        let state = self.state();
        let mut loads: Vec<DoctorLoad> = state
            .memberships
            .iter()
            .filter(|(department, _)| *department == department_id)
            .filter_map(|(_, doctor_id)| state.doctors.get(doctor_id))
            .filter(|doctor| doctor.is_active)
            .map(|doctor| DoctorLoad {
                doctor_id: doctor.id,
                name: doctor.name.clone(),
                current_patients: state.active_count(doctor.id, date),
            })
            .collect();

        loads.sort_by_key(|load| (load.current_patients, load.doctor_id));
        Ok(loads)
    }

    async fn find_department_doctor(&self, department_id: i64, doctor_id: i64) -> Result<Option<Doctor>> {
        let state = self.state();
        if !state.memberships.contains(&(department_id, doctor_id)) {
            return Ok(None);
        }
        Ok(state.doctors.get(&doctor_id).cloned())
    }

    async fn count_active_appointments(&self, doctor_id: i64, date: NaiveDate) -> Result<i64> {
        Ok(self.state().active_count(doctor_id, date))
    }

    async fn max_queue_number(&self, doctor_id: i64, date: NaiveDate) -> Result<Option<i32>> {
        let max = self.state().max_queue(doctor_id, date);
        // Let concurrent bookings interleave here the way they would across
        // a network round trip.
        tokio::task::yield_now().await;
        Ok(max)
    }

    async fn insert_appointment(&self, record: &NewAppointment, max_patients: i64) -> Result<InsertOutcome> {
        let mut state = self.state();
        let doctor_id = record.doctor_id;
        let date = record.appointment_date;

        if record.queue_number != state.max_queue(doctor_id, date).unwrap_or(0) + 1 {
            return Ok(InsertOutcome::QueueNumberTaken);
        }
        if state.active_count(doctor_id, date) >= max_patients {
            return Ok(InsertOutcome::CapacityReached);
        }

        Ok(InsertOutcome::Inserted(state.push(record)))
    }

    async fn booked_times(&self, doctor_id: i64, date: NaiveDate) -> Result<Vec<NaiveTime>> {
        let state = self.state();
        let mut times: Vec<NaiveTime> = state
            .day(doctor_id, date)
            .filter(|a| a.status.occupies_listing_slot())
            .map(|a| a.appointment_time)
            .collect();
        times.sort();
        Ok(times)
    }
}
