//! # Appointment Scheduler
//!
//! Turns a booking request into a concrete doctor, date, queue number and
//! time slot, then writes it.
//!
//! ## Flow
//!
//! 1. Parse the requested date and push weekend requests to Monday
//! 2. If a preferred doctor was named and has room on that date, take them
//! 3. Otherwise rank the department's doctors by current load and take the
//!    first with spare capacity, rolling forward one weekday at a time while
//!    everybody is full, up to `SchedulerPolicy::rollover_days` candidate days
//! 4. Claim the next queue number for the chosen doctor and date, derive the
//!    time slot from the shift start and persist. A doctor whose next
//!    position would start after midnight counts as full and placement
//!    moves on to the next doctor or day
//!
//! Step 4 is a read followed by a write. The store rejects the write if
//! another booking got there first, in which case the whole placement is
//! redone.
//!
//! Shift lookups fail open: if the shift cannot be read the doctor is
//! assumed to work the default 08:00–16:00 window. No other storage failure
//! is papered over.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    errors::{SchedulingError, SchedulingResult},
    models::{
        appointment::{
            AppointmentAssignment, AppointmentStatus, NewAppointment, ScheduleAppointmentRequest,
        },
        doctor::{ShiftCapacity, ShiftSource},
    },
    scheduling::{
        calendar::{adjust_for_weekend, next_candidate_date, parse_calendar_date, weekday_name},
        capacity::{capacity_for_shift, default_capacity},
        listing::open_listing_slots,
        notes::{Rollover, SchedulingNotes},
        queue::{next_queue_number, time_slot_for_queue},
    },
    store::{InsertOutcome, SchedulerStore},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerPolicy {
    /// Candidate days tried, counting the first, before giving up.
    pub rollover_days: u32,
    /// Placement attempts allowed when the write loses a race.
    pub queue_retries: u32,
}

impl Default for SchedulerPolicy {
    fn default() -> Self {
        Self {
            rollover_days: 7,
            queue_retries: 16,
        }
    }
}

/// A doctor chosen for a date together with the shift that admitted them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorAssignment {
    pub doctor_id: i64,
    pub doctor_name: String,
    pub current_patients: i64,
    pub capacity: ShiftCapacity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected(DoctorAssignment),
    /// Every doctor in the department is at or over capacity.
    AllFull,
    /// The department has no active doctors at all.
    NoDoctors,
}

#[derive(Debug, Clone)]
struct Placement {
    assignment: DoctorAssignment,
    date: NaiveDate,
}

#[derive(Clone)]
pub struct Scheduler {
    store: Arc<dyn SchedulerStore>,
    policy: SchedulerPolicy,
}

impl Scheduler {
    pub fn new(store: Arc<dyn SchedulerStore>, policy: SchedulerPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> SchedulerPolicy {
        self.policy
    }

    /// The doctor's working window and patient capacity on `date`.
    ///
    /// Never fails: a storage error falls back to the default window.
    pub async fn resolve_shift_capacity(&self, doctor_id: i64, date: NaiveDate) -> ShiftCapacity {
        let weekday = weekday_name(date);

        match self.store.get_shift(doctor_id, weekday).await {
            Ok(shift) => {
                let capacity = capacity_for_shift(shift.as_ref());
                if capacity.source == ShiftSource::Configured && capacity.max_patients == 0 {
                    warn!(
                        doctor_id,
                        %weekday,
                        start = %capacity.start_time,
                        end = %capacity.end_time,
                        "Shift ends before it starts; treating doctor as fully booked"
                    );
                }
                capacity
            }
            Err(err) => {
                warn!(
                    doctor_id,
                    %weekday,
                    error = %err,
                    "Shift lookup failed, using default hours"
                );
                default_capacity(ShiftSource::Fallback)
            }
        }
    }

    /// Least-loaded doctor in the department with room left on `date`.
    ///
    /// Ties on load go to the lowest doctor id.
    pub async fn select_doctor(
        &self,
        department_id: i64,
        date: NaiveDate,
    ) -> SchedulingResult<SelectionOutcome> {
        self.select_doctor_excluding(department_id, date, &HashSet::new())
            .await
    }

    /// Same ranking as `select_doctor`, treating doctor-days in `blocked` as full.
    async fn select_doctor_excluding(
        &self,
        department_id: i64,
        date: NaiveDate,
        blocked: &HashSet<(i64, NaiveDate)>,
    ) -> SchedulingResult<SelectionOutcome> {
        let mut candidates = self.store.list_doctor_loads(department_id, date).await?;

        if candidates.is_empty() {
            return Ok(SelectionOutcome::NoDoctors);
        }

        candidates.sort_by_key(|load| (load.current_patients, load.doctor_id));

        for load in candidates {
            if blocked.contains(&(load.doctor_id, date)) {
                debug!(department_id, doctor_id = load.doctor_id, %date, "Doctor has no queue slots left");
                continue;
            }

            let capacity = self.resolve_shift_capacity(load.doctor_id, date).await;

            if load.current_patients < capacity.max_patients {
                debug!(
                    department_id,
                    doctor_id = load.doctor_id,
                    current = load.current_patients,
                    max = capacity.max_patients,
                    %date,
                    "Doctor has capacity"
                );
                return Ok(SelectionOutcome::Selected(DoctorAssignment {
                    doctor_id: load.doctor_id,
                    doctor_name: load.name,
                    current_patients: load.current_patients,
                    capacity,
                }));
            }

            debug!(
                department_id,
                doctor_id = load.doctor_id,
                current = load.current_patients,
                max = capacity.max_patients,
                %date,
                "Doctor is full"
            );
        }

        Ok(SelectionOutcome::AllFull)
    }

    /// Books the request and returns where it landed.
    pub async fn schedule_appointment(
        &self,
        request: &ScheduleAppointmentRequest,
    ) -> SchedulingResult<AppointmentAssignment> {
        let requested = parse_calendar_date(&request.requested_date)?;
        let weekend = adjust_for_weekend(requested)?;

        if weekend.was_adjusted() {
            info!(
                patient_id = request.patient_id,
                requested = %weekend.requested,
                adjusted = %weekend.date,
                "Weekend request moved to Monday"
            );
        }

        let attempts = self.policy.queue_retries.max(1);
        // Doctor-days whose next queue position would start after midnight.
        let mut blocked = HashSet::new();
        let mut attempt = 0;

        while attempt < attempts {
            let placement = self.place(request, weekend.date, &blocked).await?;
            let doctor_id = placement.assignment.doctor_id;
            let date = placement.date;

            let current_max = self.store.max_queue_number(doctor_id, date).await?;
            let queue_number = next_queue_number(current_max);
            let appointment_time =
                match time_slot_for_queue(placement.assignment.capacity.start_time, queue_number) {
                    Ok(time) => time,
                    Err(SchedulingError::SlotOverflow { .. }) => {
                        warn!(doctor_id, %date, queue_number, "Queue runs past midnight, treating doctor as full");
                        blocked.insert((doctor_id, date));
                        continue;
                    }
                    Err(err) => return Err(err),
                };
            attempt += 1;

            let rolled_over = (date != weekend.date).then_some(Rollover {
                from: weekend.date,
                to: date,
            });
            let notes = SchedulingNotes {
                queue_number,
                weekend,
                rolled_over,
            };

            let record = NewAppointment {
                patient_id: request.patient_id,
                doctor_id,
                appointment_date: date,
                appointment_time,
                status: AppointmentStatus::Scheduled,
                reason: request.reason.clone(),
                notes: notes.to_string(),
                queue_number,
            };

            let outcome = self
                .store
                .insert_appointment(&record, placement.assignment.capacity.max_patients)
                .await?;

            match outcome {
                InsertOutcome::Inserted(appointment) => {
                    info!(
                        appointment_id = appointment.id,
                        patient_id = appointment.patient_id,
                        doctor_id,
                        %date,
                        time = %appointment.appointment_time,
                        queue_number = appointment.queue_number,
                        "Appointment scheduled"
                    );

                    return Ok(AppointmentAssignment {
                        appointment_id: appointment.id,
                        doctor_id,
                        doctor_name: placement.assignment.doctor_name,
                        appointment_date: appointment.appointment_date,
                        appointment_time: appointment.appointment_time,
                        queue_number: appointment.queue_number,
                        notes: appointment.notes,
                        weekend_adjusted: weekend.was_adjusted(),
                        rolled_over: rolled_over.is_some(),
                    });
                }
                InsertOutcome::QueueNumberTaken => {
                    warn!(doctor_id, %date, queue_number, attempt, "Queue number already taken, retrying");
                }
                InsertOutcome::CapacityReached => {
                    warn!(doctor_id, %date, attempt, "Doctor filled up before insert, retrying");
                }
            }
        }

        Err(SchedulingError::QueueContention { attempts })
    }

    /// Open slots on the fixed 09:00–17:00 half-hour listing grid.
    pub async fn list_available_slots(
        &self,
        doctor_id: i64,
        date: NaiveDate,
    ) -> SchedulingResult<Vec<chrono::NaiveTime>> {
        let booked = self.store.booked_times(doctor_id, date).await?;
        Ok(open_listing_slots(&booked))
    }

    async fn place(
        &self,
        request: &ScheduleAppointmentRequest,
        start: NaiveDate,
        blocked: &HashSet<(i64, NaiveDate)>,
    ) -> SchedulingResult<Placement> {
        if let Some(preferred) = request
            .preferred_doctor_id
            .filter(|id| !blocked.contains(&(*id, start)))
        {
            if let Some(assignment) = self
                .check_preferred_doctor(request.department_id, preferred, start)
                .await?
            {
                return Ok(Placement {
                    assignment,
                    date: start,
                });
            }
        }

        let department_id = request.department_id;
        let mut date = start;
        let mut last_tried = start;

        for day in 0..self.policy.rollover_days.max(1) {
            if day > 0 {
                date = next_candidate_date(last_tried)?;
            }

            match self.select_doctor_excluding(department_id, date, blocked).await? {
                SelectionOutcome::Selected(assignment) => {
                    if date != start {
                        info!(department_id, from = %start, to = %date, "Booking rolled over");
                    }
                    return Ok(Placement { assignment, date });
                }
                SelectionOutcome::NoDoctors => {
                    return Err(SchedulingError::NoDoctorsInDepartment(department_id));
                }
                SelectionOutcome::AllFull => {
                    debug!(department_id, %date, "All doctors full");
                    last_tried = date;
                }
            }
        }

        warn!(department_id, from = %start, to = %last_tried, "Department fully booked");
        Err(SchedulingError::SchedulingExhausted {
            department_id,
            from: start,
            to: last_tried,
        })
    }

    async fn check_preferred_doctor(
        &self,
        department_id: i64,
        doctor_id: i64,
        date: NaiveDate,
    ) -> SchedulingResult<Option<DoctorAssignment>> {
        let doctor = match self.store.find_department_doctor(department_id, doctor_id).await? {
            Some(doctor) if doctor.is_active => doctor,
            _ => {
                warn!(department_id, doctor_id, "Preferred doctor unavailable in department");
                return Ok(None);
            }
        };

        let capacity = self.resolve_shift_capacity(doctor.id, date).await;
        let current_patients = self.store.count_active_appointments(doctor.id, date).await?;

        if current_patients >= capacity.max_patients {
            debug!(doctor_id, %date, current_patients, "Preferred doctor is full");
            return Ok(None);
        }

        Ok(Some(DoctorAssignment {
            doctor_id: doctor.id,
            doctor_name: doctor.name,
            current_patients,
            capacity,
        }))
    }
}
