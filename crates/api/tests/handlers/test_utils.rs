use std::sync::Arc;

use medqueue_api::ApiState;
use medqueue_core::{
    models::{appointment::ScheduleAppointmentRequest, doctor::Doctor},
    scheduler::{Scheduler, SchedulerPolicy},
};
use medqueue_db::mock::{memory::InMemoryStore, repositories::MockSchedulerRepo};

pub const DEPARTMENT: i64 = 1;

pub struct TestContext {
    pub store: Arc<InMemoryStore>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
        }
    }

    /// A context whose department already holds the given doctors.
    pub fn with_doctors(ids: &[i64]) -> Self {
        let ctx = Self::new();
        for id in ids {
            ctx.store.add_doctor(doctor(*id), &[DEPARTMENT]);
        }
        ctx
    }

    // Build state over the in-memory store
    pub fn build_state(&self) -> Arc<ApiState> {
        Arc::new(ApiState {
            scheduler: Scheduler::new(self.store.clone(), SchedulerPolicy::default()),
        })
    }
}

// State over a mock for failure paths the in-memory store cannot produce
pub fn mock_state(repo: MockSchedulerRepo) -> Arc<ApiState> {
    Arc::new(ApiState {
        scheduler: Scheduler::new(Arc::new(repo), SchedulerPolicy::default()),
    })
}

pub fn doctor(id: i64) -> Doctor {
    Doctor {
        id,
        name: format!("Dr. {}", id),
        email: format!("dr{}@hospital.test", id),
        staff_id: format!("DOC-{}", id),
        is_active: true,
    }
}

pub fn request(patient_id: i64, requested_date: &str) -> ScheduleAppointmentRequest {
    ScheduleAppointmentRequest {
        patient_id,
        department_id: DEPARTMENT,
        reason: "Checkup".to_string(),
        requested_date: requested_date.to_string(),
        preferred_doctor_id: None,
    }
}
