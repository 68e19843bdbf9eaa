//! # MedQueue Core
//!
//! Domain types and the appointment scheduling engine: shift capacity,
//! doctor selection, weekend and rollover date policy, and queue/time-slot
//! assignment. Persistence is reached only through [`store::SchedulerStore`].

pub mod errors;
pub mod models;
pub mod scheduler;
pub mod scheduling;
pub mod store;
