pub mod appointment;
pub mod doctor;
pub mod serde_hhmm;
