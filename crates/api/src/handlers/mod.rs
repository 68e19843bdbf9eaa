pub mod appointment;
pub mod doctor;
