//! Pure scheduling rules. Nothing in here touches storage.

pub mod calendar;
pub mod capacity;
pub mod listing;
pub mod notes;
pub mod queue;
