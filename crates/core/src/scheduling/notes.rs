use std::fmt;

use chrono::NaiveDate;

use super::calendar::{WeekendAdjustment, weekday_name};

/// Provenance written into an appointment's notes field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulingNotes {
    pub queue_number: i32,
    pub weekend: WeekendAdjustment,
    /// Set when the first candidate date was fully booked.
    pub rolled_over: Option<Rollover>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollover {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl fmt::Display for SchedulingNotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Queue number {}", self.queue_number)?;

        if self.weekend.was_adjusted() {
            write!(
                f,
                "; requested {} ({}) moved to {} (weekend adjustment)",
                self.weekend.requested,
                weekday_name(self.weekend.requested),
                self.weekend.date
            )?;
        }

        if let Some(rollover) = &self.rolled_over {
            write!(
                f,
                "; originally requested {}, fully booked on {}, rolled over to {}",
                self.weekend.requested, rollover.from, rollover.to
            )?;
        }

        Ok(())
    }
}
