//! Shift windows and the patient capacity derived from them.

use chrono::{NaiveTime, Timelike};

use crate::models::doctor::{DoctorShift, ShiftCapacity, ShiftSource};

/// Length of one consultation on the scheduling grid.
pub const SLOT_MINUTES: i64 = 25;

pub const MINUTES_PER_DAY: i64 = 24 * 60;

pub const DEFAULT_SHIFT_START: NaiveTime = clock(8, 0);
pub const DEFAULT_SHIFT_END: NaiveTime = clock(16, 0);

/// Builds the time constants above. Only called in const position, so an
/// invalid time is a compile error rather than a runtime panic.
pub(crate) const fn clock(hour: u32, minute: u32) -> NaiveTime {
    match NaiveTime::from_hms_opt(hour, minute, 0) {
        Some(time) => time,
        None => panic!("invalid clock time"),
    }
}

pub fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight() / 60)
}

pub fn default_capacity(source: ShiftSource) -> ShiftCapacity {
    ShiftCapacity {
        max_patients: patients_in_window(DEFAULT_SHIFT_START, DEFAULT_SHIFT_END),
        start_time: DEFAULT_SHIFT_START,
        end_time: DEFAULT_SHIFT_END,
        source,
    }
}

/// Capacity for a configured window. An end at or before the start yields
/// zero, so a misconfigured shift reads as fully booked.
pub fn capacity_for_window(start_time: NaiveTime, end_time: NaiveTime) -> ShiftCapacity {
    ShiftCapacity {
        start_time,
        end_time,
        max_patients: patients_in_window(start_time, end_time),
        source: ShiftSource::Configured,
    }
}

/// Capacity for the shift row found for a doctor's weekday, if any.
/// A missing or unavailable row means the default window applies.
pub fn capacity_for_shift(shift: Option<&DoctorShift>) -> ShiftCapacity {
    match shift {
        Some(shift) if shift.is_available => capacity_for_window(shift.start_time, shift.end_time),
        _ => default_capacity(ShiftSource::Default),
    }
}

fn patients_in_window(start_time: NaiveTime, end_time: NaiveTime) -> i64 {
    let duration = minutes_since_midnight(end_time) - minutes_since_midnight(start_time);
    if duration <= 0 {
        return 0;
    }
    duration / SLOT_MINUTES
}
