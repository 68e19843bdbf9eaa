use chrono::NaiveTime;

use super::capacity::{MINUTES_PER_DAY, SLOT_MINUTES, minutes_since_midnight};
use crate::errors::{SchedulingError, SchedulingResult};

/// Next position in a doctor's day given the highest number already handed out.
pub fn next_queue_number(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0).max(0) + 1
}

/// Start time for a queue position: `shift_start + (queue_number - 1) * 25min`.
///
/// Positions that would start at or after midnight are rejected rather than
/// wrapped onto the next morning.
pub fn time_slot_for_queue(shift_start: NaiveTime, queue_number: i32) -> SchedulingResult<NaiveTime> {
    let offset = i64::from(queue_number.max(1) - 1) * SLOT_MINUTES;
    let minutes = minutes_since_midnight(shift_start) + offset;

    if minutes >= MINUTES_PER_DAY {
        return Err(SchedulingError::SlotOverflow { queue_number });
    }

    u32::try_from(minutes * 60)
        .ok()
        .and_then(|seconds| NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0))
        .ok_or(SchedulingError::SlotOverflow { queue_number })
}
