//! The public "available slots" grid.
//!
//! This is a fixed 30-minute grid from 09:00 to 17:00 and is deliberately
//! separate from the 25-minute shift grid that queue numbers map onto. The
//! two do not line up: a booked 09:15 queue slot never blocks a listing slot.

use chrono::NaiveTime;

use super::capacity::{clock, minutes_since_midnight};

pub const LISTING_SLOT_MINUTES: i64 = 30;
pub const LISTING_DAY_START: NaiveTime = clock(9, 0);
pub const LISTING_DAY_END: NaiveTime = clock(17, 0);

/// Every slot start on the listing grid, 09:00 through 16:30.
pub fn listing_grid() -> Vec<NaiveTime> {
    let start = minutes_since_midnight(LISTING_DAY_START);
    let end = minutes_since_midnight(LISTING_DAY_END);

    (start..end)
        .step_by(LISTING_SLOT_MINUTES as usize)
        .filter_map(|minutes| {
            NaiveTime::from_num_seconds_from_midnight_opt((minutes * 60) as u32, 0)
        })
        .collect()
}

/// Listing slots not taken by any of `booked`.
pub fn open_listing_slots(booked: &[NaiveTime]) -> Vec<NaiveTime> {
    listing_grid()
        .into_iter()
        .filter(|slot| !booked.contains(slot))
        .collect()
}

pub fn format_slot(slot: NaiveTime) -> String {
    slot.format("%H:%M").to_string()
}
