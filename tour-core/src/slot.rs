//! Bookable tour times for a calendar date.
//!
//! Each slot carries two forms of the same time: a 12-hour `label` shown to
//! visitors and a 24-hour `value` that ends up in the invite.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use serde::Serialize;
use tracing::debug;

use crate::constants::{CLOSED_LABEL, PLACEHOLDER_LABEL};
use crate::error::{TourError, TourResult};

/// Business-hours slots as (hour, minute), in display order.
const SLOT_TIMES: [(u32, u32); 8] = [
    (10, 0),
    (12, 0),
    (12, 30),
    (14, 0),
    (14, 30),
    (16, 0),
    (16, 30),
    (18, 0),
];

const CLOSED_WEEKDAY: Weekday = Weekday::Sun;

/// A selectable tour time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// 12-hour display form, e.g. "2:00 PM"
    pub label: String,
    /// 24-hour "HH:MM" form, empty for entries that can't be submitted
    pub value: String,
}

impl TimeSlot {
    pub fn from_time(time: NaiveTime) -> Self {
        TimeSlot {
            label: format_label(time),
            value: time.format("%H:%M").to_string(),
        }
    }

    /// The "Select a time" entry heading every option list.
    pub fn placeholder() -> Self {
        TimeSlot {
            label: PLACEHOLDER_LABEL.to_string(),
            value: String::new(),
        }
    }

    /// Sentinel returned for days the business is closed.
    pub fn closed() -> Self {
        TimeSlot {
            label: CLOSED_LABEL.to_string(),
            value: String::new(),
        }
    }

    pub fn is_selectable(&self) -> bool {
        !self.value.is_empty()
    }
}

pub fn is_closed(date: NaiveDate) -> bool {
    date.weekday() == CLOSED_WEEKDAY
}

/// Slots for a date: the closed sentinel on Sundays, the canonical eight otherwise.
///
/// Every call builds a fresh list, so nothing carries over between dates.
pub fn generate_slots(date: NaiveDate) -> Vec<TimeSlot> {
    if is_closed(date) {
        debug!(%date, "closed day, returning sentinel slot");
        return vec![TimeSlot::closed()];
    }

    let slots: Vec<TimeSlot> = canonical_times().map(TimeSlot::from_time).collect();
    debug!(%date, count = slots.len(), "generated slots");
    slots
}

/// The full option list a time picker shows: placeholder first, then the
/// slots for `date` if one is selected.
pub fn slot_options(date: Option<NaiveDate>) -> Vec<TimeSlot> {
    let mut options = vec![TimeSlot::placeholder()];
    if let Some(date) = date {
        options.extend(generate_slots(date));
    }
    options
}

/// Look up the canonical slot with `value` on `date`.
pub fn find_slot(date: NaiveDate, value: &str) -> Option<TimeSlot> {
    generate_slots(date)
        .into_iter()
        .find(|slot| slot.is_selectable() && slot.value == value)
}

/// Parse a slot value. Only zero-padded 24-hour "HH:MM" is accepted.
pub fn parse_slot_value(value: &str) -> TourResult<NaiveTime> {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return Err(TourError::InvalidTime(value.to_string()));
    }
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| TourError::InvalidTime(value.to_string()))
}

/// 12-hour label without a leading zero: "10:00 AM", "2:30 PM".
pub fn format_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Today is never bookable.
pub fn earliest_bookable(today: NaiveDate) -> NaiveDate {
    today + Duration::days(1)
}

fn canonical_times() -> impl Iterator<Item = NaiveTime> {
    SLOT_TIMES
        .iter()
        .filter_map(|&(hour, minute)| NaiveTime::from_hms_opt(hour, minute, 0))
}
