//! Booking requests parsed from the tour form.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::constants::{DEFAULT_CONTACT, DEFAULT_PARTY_SIZE};
use crate::error::{TourError, TourResult};
use crate::slot::{self, TimeSlot};

/// Raw form fields as the page hands them over. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormFields {
    pub date: Option<String>,
    pub time: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "for")]
    pub for_whom: Option<String>,
    pub party: Option<String>,
    pub contact: Option<String>,
    pub notes: Option<String>,
}

/// A validated tour request.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub slot: TimeSlot,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub for_whom: String,
    pub party: String,
    pub contact: String,
    pub notes: String,
}

impl BookingRequest {
    /// Validate raw fields into a request.
    ///
    /// `earliest` is the first date the page offers; anything before it is refused.
    pub fn parse(fields: &FormFields, earliest: NaiveDate) -> TourResult<Self> {
        let (Some(date_str), Some(time_str)) = (present(&fields.date), present(&fields.time))
        else {
            return Err(TourError::MissingSelection);
        };

        let date = parse_date(date_str)?;
        if date < earliest {
            return Err(TourError::DateTooEarly { date, earliest });
        }
        if slot::is_closed(date) {
            return Err(TourError::ClosedDay(date));
        }

        slot::parse_slot_value(time_str)?;
        let slot = slot::find_slot(date, time_str)
            .ok_or_else(|| TourError::InvalidTime(time_str.to_string()))?;

        Ok(BookingRequest {
            date,
            slot,
            name: text(&fields.name),
            email: text(&fields.email),
            phone: text(&fields.phone),
            for_whom: text(&fields.for_whom),
            party: text(&fields.party),
            contact: text(&fields.contact),
            notes: text(&fields.notes),
        })
    }

    /// Tour start as a local wall-clock time: `date` + `value` + ":00".
    pub fn start_naive(&self) -> TourResult<NaiveDateTime> {
        let time = slot::parse_slot_value(&self.slot.value)?;
        Ok(self.date.and_time(time))
    }

    /// Invite description, one field per line.
    pub fn description(&self) -> String {
        let notes = if self.notes.is_empty() {
            String::new()
        } else {
            format!("Notes: {}", self.notes)
        };

        [
            format!("Name: {}", self.name),
            format!("Email: {}", self.email),
            format!("Phone: {}", self.phone),
            format!("For: {}", self.for_whom),
            format!("Party size: {}", self.party),
            format!("Contact preference: {}", or_default(&self.contact, DEFAULT_CONTACT)),
            String::new(),
            notes,
        ]
        .join("\n")
        .trim()
        .to_string()
    }

    /// Confirmation text shown on the page after the invite is delivered.
    pub fn confirmation_message(&self) -> String {
        format!(
            "Tour request submitted.\n\n\
             Date: {}\n\
             Time: {}\n\
             Name: {}\n\
             Email: {}\n\
             Phone: {}\n\
             Party size: {}\n\
             Preference: {}\n\n\
             We will confirm shortly.",
            self.date.format("%Y-%m-%d"),
            self.slot.label,
            self.name,
            self.email,
            self.phone,
            or_default(&self.party, DEFAULT_PARTY_SIZE),
            or_default(&self.contact, DEFAULT_CONTACT),
        )
    }
}

/// Strict ISO calendar date. Out-of-range days such as February 30 are rejected.
pub fn parse_date(s: &str) -> TourResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| TourError::InvalidDate(s.to_string()))
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn text(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}

fn or_default<'a>(value: &'a str, default: &'a str) -> &'a str {
    if value.is_empty() { default } else { value }
}
