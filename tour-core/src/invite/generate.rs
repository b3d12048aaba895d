//! ICS text generation.
//!
//! Lines are written by hand in a fixed order. No folding, and no escaping
//! besides newlines in DESCRIPTION.

use chrono::{DateTime, Utc};

use super::{CalendarInvite, InviteDraft};
use crate::constants::PRODUCT_ID;
use crate::error::TourResult;

const LINE_BREAK: &str = "\r\n";

impl CalendarInvite {
    /// Serialize to `.ics` text, CRLF separated, no trailing line break.
    pub fn to_ics(&self) -> String {
        let lines = [
            "BEGIN:VCALENDAR".to_string(),
            "VERSION:2.0".to_string(),
            format!("PRODID:{}", PRODUCT_ID),
            "BEGIN:VEVENT".to_string(),
            format!("UID:{}", self.uid),
            format!("DTSTAMP:{}", to_ics_timestamp(self.created_at)),
            format!("DTSTART:{}", to_ics_timestamp(self.start)),
            format!("DTEND:{}", to_ics_timestamp(self.end)),
            format!("SUMMARY:{}", self.summary),
            format!("DESCRIPTION:{}", escape_description(&self.description)),
            format!("LOCATION:{}", self.location),
            "END:VEVENT".to_string(),
            "END:VCALENDAR".to_string(),
        ];

        lines.join(LINE_BREAK)
    }
}

/// Build an invite and return its text.
pub fn synthesize(draft: InviteDraft, created_at: DateTime<Utc>) -> TourResult<String> {
    Ok(CalendarInvite::new(draft, created_at)?.to_ics())
}

/// Compact UTC form: `YYYYMMDDTHHMMSSZ`, fractional seconds dropped.
pub fn to_ics_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Replace line breaks with the two characters `\n`.
pub fn escape_description(description: &str) -> String {
    description
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "\\n")
}
