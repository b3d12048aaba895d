//! Reading invites back with the icalendar crate's parser.

use chrono::{DateTime, Utc};
use icalendar::parser::{Component, read_calendar, unfold};
use icalendar::{CalendarDateTime, DatePerhapsTime};

use crate::error::{TourError, TourResult};

/// The fields of a tour invite as a calendar application would see them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteSummary {
    pub product_id: Option<String>,
    pub uid: String,
    pub created_at: Option<DateTime<Utc>>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    pub location: String,
}

/// Parse `.ics` text containing a single timed VEVENT.
pub fn read_invite(content: &str) -> TourResult<InviteSummary> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).map_err(TourError::IcsParse)?;

    let product_id = calendar
        .properties
        .iter()
        .find(|p| p.name == "PRODID")
        .map(|p| p.val.to_string());

    let vevent = calendar
        .components
        .iter()
        .find(|c| c.name == "VEVENT")
        .ok_or_else(|| TourError::IcsParse("no VEVENT in calendar".into()))?;

    let uid = text_prop(vevent, "UID")
        .ok_or_else(|| TourError::IcsParse("VEVENT has no UID".into()))?;

    Ok(InviteSummary {
        product_id,
        uid,
        created_at: utc_prop(vevent, "DTSTAMP").ok(),
        start: utc_prop(vevent, "DTSTART")?,
        end: utc_prop(vevent, "DTEND")?,
        summary: text_prop(vevent, "SUMMARY").unwrap_or_default(),
        description: text_prop(vevent, "DESCRIPTION")
            .map(|d| unescape_description(&d))
            .unwrap_or_default(),
        location: text_prop(vevent, "LOCATION").unwrap_or_default(),
    })
}

fn text_prop(component: &Component<'_>, name: &str) -> Option<String> {
    component.find_prop(name).map(|p| p.val.to_string())
}

fn utc_prop(component: &Component<'_>, name: &str) -> TourResult<DateTime<Utc>> {
    let prop = component
        .find_prop(name)
        .ok_or_else(|| TourError::IcsParse(format!("VEVENT has no {}", name)))?;

    match DatePerhapsTime::try_from(prop) {
        Ok(DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt))) => Ok(dt),
        _ => Err(TourError::IcsParse(format!(
            "{} is not a UTC date-time: {}",
            name,
            prop.val.as_ref()
        ))),
    }
}

fn unescape_description(value: &str) -> String {
    value.replace("\\n", "\n").replace("\\N", "\n")
}
