//! Calendar invites for booked tours.
//!
//! An invite is built from an `InviteDraft`, serialized to `.ics` text and
//! handed off as an `InviteFile`. Nothing is kept once it is delivered.

mod generate;
mod parse;

pub use generate::{escape_description, synthesize, to_ics_timestamp};
pub use parse::{InviteSummary, read_invite};

use chrono::{DateTime, Duration, Utc};

use crate::constants::{
    DEFAULT_DURATION_MINUTES, INVITE_FILENAME, INVITE_MIME, UID_PREFIX, UID_SUFFIX,
};
use crate::error::{TourError, TourResult};

/// Inputs for a single invite.
#[derive(Debug, Clone)]
pub struct InviteDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    /// `None` means the default tour length of 45 minutes
    pub duration_minutes: Option<u32>,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarInvite {
    pub uid: String,
    pub created_at: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub description: String,
    pub location: String,
}

impl CalendarInvite {
    pub fn new(draft: InviteDraft, created_at: DateTime<Utc>) -> TourResult<Self> {
        if draft.title.trim().is_empty() {
            return Err(TourError::InvalidInvite("title is required".into()));
        }
        if draft.location.trim().is_empty() {
            return Err(TourError::InvalidInvite("location is required".into()));
        }
        if draft.title.contains(['\r', '\n']) || draft.location.contains(['\r', '\n']) {
            return Err(TourError::InvalidInvite(
                "title and location must be a single line".into(),
            ));
        }

        let minutes = draft.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);
        if minutes == 0 {
            return Err(TourError::InvalidInvite(
                "duration must be a positive number of minutes".into(),
            ));
        }

        Ok(CalendarInvite {
            uid: format!("{}{}{}", UID_PREFIX, created_at.timestamp_millis(), UID_SUFFIX),
            created_at,
            start: draft.start,
            end: draft.start + Duration::minutes(i64::from(minutes)),
            summary: draft.title,
            description: draft.description,
            location: draft.location,
        })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// A file download request: the invite text plus how to offer it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteFile {
    pub filename: String,
    pub mime: String,
    pub contents: String,
}

impl InviteFile {
    pub fn new(filename: impl Into<String>, contents: String) -> Self {
        InviteFile {
            filename: filename.into(),
            mime: INVITE_MIME.to_string(),
            contents,
        }
    }

    pub fn for_invite(invite: &CalendarInvite) -> Self {
        Self::new(INVITE_FILENAME, invite.to_ics())
    }
}
