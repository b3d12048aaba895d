//! Error types for the tour booking core.

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::MISSING_SELECTION_NOTICE;

/// Errors that can occur while scheduling a tour or building its invite.
#[derive(Error, Debug)]
pub enum TourError {
    #[error("Date and time are both required")]
    MissingSelection,

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {date} is too early, the first bookable date is {earliest}")]
    DateTooEarly { date: NaiveDate, earliest: NaiveDate },

    #[error("Closed on {0} (Sunday)")]
    ClosedDay(NaiveDate),

    #[error("'{0}' is not an available tour time")]
    InvalidTime(String),

    #[error("Local time {0} does not exist in this timezone")]
    InvalidDateTime(String),

    #[error("Invalid invite: {0}")]
    InvalidInvite(String),

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TourError {
    /// Text for the blocking notice shown to the visitor.
    pub fn user_message(&self) -> String {
        match self {
            TourError::MissingSelection => MISSING_SELECTION_NOTICE.to_string(),
            TourError::InvalidDate(_) => "Please choose a valid date.".to_string(),
            TourError::DateTooEarly { earliest, .. } => {
                format!("Tours can be booked from {} onwards.", earliest)
            }
            TourError::ClosedDay(_) => {
                "We are closed on Sundays. Please pick another date.".to_string()
            }
            TourError::InvalidTime(_) => "Please choose one of the listed times.".to_string(),
            other => format!("Something went wrong: {}", other),
        }
    }
}

/// Result type alias for tour booking operations.
pub type TourResult<T> = Result<T, TourError>;
