//! Core logic for the Yordi Home Care tour booking page.
//!
//! This crate holds everything the booking page does besides drawing itself:
//! - `slot` turns a calendar date into the list of bookable tour times
//! - `booking` parses raw form fields into a typed `BookingRequest`
//! - `invite` builds the `.ics` calendar invite handed to the visitor
//! - `page` wires those together behind date-changed and form-submitted handlers
//!
//! The rendering surface (form widgets, notices, file download) is injected
//! through the `page::Surface` trait.

pub mod booking;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod invite;
pub mod page;
pub mod slot;

pub use booking::{BookingRequest, FormFields};
pub use error::{TourError, TourResult};
pub use invite::{CalendarInvite, InviteDraft, InviteFile};
pub use slot::TimeSlot;
