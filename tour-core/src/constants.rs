//! Fixed business constants for the tour booking page.

/// PRODID written into every invite.
pub const PRODUCT_ID: &str = "-/Yordi/Tour Scheduler/EN";

/// UID = `tour-<epoch millis>@yordi`
pub const UID_PREFIX: &str = "tour-";
pub const UID_SUFFIX: &str = "@yordi";

pub const DEFAULT_SUMMARY: &str = "Yordi Home Care — Tour";
pub const DEFAULT_LOCATION: &str = "1234 Willow Lane, Oakland, CA 94605";
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

pub const INVITE_FILENAME: &str = "Yordi-Home-Care-Tour.ics";
pub const INVITE_MIME: &str = "text/calendar";

pub const PLACEHOLDER_LABEL: &str = "Select a time";
pub const CLOSED_LABEL: &str = "Closed on Sundays — please pick another date";

pub const MISSING_SELECTION_NOTICE: &str = "Please choose a date and time.";

/// Used when the visitor leaves the contact preference blank.
pub const DEFAULT_CONTACT: &str = "email";

/// Party size shown in the confirmation when none was given.
pub const DEFAULT_PARTY_SIZE: &str = "2";
