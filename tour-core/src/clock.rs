//! Time source for the booking page.

use chrono::{
    DateTime, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date in the clock's local timezone.
    fn today(&self) -> NaiveDate;

    /// Interpret a wall-clock time in the local timezone.
    ///
    /// Returns `None` for times skipped by a DST transition. Ambiguous times
    /// resolve to the earlier instant.
    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>>;
}

/// The host's clock and timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        earliest_utc(Local.from_local_datetime(&naive))
    }
}

/// A clock frozen at one instant with a fixed UTC offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub now: DateTime<Utc>,
    pub offset: FixedOffset,
}

impl FixedClock {
    pub fn utc(now: DateTime<Utc>) -> Self {
        FixedClock {
            now,
            offset: Utc.fix(),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.with_timezone(&self.offset).date_naive()
    }

    fn resolve_local(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        earliest_utc(self.offset.from_local_datetime(&naive))
    }
}

fn earliest_utc<Tz: TimeZone>(result: LocalResult<DateTime<Tz>>) -> Option<DateTime<Utc>> {
    result.earliest().map(|dt| dt.with_timezone(&Utc))
}
