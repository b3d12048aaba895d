//! The tour booking page: event handlers over an injected rendering surface.
//!
//! The page reacts to two events. A date change regenerates the time options;
//! a form submit walks Idle -> Validating -> Building -> Delivering -> Idle.
//! Handlers never panic and never leave the page outside `Phase::Idle`.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::booking::{BookingRequest, FormFields, parse_date};
use crate::clock::Clock;
use crate::config::TourConfig;
use crate::error::{TourError, TourResult};
use crate::invite::{CalendarInvite, InviteDraft, InviteFile};
use crate::slot::{self, TimeSlot};

/// Whatever draws the page and talks to the visitor.
pub trait Surface {
    /// Blocking notice; the visitor has to acknowledge it.
    fn alert(&mut self, message: &str);

    fn show_status(&mut self, message: &str);

    /// Replace the time picker's options.
    fn render_time_options(&mut self, options: &[TimeSlot]);

    /// Offer the invite as a file. Must not alter `file.contents`.
    fn deliver(&mut self, file: &InviteFile) -> TourResult<()>;

    /// Clear every form field.
    fn reset_form(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Validating,
    Building,
    Delivering,
}

#[derive(Debug, Clone)]
pub enum PageEvent {
    DateChanged(String),
    FormSubmitted(FormFields),
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// The invite was handed to the surface and the confirmation shown.
    Delivered {
        invite: CalendarInvite,
        message: String,
    },
    /// Validation failed; nothing was built and the form is untouched.
    Rejected(TourError),
    /// Building or delivering the invite failed.
    Failed(TourError),
}

impl SubmitOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, SubmitOutcome::Delivered { .. })
    }
}

pub struct BookingPage<S: Surface, C: Clock> {
    surface: S,
    clock: C,
    config: TourConfig,
    earliest_date: NaiveDate,
    time_options: Vec<TimeSlot>,
    phase: Phase,
}

impl<S: Surface, C: Clock> BookingPage<S, C> {
    /// Set up the page. The earliest bookable date is fixed here, from the
    /// clock's current date.
    pub fn new(surface: S, clock: C, config: TourConfig) -> Self {
        let earliest_date = slot::earliest_bookable(clock.today());
        let mut page = BookingPage {
            surface,
            clock,
            config,
            earliest_date,
            time_options: Vec::new(),
            phase: Phase::Idle,
        };
        page.replace_options(None);
        page
    }

    pub fn earliest_date(&self) -> NaiveDate {
        self.earliest_date
    }

    pub fn time_options(&self) -> &[TimeSlot] {
        &self.time_options
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Route an event to its handler. Only submits produce an outcome.
    pub fn dispatch(&mut self, event: PageEvent) -> Option<SubmitOutcome> {
        match event {
            PageEvent::DateChanged(value) => {
                // Failures are already reported through the surface
                if let Err(e) = self.on_date_changed(&value) {
                    debug!(error = %e, "date change rejected");
                }
                None
            }
            PageEvent::FormSubmitted(fields) => Some(self.on_submit(&fields)),
        }
    }

    /// Rebuild the time options for a newly picked date.
    ///
    /// An empty value leaves only the placeholder. Invalid or too-early dates
    /// do the same and raise a notice.
    pub fn on_date_changed(&mut self, value: &str) -> TourResult<()> {
        if value.trim().is_empty() {
            self.replace_options(None);
            return Ok(());
        }

        match self.selectable_date(value) {
            Ok(date) => {
                self.replace_options(Some(date));
                Ok(())
            }
            Err(e) => {
                warn!(value, error = %e, "date rejected");
                self.replace_options(None);
                self.surface.alert(&e.user_message());
                Err(e)
            }
        }
    }

    pub fn on_submit(&mut self, fields: &FormFields) -> SubmitOutcome {
        self.enter(Phase::Validating);
        let mut request = match BookingRequest::parse(fields, self.earliest_date) {
            Ok(request) => request,
            Err(e) => return self.reject(e),
        };

        // The confirmation echoes what the picker showed
        if let Some(selected) = self
            .time_options
            .iter()
            .find(|o| o.is_selectable() && o.value == request.slot.value)
        {
            request.slot.label = selected.label.clone();
        }

        self.enter(Phase::Building);
        let invite = match self.build_invite(&request) {
            Ok(invite) => invite,
            Err(e @ TourError::InvalidDateTime(_)) => return self.reject(e),
            Err(e) => return self.fail(e),
        };

        self.enter(Phase::Delivering);
        let file = InviteFile::new(self.config.filename.clone(), invite.to_ics());
        if let Err(e) = self.surface.deliver(&file) {
            return self.fail(e);
        }

        let message = request.confirmation_message();
        self.surface.show_status(&message);
        self.surface.reset_form();
        self.replace_options(None);

        info!(uid = %invite.uid, date = %request.date, time = %request.slot.value, "tour invite delivered");
        self.enter(Phase::Idle);

        SubmitOutcome::Delivered { invite, message }
    }

    fn selectable_date(&self, value: &str) -> TourResult<NaiveDate> {
        let date = parse_date(value)?;
        if date < self.earliest_date {
            return Err(TourError::DateTooEarly {
                date,
                earliest: self.earliest_date,
            });
        }
        Ok(date)
    }

    fn build_invite(&self, request: &BookingRequest) -> TourResult<CalendarInvite> {
        let start_naive = request.start_naive()?;
        let start = self
            .clock
            .resolve_local(start_naive)
            .ok_or_else(|| TourError::InvalidDateTime(start_naive.to_string()))?;

        let draft = InviteDraft {
            title: self.config.summary.clone(),
            description: request.description(),
            start,
            duration_minutes: Some(self.config.duration_minutes),
            location: self.config.location.clone(),
        };

        CalendarInvite::new(draft, self.clock.now())
    }

    /// Swap in a fresh option list; the old one is dropped, never merged.
    fn replace_options(&mut self, date: Option<NaiveDate>) {
        self.time_options = slot::slot_options(date);
        self.surface.render_time_options(&self.time_options);
    }

    fn reject(&mut self, error: TourError) -> SubmitOutcome {
        warn!(error = %error, "submission rejected");
        self.surface.alert(&error.user_message());
        self.enter(Phase::Idle);
        SubmitOutcome::Rejected(error)
    }

    fn fail(&mut self, error: TourError) -> SubmitOutcome {
        warn!(error = %error, phase = ?self.phase, "submission failed");
        self.surface.alert(&error.user_message());
        self.enter(Phase::Idle);
        SubmitOutcome::Failed(error)
    }

    fn enter(&mut self, phase: Phase) {
        debug!(from = ?self.phase, to = ?phase, "phase");
        self.phase = phase;
    }
}
