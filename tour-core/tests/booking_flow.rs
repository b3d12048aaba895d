use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tour_core::clock::{Clock, FixedClock};
use tour_core::config::TourConfig;
use tour_core::invite::{InviteFile, read_invite};
use tour_core::page::{BookingPage, PageEvent, Phase, SubmitOutcome, Surface};
use tour_core::{FormFields, TimeSlot, TourError, TourResult};

#[derive(Default)]
struct RecordingSurface {
    alerts: Vec<String>,
    statuses: Vec<String>,
    renders: Vec<Vec<TimeSlot>>,
    deliveries: Vec<InviteFile>,
    resets: usize,
    fail_delivery: bool,
}

impl Surface for RecordingSurface {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn show_status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn render_time_options(&mut self, options: &[TimeSlot]) {
        self.renders.push(options.to_vec());
    }

    fn deliver(&mut self, file: &InviteFile) -> TourResult<()> {
        if self.fail_delivery {
            return Err(TourError::Delivery("disk full".into()));
        }
        self.deliveries.push(file.clone());
        Ok(())
    }

    fn reset_form(&mut self) {
        self.resets += 1;
    }
}

/// Every wall-clock time falls into a DST gap.
struct GapClock(DateTime<Utc>);

impl Clock for GapClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }

    fn today(&self) -> NaiveDate {
        self.0.date_naive()
    }

    fn resolve_local(&self, _naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        None
    }
}

fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

fn utc_page() -> BookingPage<RecordingSurface, FixedClock> {
    BookingPage::new(
        RecordingSurface::default(),
        FixedClock::utc(monday_morning()),
        TourConfig::default(),
    )
}

fn form(date: &str, time: &str) -> FormFields {
    FormFields {
        date: Some(date.to_string()),
        time: Some(time.to_string()),
        name: Some("Grace Hopper".to_string()),
        email: Some("grace@example.com".to_string()),
        phone: Some("555-0199".to_string()),
        for_whom: Some("Myself".to_string()),
        party: Some("2".to_string()),
        contact: Some("email".to_string()),
        notes: Some("Ground floor\nif possible".to_string()),
    }
}

fn ics_field<'a>(ics: &'a str, name: &str) -> &'a str {
    ics.split("\r\n")
        .find_map(|line| line.strip_prefix(name).and_then(|rest| rest.strip_prefix(':')))
        .unwrap_or_else(|| panic!("no {} line in:\n{}", name, ics))
}

fn decode(stamp: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(stamp, "%Y%m%dT%H%M%SZ")
        .unwrap()
        .and_utc()
}

#[test]
fn new_page_offers_placeholder_and_tomorrow_as_earliest() {
    let page = utc_page();

    assert_eq!(page.phase(), Phase::Idle);
    assert_eq!(page.earliest_date(), NaiveDate::from_ymd_opt(2025, 3, 11).unwrap());
    assert_eq!(page.time_options(), &[TimeSlot::placeholder()]);
    assert_eq!(page.surface().renders.len(), 1);
}

#[test]
fn tuesday_two_pm_books_and_delivers_invite() {
    let mut page = utc_page();

    page.on_date_changed("2025-03-18").unwrap();
    let offered = page.time_options();
    assert_eq!(offered.len(), 9);
    assert!(offered.iter().any(|s| s.label == "2:00 PM" && s.value == "14:00"));

    let outcome = page.on_submit(&form("2025-03-18", "14:00"));
    let (invite, message) = match outcome {
        SubmitOutcome::Delivered { invite, message } => (invite, message),
        other => panic!("expected delivery, got {:?}", other),
    };

    assert!(message.contains("Time: 2:00 PM"));
    assert!(message.contains("Date: 2025-03-18"));

    let surface = page.surface();
    assert!(surface.alerts.is_empty());
    assert_eq!(surface.statuses, vec![message.clone()]);
    assert_eq!(surface.resets, 1);
    assert_eq!(surface.deliveries.len(), 1);

    let file = &surface.deliveries[0];
    assert_eq!(file.filename, "Yordi-Home-Care-Tour.ics");
    assert_eq!(file.mime, "text/calendar");
    assert_eq!(file.contents, invite.to_ics());

    let ics = &file.contents;
    assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-/Yordi/Tour Scheduler/EN\r\n"));
    assert_eq!(ics_field(ics, "DTSTART"), "20250318T140000Z");
    assert_eq!(ics_field(ics, "DTEND"), "20250318T144500Z");
    assert_eq!(ics_field(ics, "DTSTAMP"), "20250310T090000Z");
    assert_eq!(ics_field(ics, "UID"), format!("tour-{}@yordi", monday_morning().timestamp_millis()));
    assert_eq!(ics_field(ics, "SUMMARY"), "Yordi Home Care — Tour");
    assert_eq!(ics_field(ics, "LOCATION"), "1234 Willow Lane, Oakland, CA 94605");
    assert!(ics_field(ics, "DESCRIPTION").ends_with("Notes: Ground floor\\nif possible"));

    // Back to the initial empty state
    assert_eq!(page.phase(), Phase::Idle);
    assert_eq!(page.time_options(), &[TimeSlot::placeholder()]);
}

#[test]
fn every_open_slot_round_trips_to_utc_start() {
    for slot in tour_core::slot::generate_slots(NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()) {
        let mut page = utc_page();
        page.on_date_changed("2025-03-20").unwrap();
        let outcome = page.on_submit(&form("2025-03-20", &slot.value));
        assert!(outcome.is_delivered(), "{}", slot.value);

        let ics = &page.surface().deliveries[0].contents;
        let expected = NaiveDateTime::parse_from_str(
            &format!("2025-03-20T{}:00", slot.value),
            "%Y-%m-%dT%H:%M:%S",
        )
        .unwrap()
        .and_utc();

        let start = decode(ics_field(ics, "DTSTART"));
        let end = decode(ics_field(ics, "DTEND"));
        assert_eq!(start, expected);
        assert_eq!(end - start, Duration::minutes(45));
    }
}

#[test]
fn local_offset_is_converted_to_utc() {
    let clock = FixedClock {
        now: monday_morning(),
        offset: FixedOffset::west_opt(7 * 3600).unwrap(),
    };
    let mut page = BookingPage::new(RecordingSurface::default(), clock, TourConfig::default());

    let outcome = page.on_submit(&form("2025-03-18", "18:00"));
    assert!(outcome.is_delivered());

    let ics = &page.surface().deliveries[0].contents;
    assert_eq!(ics_field(ics, "DTSTART"), "20250319T010000Z");
    assert_eq!(ics_field(ics, "DTEND"), "20250319T014500Z");
}

#[test]
fn sunday_offers_only_closed_sentinel_and_cannot_be_submitted() {
    let mut page = utc_page();

    page.on_date_changed("2025-03-16").unwrap();
    assert_eq!(page.time_options(), &[TimeSlot::placeholder(), TimeSlot::closed()]);

    let sentinel = page.time_options()[1].value.clone();
    let outcome = page.on_submit(&form("2025-03-16", &sentinel));

    assert!(matches!(outcome, SubmitOutcome::Rejected(TourError::MissingSelection)));
    let surface = page.surface();
    assert_eq!(surface.alerts, vec!["Please choose a date and time."]);
    assert!(surface.deliveries.is_empty());
    assert!(surface.statuses.is_empty());
    assert_eq!(surface.resets, 0);
    assert_eq!(page.phase(), Phase::Idle);
}

#[test]
fn empty_submit_is_blocked_without_side_effects() {
    let mut page = utc_page();
    page.on_date_changed("2025-03-18").unwrap();
    let options_before = page.time_options().to_vec();

    let outcome = page.on_submit(&FormFields::default());

    assert!(matches!(outcome, SubmitOutcome::Rejected(TourError::MissingSelection)));
    let surface = page.surface();
    assert_eq!(surface.alerts.len(), 1);
    assert!(surface.deliveries.is_empty());
    assert!(surface.statuses.is_empty());
    assert_eq!(surface.resets, 0);
    assert_eq!(page.time_options(), options_before.as_slice());
}

#[test]
fn switching_dates_replaces_options() {
    let mut page = utc_page();

    page.on_date_changed("2025-03-18").unwrap();
    let tuesday = page.time_options().to_vec();
    page.on_date_changed("2025-03-16").unwrap();
    assert_eq!(page.time_options().len(), 2);
    page.on_date_changed("2025-03-18").unwrap();
    assert_eq!(page.time_options(), tuesday.as_slice());

    page.on_date_changed("").unwrap();
    assert_eq!(page.time_options(), &[TimeSlot::placeholder()]);
    assert!(page.surface().alerts.is_empty());
}

#[test]
fn invalid_and_past_dates_reset_options_and_alert() {
    let mut page = utc_page();
    page.on_date_changed("2025-03-18").unwrap();

    assert!(matches!(
        page.on_date_changed("2025-02-30"),
        Err(TourError::InvalidDate(_))
    ));
    assert_eq!(page.time_options(), &[TimeSlot::placeholder()]);

    // Today is never offered
    assert!(matches!(
        page.on_date_changed("2025-03-10"),
        Err(TourError::DateTooEarly { .. })
    ));
    assert_eq!(page.surface().alerts.len(), 2);

    let outcome = page.on_submit(&form("2025-03-10", "14:00"));
    assert!(matches!(outcome, SubmitOutcome::Rejected(TourError::DateTooEarly { .. })));
}

#[test]
fn delivery_failure_alerts_and_keeps_form() {
    let mut page = utc_page();
    page.surface_mut().fail_delivery = true;

    let outcome = page.on_submit(&form("2025-03-18", "14:00"));

    assert!(matches!(outcome, SubmitOutcome::Failed(TourError::Delivery(_))));
    let surface = page.surface();
    assert_eq!(surface.alerts.len(), 1);
    assert!(surface.statuses.is_empty());
    assert_eq!(surface.resets, 0);
    assert_eq!(page.phase(), Phase::Idle);
}

#[test]
fn submissions_are_independent() {
    let mut page = utc_page();

    assert!(page.on_submit(&form("2025-03-18", "10:00")).is_delivered());
    assert!(page.on_submit(&form("2025-03-19", "16:30")).is_delivered());

    let deliveries = &page.surface().deliveries;
    assert_eq!(deliveries.len(), 2);
    assert_eq!(ics_field(&deliveries[0].contents, "DTSTART"), "20250318T100000Z");
    assert_eq!(ics_field(&deliveries[1].contents, "DTSTART"), "20250319T163000Z");
}

#[test]
fn config_overrides_flow_into_invite() {
    let config = TourConfig {
        summary: "Open House".to_string(),
        location: "500 Main St".to_string(),
        duration_minutes: 30,
        filename: "open-house.ics".to_string(),
        output_dir: None,
    };
    let mut page = BookingPage::new(
        RecordingSurface::default(),
        FixedClock::utc(monday_morning()),
        config,
    );

    assert!(page.on_submit(&form("2025-03-18", "12:30")).is_delivered());

    let file = &page.surface().deliveries[0];
    assert_eq!(file.filename, "open-house.ics");
    let summary = read_invite(&file.contents).unwrap();
    assert_eq!(summary.summary, "Open House");
    assert_eq!(summary.location, "500 Main St");
    assert_eq!(summary.end - summary.start, Duration::minutes(30));
}

#[test]
fn dispatch_routes_events() {
    let mut page = utc_page();

    assert!(page.dispatch(PageEvent::DateChanged("2025-03-18".into())).is_none());
    assert_eq!(page.time_options().len(), 9);

    let outcome = page.dispatch(PageEvent::FormSubmitted(form("2025-03-18", "14:30")));
    assert!(outcome.is_some_and(|o| o.is_delivered()));
}

#[test]
fn dispatching_bad_date_alerts_and_clears_options() {
    let mut page = utc_page();
    page.on_date_changed("2025-03-18").unwrap();

    assert!(page.dispatch(PageEvent::DateChanged("not-a-date".into())).is_none());
    assert_eq!(page.time_options(), &[TimeSlot::placeholder()]);
    assert_eq!(page.surface().alerts.len(), 1);
    assert_eq!(page.phase(), Phase::Idle);
}

#[test]
fn skipped_local_time_is_rejected_without_delivery() {
    let mut page = BookingPage::new(
        RecordingSurface::default(),
        GapClock(monday_morning()),
        TourConfig::default(),
    );
    page.on_date_changed("2025-03-18").unwrap();

    let outcome = page.on_submit(&form("2025-03-18", "14:00"));

    assert!(matches!(outcome, SubmitOutcome::Rejected(TourError::InvalidDateTime(_))));
    let surface = page.surface();
    assert_eq!(surface.alerts.len(), 1);
    assert!(surface.deliveries.is_empty());
    assert!(surface.statuses.is_empty());
    assert_eq!(surface.resets, 0);
    assert_eq!(page.phase(), Phase::Idle);
}
