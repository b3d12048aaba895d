use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;
use tour_core::FormFields;
use tour_core::clock::SystemClock;
use tour_core::page::{BookingPage, PageEvent, SubmitOutcome};

use super::load_config;
use crate::surface::TerminalSurface;

type Page = BookingPage<TerminalSurface, SystemClock>;

#[derive(Args)]
pub struct BookArgs {
    /// Tour date (YYYY-MM-DD)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Tour time as 24-hour HH:MM (see `slots`)
    #[arg(short, long)]
    pub time: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Who the tour is for
    #[arg(long = "for")]
    pub for_whom: Option<String>,

    /// Party size
    #[arg(long)]
    pub party: Option<String>,

    /// Contact preference (email, phone, ...)
    #[arg(long)]
    pub contact: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    /// Directory to save the invite in
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Never prompt; missing fields are submitted empty
    #[arg(long)]
    pub no_input: bool,
}

pub fn run(args: BookArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let out_dir = args
        .out
        .clone()
        .or_else(|| config.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    let mut page = BookingPage::new(TerminalSurface::new(out_dir), SystemClock, config);
    let interactive = !args.no_input && (args.date.is_none() || args.time.is_none());

    // --- Date ---
    let date = match args.date {
        Some(date) => {
            page.dispatch(PageEvent::DateChanged(date.clone()));
            Some(date)
        }
        None if interactive => Some(prompt_date(&mut page)?),
        None => None,
    };

    // --- Time ---
    let time = match args.time {
        Some(time) => Some(time),
        None if interactive && date.is_some() => prompt_time(&page)?,
        None => None,
    };

    // --- Contact details ---
    let name = args.name.map_or_else(|| prompt_text(interactive, "  Name"), |v| Ok(Some(v)))?;
    let email = args.email.map_or_else(|| prompt_text(interactive, "  Email"), |v| Ok(Some(v)))?;
    let phone = args.phone.map_or_else(|| prompt_text(interactive, "  Phone"), |v| Ok(Some(v)))?;

    let fields = FormFields {
        date,
        time,
        name,
        email,
        phone,
        for_whom: args.for_whom,
        party: args.party,
        contact: args.contact,
        notes: args.notes,
    };

    match page.dispatch(PageEvent::FormSubmitted(fields)) {
        Some(SubmitOutcome::Delivered { .. }) => Ok(()),
        Some(SubmitOutcome::Rejected(e)) | Some(SubmitOutcome::Failed(e)) => {
            anyhow::bail!("Tour not booked: {}", e)
        }
        None => anyhow::bail!("Tour not booked"),
    }
}

/// Ask for a date until one with open slots is picked.
fn prompt_date(page: &mut Page) -> Result<String> {
    let earliest = page.earliest_date().to_string();
    loop {
        let input: String = Input::new()
            .with_prompt("  Date (YYYY-MM-DD)")
            .default(earliest.clone())
            .interact_text()?;

        if page.on_date_changed(&input).is_err() {
            continue;
        }

        let closed = page.time_options().iter().skip(1).find(|o| !o.is_selectable());
        match closed {
            Some(sentinel) => eprintln!("  {}", sentinel.label.yellow()),
            None => return Ok(input),
        }
    }
}

/// Pick one of the rendered slots by label; the slot's value is what gets submitted.
fn prompt_time(page: &Page) -> Result<Option<String>> {
    let slots: Vec<_> = page
        .surface()
        .options()
        .iter()
        .filter(|o| o.is_selectable())
        .collect();
    if slots.is_empty() {
        return Ok(None);
    }

    let labels: Vec<&str> = slots.iter().map(|s| s.label.as_str()).collect();
    let selection = Select::new()
        .with_prompt("  Time")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(Some(slots[selection].value.clone()))
}

fn prompt_text(interactive: bool, prompt: &str) -> Result<Option<String>> {
    if !interactive {
        return Ok(None);
    }

    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(if value.is_empty() { None } else { Some(value) })
}
