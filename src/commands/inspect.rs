use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tour_core::invite::read_invite;

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Could not read {}", file.display()))?;
    let invite = read_invite(&content)?;

    println!("{}", invite.summary.bold());
    println!("  UID:       {}", invite.uid);
    println!("  Start:     {}", invite.start.format("%Y-%m-%d %H:%M UTC"));
    println!("  End:       {}", invite.end.format("%Y-%m-%d %H:%M UTC"));
    println!(
        "  Length:    {} minutes",
        (invite.end - invite.start).num_minutes()
    );
    println!("  Location:  {}", invite.location);
    if let Some(created) = invite.created_at {
        println!("  Created:   {}", created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if !invite.description.is_empty() {
        println!();
        for line in invite.description.lines() {
            println!("  {}", line.dimmed());
        }
    }

    Ok(())
}
