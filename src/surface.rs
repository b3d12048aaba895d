//! Terminal rendering surface for the booking page.

use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use tour_core::invite::InviteFile;
use tour_core::page::Surface;
use tour_core::{TimeSlot, TourError, TourResult};
use tracing::debug;

pub struct TerminalSurface {
    out_dir: PathBuf,
    options: Vec<TimeSlot>,
}

impl TerminalSurface {
    pub fn new(out_dir: PathBuf) -> Self {
        TerminalSurface {
            out_dir,
            options: Vec::new(),
        }
    }

    /// Options from the most recent render.
    pub fn options(&self) -> &[TimeSlot] {
        &self.options
    }
}

impl Surface for TerminalSurface {
    fn alert(&mut self, message: &str) {
        eprintln!("  {}", message.red().bold());
    }

    fn show_status(&mut self, message: &str) {
        println!();
        for line in message.lines() {
            println!("  {}", line);
        }
    }

    fn render_time_options(&mut self, options: &[TimeSlot]) {
        self.options = options.to_vec();
    }

    fn deliver(&mut self, file: &InviteFile) -> TourResult<()> {
        let path = save_invite(&self.out_dir, file)?;
        println!("{}", format!("  Saved invite: {}", path.display()).green());
        Ok(())
    }

    fn reset_form(&mut self) {
        debug!("form reset");
    }
}

/// Write the invite into `dir` byte for byte.
pub fn save_invite(dir: &Path, file: &InviteFile) -> TourResult<PathBuf> {
    if file.filename.contains(['/', '\\']) {
        return Err(TourError::Delivery(format!(
            "invalid file name '{}'",
            file.filename
        )));
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(&file.filename);
    std::fs::write(&path, file.contents.as_bytes())
        .map_err(|e| TourError::Delivery(format!("{}: {}", path.display(), e)))?;

    debug!(path = %path.display(), mime = %file.mime, "invite written");
    Ok(path)
}
