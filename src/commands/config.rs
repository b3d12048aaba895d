use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;
use tour_core::config::TourConfig;

use super::load_config;

pub fn run(path: Option<&Path>, init: bool) -> Result<()> {
    let config_path = match path {
        Some(path) => path.to_path_buf(),
        None => TourConfig::config_path()?,
    };

    if init {
        if config_path.exists() {
            println!("Config already exists at {}", config_path.display());
        } else {
            TourConfig::create_default_config(&config_path)?;
            println!("{}", format!("Created {}", config_path.display()).green());
        }
    }

    let config = load_config(Some(&config_path))?;

    println!("{}", "Paths".bold());
    println!("  Config:    {}", config_path.display());
    println!(
        "  Invites:   {}",
        config
            .output_dir
            .as_deref()
            .unwrap_or(Path::new("."))
            .display()
    );
    println!();
    println!("{}", "Invite".bold());
    println!("  Summary:   {}", config.summary);
    println!("  Location:  {}", config.location);
    println!("  Length:    {} minutes", config.duration_minutes);
    println!("  File:      {}", config.filename);

    Ok(())
}
