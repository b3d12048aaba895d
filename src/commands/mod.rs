pub mod book;
pub mod config;
pub mod inspect;
pub mod slots;

use std::path::Path;

use anyhow::Result;
use tour_core::config::TourConfig;

/// Load the config from `--config` if given, otherwise the default location.
pub fn load_config(path: Option<&Path>) -> Result<TourConfig> {
    let config = match path {
        Some(path) => TourConfig::load_from(path)?,
        None => TourConfig::load()?,
    };
    Ok(config)
}
