//! Scheduler configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DURATION_MINUTES, DEFAULT_LOCATION, DEFAULT_SUMMARY, INVITE_FILENAME,
};
use crate::error::{TourError, TourResult};

fn default_summary() -> String {
    DEFAULT_SUMMARY.to_string()
}

fn default_location() -> String {
    DEFAULT_LOCATION.to_string()
}

fn default_duration_minutes() -> u32 {
    DEFAULT_DURATION_MINUTES
}

fn default_filename() -> String {
    INVITE_FILENAME.to_string()
}

/// Configuration at ~/.config/tour-scheduler/config.toml
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TourConfig {
    /// Invite SUMMARY
    #[serde(default = "default_summary")]
    pub summary: String,

    /// Invite LOCATION
    #[serde(default = "default_location")]
    pub location: String,

    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    /// Name of the delivered invite file
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Where the CLI saves invites; the working directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for TourConfig {
    fn default() -> Self {
        TourConfig {
            summary: default_summary(),
            location: default_location(),
            duration_minutes: default_duration_minutes(),
            filename: default_filename(),
            output_dir: None,
        }
    }
}

impl TourConfig {
    pub fn config_path() -> TourResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| TourError::Config("Could not determine config directory".into()))?
            .join("tour-scheduler");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> TourResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`, falling back to defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> TourResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: TourConfig = toml::from_str(&content)
            .map_err(|e| TourError::Config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> TourResult<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| TourError::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> TourResult<()> {
        let contents = format!(
            "\
# tour-scheduler configuration

# Invite title:
# summary = \"{}\"

# Tour address:
# location = \"{}\"

# Tour length in minutes:
# duration_minutes = {}

# Name of the saved invite:
# filename = \"{}\"

# Directory invites are saved to (defaults to the current directory):
# output_dir = \"~/Downloads\"
",
            DEFAULT_SUMMARY, DEFAULT_LOCATION, DEFAULT_DURATION_MINUTES, INVITE_FILENAME
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                TourError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| TourError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    fn validate(&self) -> TourResult<()> {
        if self.duration_minutes == 0 {
            return Err(TourError::Config("duration_minutes must be at least 1".into()));
        }
        if self.location.trim().is_empty() {
            return Err(TourError::Config("location must not be empty".into()));
        }
        if self.summary.trim().is_empty() {
            return Err(TourError::Config("summary must not be empty".into()));
        }
        if self.filename.trim().is_empty() {
            return Err(TourError::Config("filename must not be empty".into()));
        }
        for (key, value) in [
            ("summary", &self.summary),
            ("location", &self.location),
            ("filename", &self.filename),
        ] {
            if value.contains(['\r', '\n']) {
                return Err(TourError::Config(format!("{key} must be a single line")));
            }
        }
        Ok(())
    }
}
