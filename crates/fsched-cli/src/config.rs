//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use fsched_core::Granularity;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the schedule file.
    pub schedule_path: PathBuf,
    /// Which minutes start and end times may fall on.
    pub granularity: Granularity,
    /// Directory for workbook exports.
    pub export_dir: PathBuf,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("schedule_path", &self.schedule_path)
            .field("granularity", &self.granularity)
            .field("export_dir", &self.export_dir)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            schedule_path: data_dir.join("schedule.cccsched"),
            granularity: Granularity::default(),
            export_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // FSCHED_SCHEDULE_PATH, FSCHED_GRANULARITY, FSCHED_EXPORT_DIR
        figment = figment.merge(Env::prefixed("FSCHED_"));

        figment.extract()
    }

    /// Points the config at another schedule file.
    #[must_use]
    pub fn with_schedule_path(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.schedule_path = path;
        }
        self
    }
}

/// Returns the platform-specific config directory for fsched.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("fsched"))
}

/// Returns the platform-specific data directory for fsched.
///
/// On Linux: `~/.local/share/fsched`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("fsched"))
}
