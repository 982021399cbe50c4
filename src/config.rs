//! Runtime settings.
//!
//! Loaded from an optional TOML file; every field has a default so an empty file
//! (or no file at all) is valid.
//!
//! ```toml
//! use_fixtures = true
//!
//! [logging]
//! level = "debug"
//! format = "compact"
//!
//! [[fixtures.devices]]
//! name = "Bench Cam"
//!
//! [[fixtures.devices.controls]]
//! name = "Exposure"
//! min = 1
//! max = 5000
//! value = 250
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::backends::fixture::FixtureTable;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Serve fixture devices instead of real hardware.
    pub use_fixtures: bool,
    pub logging: LoggingSettings,
    /// Fixture table; the built-in table is used when absent.
    pub fixtures: Option<FixtureTable>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_fixtures: !cfg!(feature = "v4l2"),
            logging: LoggingSettings::default(),
            fixtures: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load settings from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Apply command-line overrides.
    pub fn with_overrides(mut self, force_fixtures: bool, verbose: u8) -> Self {
        if force_fixtures {
            self.use_fixtures = true;
        }
        match verbose {
            0 => {}
            1 => self.logging.level = "debug".to_string(),
            _ => self.logging.level = "trace".to_string(),
        }
        self
    }
}
