//! Dashboard configuration, read from an optional TOML file.
//!
//! ```toml
//! indicators = ["cruspi", "wti_oil"]
//!
//! [data]
//! root = "data"
//! search_paths = []
//! allow_sample = true
//!
//! [display]
//! time_period = "last_12_months"
//! show_forecasts = true
//!
//! [logging]
//! level = "info"
//! format = "pretty"
//! ```
//!
//! Every field has a default, so an empty file (or no file at all) gives the
//! stock dashboard.

use std::path::{Path, PathBuf};

use econlab_core::analytics::TimePeriod;
use econlab_core::Catalog;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LoggingConfig;

/// File looked for in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "econlab.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Indicator ids to show, in order. `None` shows the whole catalog.
    pub indicators: Option<Vec<String>>,
    pub data: DataConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DataConfig {
    /// Explicit data root. Skips discovery when set.
    pub root: Option<PathBuf>,
    /// Extra candidate roots, tried after the built-in ones.
    pub search_paths: Vec<PathBuf>,
    /// Synthesize sample series for indicators with no file.
    pub allow_sample: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: None,
            search_paths: Vec::new(),
            allow_sample: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub time_period: TimePeriod,
    pub show_forecasts: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_period: TimePeriod::default(),
            show_forecasts: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub no_sample: bool,
    pub period: Option<TimePeriod>,
    pub no_forecast: bool,
}

impl DashboardConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Self::parse(text, Path::new("<inline>"))
    }

    fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, `econlab.toml` in the
    /// working directory is used if present, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ids) = &self.indicators {
            if ids.is_empty() {
                return Err(ConfigError::Invalid(
                    "indicators list is empty; omit it to show the full catalog".into(),
                ));
            }
            if let Some(bad) = ids.iter().find(|id| id.trim().is_empty()) {
                return Err(ConfigError::Invalid(format!("blank indicator id {bad:?}")));
            }
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "unknown logging format '{}' (expected pretty or json)",
                self.logging.format
            )));
        }
        Ok(())
    }

    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(dir) = &overrides.data_dir {
            self.data.root = Some(dir.clone());
        }
        if overrides.no_sample {
            self.data.allow_sample = false;
        }
        if let Some(period) = overrides.period {
            self.display.time_period = period;
        }
        if overrides.no_forecast {
            self.display.show_forecasts = false;
        }
    }

    /// Catalog restricted to the configured indicators.
    pub fn catalog(&self) -> Catalog {
        let builtin = Catalog::builtin();
        match &self.indicators {
            Some(ids) => builtin.select(ids),
            None => builtin,
        }
    }
}
