//! YAML configuration for playback and the default run.
//!
//! ```yaml
//! version: 1
//! playback:
//!   speed_ms: 500
//!   auto_play: true
//! run:
//!   algorithm: quick
//!   pivot: median_of_three
//!   partition: three_way
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::algorithms::RunConfig;
use crate::error::{Error, Result};
use crate::render::RenderOptions;

/// Playback settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Delay between automatic steps in milliseconds.
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,

    /// Start playing as soon as a trace is loaded.
    #[serde(default)]
    pub auto_play: bool,

    /// Restart from the first step instead of finishing.
    #[serde(default)]
    pub loop_playback: bool,

    /// Include summary counters in every view.
    #[serde(default = "default_true")]
    pub show_statistics: bool,

    /// Include the renderer legend in every view.
    #[serde(default = "default_true")]
    pub show_legend: bool,
}

fn default_speed_ms() -> u64 {
    1000
}
fn default_true() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            auto_play: false,
            loop_playback: false,
            show_statistics: default_true(),
            show_legend: default_true(),
        }
    }
}

impl PlaybackConfig {
    /// Returns the step interval as a Duration.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }

    /// Render options implied by the toggles.
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_legend: self.show_legend,
            show_statistics: self.show_statistics,
            ..RenderOptions::default()
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Playback settings.
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Default algorithm run.
    #[serde(default)]
    pub run: RunConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            playback: PlaybackConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .map_err(|_| Error::ConfigNotFound(path.display().to_string()))?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })
    }

    /// Loads configuration with fallback to defaults.
    #[must_use]
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!(
                    target: "sortviz::config",
                    error = %e,
                    "using default configuration"
                );
                Self::default()
            }
        }
    }
}
