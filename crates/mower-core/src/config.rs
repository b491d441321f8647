//! Configuration loading and typed config structures for the mower simulator.
//!
//! Configuration lives in an optional `mower-config.yaml`. Every field has
//! a default matching the behaviour the mobile app was developed against,
//! so an empty or absent file yields a working server on port 3000.

use std::path::Path;

use mower_types::MowerPosition;
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The file parsed but holds values the simulator cannot run with.
    #[error("invalid config: {message}")]
    Invalid {
        /// What is wrong.
        message: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MowerConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerSection,

    /// Simulation constants.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MowerConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.simulation.validate()?;
        Ok(config)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerSection {
    /// Address to bind (all interfaces by default).
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Constants driving the simulated mower.
///
/// Distances are in meters, areas in square meters, battery in percent.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Period of the position tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Forward motion per tick along the x axis.
    #[serde(default = "default_step_per_tick")]
    pub step_per_tick: f64,

    /// Distance between mowing rows along the y axis.
    #[serde(default = "default_row_spacing")]
    pub row_spacing: f64,

    /// Distance kept from the far edges of the field.
    #[serde(default = "default_edge_margin")]
    pub edge_margin: f64,

    /// Area mowed per status poll while cutting.
    #[serde(default = "default_progress_area_step")]
    pub progress_area_step: f64,

    /// Battery drained per status poll while cutting.
    #[serde(default = "default_battery_drain_per_poll")]
    pub battery_drain_per_poll: f64,

    /// Every progress value divisible by this reports a large position error.
    #[serde(default = "default_warning_cycle")]
    pub warning_cycle: u32,

    /// Dead-reckoning drift reported on ordinary polls.
    #[serde(default = "default_nominal_error")]
    pub nominal_error: f64,

    /// Dead-reckoning drift reported on warning polls.
    #[serde(default = "default_warning_error")]
    pub warning_error: f64,

    /// Drift above which `positionWarning` is raised.
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,

    /// Where the mower is placed whenever a field is configured.
    #[serde(default = "default_start_position")]
    pub start_position: MowerPosition,
}

impl SimulationConfig {
    /// Reject values the tick loop or the simulator cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(invalid("simulation.tick_interval_ms must be greater than 0"));
        }
        if self.warning_cycle == 0 {
            return Err(invalid("simulation.warning_cycle must be greater than 0"));
        }
        let non_negative = [
            ("step_per_tick", self.step_per_tick),
            ("row_spacing", self.row_spacing),
            ("edge_margin", self.edge_margin),
            ("progress_area_step", self.progress_area_step),
            ("battery_drain_per_poll", self.battery_drain_per_poll),
            ("nominal_error", self.nominal_error),
            ("warning_error", self.warning_error),
            ("warning_threshold", self.warning_threshold),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(&format!(
                    "simulation.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            step_per_tick: default_step_per_tick(),
            row_spacing: default_row_spacing(),
            edge_margin: default_edge_margin(),
            progress_area_step: default_progress_area_step(),
            battery_drain_per_poll: default_battery_drain_per_poll(),
            warning_cycle: default_warning_cycle(),
            nominal_error: default_nominal_error(),
            warning_error: default_warning_error(),
            warning_threshold: default_warning_threshold(),
            start_position: default_start_position(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_owned(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3000
}

const fn default_tick_interval_ms() -> u64 {
    2000
}

const fn default_step_per_tick() -> f64 {
    0.3
}

const fn default_row_spacing() -> f64 {
    0.5
}

const fn default_edge_margin() -> f64 {
    0.5
}

const fn default_progress_area_step() -> f64 {
    4.0
}

const fn default_battery_drain_per_poll() -> f64 {
    0.25
}

const fn default_warning_cycle() -> u32 {
    20
}

const fn default_nominal_error() -> f64 {
    0.05
}

const fn default_warning_error() -> f64 {
    1.5
}

const fn default_warning_threshold() -> f64 {
    0.5
}

const fn default_start_position() -> MowerPosition {
    MowerPosition::new(0.5, 0.5)
}

fn default_log_level() -> String {
    "info".to_owned()
}
