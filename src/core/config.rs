//! Configuration module for `UniHub`

use crate::core::academics::{AttendancePolicy, SummaryOptions};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for summary CSV exports
    #[serde(default)]
    pub exports_dir: String,
    /// Directory for student reports
    #[serde(default)]
    pub reports_dir: String,
    /// Directory for ERD and flowchart output
    #[serde(default)]
    pub diagrams_dir: String,
}

const fn default_good() -> f64 {
    75.0
}

const fn default_warning() -> f64 {
    65.0
}

const fn default_notification_limit() -> usize {
    5
}

/// Academic policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademicsConfig {
    /// Attendance strictly above this percentage is Good
    #[serde(default = "default_good")]
    pub attendance_good: f64,
    /// Attendance at or above this percentage (and not Good) is Warning
    #[serde(default = "default_warning")]
    pub attendance_warning: f64,
    /// Maximum notifications shown on the dashboard
    #[serde(default = "default_notification_limit")]
    pub notification_limit: usize,
}

impl Default for AcademicsConfig {
    fn default() -> Self {
        Self {
            attendance_good: default_good(),
            attendance_warning: default_warning(),
            notification_limit: default_notification_limit(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Academic policy settings
    #[serde(default)]
    pub academics: AcademicsConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override summary export directory
    pub exports_dir: Option<String>,
    /// Override reports output directory
    pub reports_dir: Option<String>,
    /// Override diagrams output directory
    pub diagrams_dir: Option<String>,
}

impl Config {
    /// Get the `$UNIHUB` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/unihub`
    /// - macOS: `~/Library/Application Support/unihub`
    /// - Windows: `%APPDATA%\unihub`
    #[must_use]
    pub fn get_unihub_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("unihub")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only string fields that are empty here and non-empty in `defaults` are
    /// updated. Numeric academic settings get their defaults from serde.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let pairs = [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.exports_dir, &defaults.paths.exports_dir),
            (&mut self.paths.reports_dir, &defaults.paths.reports_dir),
            (&mut self.paths.diagrams_dir, &defaults.paths.diagrams_dir),
        ];
        for (current, default) in pairs {
            if current.is_empty() && !default.is_empty() {
                current.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for the current run only; the config file is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir.clone_from(exports_dir);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(reports_dir);
        }
        if let Some(diagrams_dir) = &overrides.diagrams_dir {
            self.paths.diagrams_dir.clone_from(diagrams_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_unihub_dir`](Self::get_unihub_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_unihub_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$UNIHUB` in a string to the config directory
    fn expand_variables(value: &str) -> String {
        if value.contains("$UNIHUB") {
            let unihub_dir = Self::get_unihub_dir();
            value.replace("$UNIHUB", unihub_dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// `$UNIHUB` is expanded in every string value. Missing fields use their
    /// serde defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$UNIHUB/app.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);
        config.paths.diagrams_dir = Self::expand_variables(&config.paths.diagrams_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled into the binary, so this indicates a build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create it from defaults on first run
    ///
    /// Missing fields are merged from the defaults and the file is saved back.
    /// Falls back to the defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    let missing_section = !content.contains("[academics]");
                    if config.merge_defaults(&defaults) || missing_section {
                        let _ = config.save();
                    }
                    return config;
                }
                logger::warn!(
                    "Could not parse {}; using defaults",
                    config_file.display()
                );
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys:
    /// - `level`, `file`, `verbose`
    /// - `exports_dir`, `reports_dir`, `diagrams_dir`
    /// - `attendance_good`, `attendance_warning`, `notification_limit`
    ///
    /// Keys also accept dashes instead of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match canonical_key(key)? {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "exports_dir" => self.paths.exports_dir.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "diagrams_dir" => self.paths.diagrams_dir.clone(),
            "attendance_good" => self.academics.attendance_good.to_string(),
            "attendance_warning" => self.academics.attendance_warning.to_string(),
            _ => self.academics.notification_limit.to_string(),
        };
        Some(value)
    }

    /// Range a threshold key may currently take
    ///
    /// `attendance_good` may not drop below the warning threshold and
    /// `attendance_warning` may not exceed the good threshold. Returns `None`
    /// for keys that are not thresholds.
    #[must_use]
    pub fn allowed_range(&self, key: &str) -> Option<(f64, f64)> {
        match canonical_key(key)? {
            "attendance_good" => Some((self.academics.attendance_warning, 100.0)),
            "attendance_warning" => Some((0.0, self.academics.attendance_good)),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the key is unknown, the value does not parse,
    /// or a threshold falls outside [`allowed_range`](Config::allowed_range).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = canonical_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        let invalid = |expected: &'static str| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            expected,
        };

        match key {
            "level" => {
                value
                    .parse::<logger::Level>()
                    .map_err(|_| invalid("a log level (error, warn, info, debug)"))?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value.parse().map_err(|_| invalid("true or false"))?;
            }
            "exports_dir" => self.paths.exports_dir = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "diagrams_dir" => self.paths.diagrams_dir = value.to_string(),
            "attendance_good" | "attendance_warning" => {
                let parsed: f64 = value.parse().map_err(|_| invalid("a percentage"))?;
                self.set_threshold(key, parsed)?;
            }
            _ => {
                self.academics.notification_limit =
                    value.parse().map_err(|_| invalid("a non-negative whole number"))?;
            }
        }
        Ok(())
    }

    fn set_threshold(&mut self, key: &'static str, value: f64) -> Result<(), ConfigError> {
        let (min, max) = self
            .allowed_range(key)
            .ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        if !(min..=max).contains(&value) {
            return Err(ConfigError::OutOfRange {
                key,
                value,
                min,
                max,
            });
        }
        if key == "attendance_good" {
            self.academics.attendance_good = value;
        } else {
            self.academics.attendance_warning = value;
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the key is unknown, or if restoring a
    /// threshold default would cross the other threshold.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), ConfigError> {
        let key = canonical_key(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))?;
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "exports_dir" => self
                .paths
                .exports_dir
                .clone_from(&defaults.paths.exports_dir),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "diagrams_dir" => self
                .paths
                .diagrams_dir
                .clone_from(&defaults.paths.diagrams_dir),
            "attendance_good" => self.set_threshold(key, defaults.academics.attendance_good)?,
            "attendance_warning" => {
                self.set_threshold(key, defaults.academics.attendance_warning)?;
            }
            _ => self.academics.notification_limit = defaults.academics.notification_limit,
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Attendance bands from the configured thresholds
    #[must_use]
    pub const fn attendance_policy(&self) -> AttendancePolicy {
        AttendancePolicy {
            good: self.academics.attendance_good,
            warning: self.academics.attendance_warning,
        }
    }

    /// Summary options for `semester` (or each student's current one)
    #[must_use]
    pub const fn summary_options(&self, semester: Option<u32>) -> SummaryOptions {
        SummaryOptions {
            semester,
            policy: self.attendance_policy(),
            notification_limit: self.academics.notification_limit,
        }
    }
}

/// Every key `get`, `set` and `unset` understand
pub const KEYS: [&str; 9] = [
    "level",
    "file",
    "verbose",
    "exports_dir",
    "reports_dir",
    "diagrams_dir",
    "attendance_good",
    "attendance_warning",
    "notification_limit",
];

fn canonical_key(key: &str) -> Option<&'static str> {
    let normalized = key.trim().replace('-', "_");
    KEYS.iter().copied().find(|k| *k == normalized)
}

/// Errors from reading or changing a configuration key
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The key is not one of [`KEYS`]
    #[error("Unknown config key: '{0}'")]
    UnknownKey(String),
    /// The value does not parse for the key
    #[error("Invalid value for '{key}': '{value}' (expected {expected})")]
    InvalidValue {
        /// Canonical key
        key: &'static str,
        /// Value as given
        value: String,
        /// What the key accepts
        expected: &'static str,
    },
    /// A threshold outside its allowed range
    #[error("'{key}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Canonical key
        key: &'static str,
        /// Rejected value
        value: f64,
        /// Lowest allowed value
        min: f64,
        /// Highest allowed value
        max: f64,
    },
}

impl ConfigError {
    /// Key the error refers to, as typed or canonicalised
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::UnknownKey(key) => key.as_str(),
            Self::InvalidValue { key, .. } | Self::OutOfRange { key, .. } => *key,
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;
        writeln!(f, "  diagrams_dir = \"{}\"", self.paths.diagrams_dir)?;

        writeln!(f, "\n[academics]")?;
        writeln!(f, "  attendance_good = {}", self.academics.attendance_good)?;
        writeln!(f, "  attendance_warning = {}", self.academics.attendance_warning)?;
        writeln!(f, "  notification_limit = {}", self.academics.notification_limit)?;

        Ok(())
    }
}
