//! Configuration management for the qvec CLI.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with QVEC_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qvec_sim::SimulatorConfig;

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulator settings
    pub simulator: SimulatorConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level used when no -v flag is given: "off", "error", "warn", "info", "debug", "trace"
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Default config file location, `~/.qvec/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".qvec").join("config.yaml"))
    }

    /// Apply `QVEC_*` environment overrides.
    pub fn merge_env(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup`, keyed by environment variable name.
    fn merge_vars(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(seed) = lookup("QVEC_SEED") {
            self.simulator.seed = Some(parse_var("QVEC_SEED", &seed)?);
        }
        if let Some(max) = lookup("QVEC_MAX_QUBITS") {
            self.simulator.max_qubits = parse_var("QVEC_MAX_QUBITS", &max)?;
        }
        if let Some(threshold) = lookup("QVEC_PARALLEL_THRESHOLD") {
            self.simulator.parallel_threshold = parse_var("QVEC_PARALLEL_THRESHOLD", &threshold)?;
        }
        if let Some(level) = lookup("QVEC_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Load configuration with full precedence.
    ///
    /// An explicit `path` must exist; the default location is used only when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(default)?,
                _ => Self::default(),
            },
        };

        config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        self.simulator
            .validate()
            .context("Invalid simulator configuration")?;

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Available: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            );
        }

        Ok(())
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid value for {key} ('{value}'): {e}"))
}
