use crate::errors::AdapterError;
use super::validation::{ConfigValidator, ValidationWarning};
use anyhow::{Context, Result};
use env_logger::Env;
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    /// Structured when a `log` backend is installed, stderr otherwise.
    #[default]
    Auto,
    Structured,
    Stderr,
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub verbosity: u8,
    pub sink: SinkKind,
    pub target: String,
}
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            sink: SinkKind::Auto,
            target: crate::monitoring::diag::DEFAULT_TARGET.to_string(),
        }
    }
}
impl LogConfig {
    pub fn from_json(data: &str) -> Result<Self> {
        serde_json::from_str(data).context("cannot parse logging configuration")
    }
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
    /// Fails on the first validation error. Warnings are logged and handed
    /// back so callers can surface them too.
    pub fn validate(&self) -> Result<Vec<ValidationWarning>, AdapterError> {
        let result = ConfigValidator::new().validate_log_config(self);
        if let Some(error) = result.errors.into_iter().next() {
            return Err(AdapterError::invalid_config(&error.field, error.message));
        }
        for warning in &result.warnings {
            warn!("logging config {}: {}", warning.field, warning.message);
        }
        Ok(result.warnings)
    }
    pub fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
    /// Installs `env_logger` at this verbosity; `RUST_LOG` still wins.
    pub fn init_logger(&self) -> Result<()> {
        env_logger::Builder::from_env(
                Env::default().default_filter_or(self.level_filter().to_string()),
            )
            .try_init()
            .context("a logger is already installed")
    }
}
