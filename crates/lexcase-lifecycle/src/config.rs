//! Engine configuration.
//!
//! Defaults are usable as-is. Override via a YAML file or environment
//! variables:
//!
//! ```yaml
//! sla:
//!   at_risk_window_hours: 48
//! presentation:
//!   version: 2
//!   statuses:
//!     draft: { label: Draft, description: "...", is_terminal: false }
//!     # ... every status must be present
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::presentation::PresentationTable;
use crate::sla::SlaPolicy;

/// Path of a YAML configuration file.
pub const CONFIG_PATH_VAR: &str = "LEXCASE_CONFIG";
/// Overrides `sla.at_risk_window_hours`.
pub const AT_RISK_HOURS_VAR: &str = "LEXCASE_SLA_AT_RISK_HOURS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub sla: SlaPolicy,
    pub presentation: PresentationTable,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid engine config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid value for {var}: {value:?}")]
    InvalidOverride { var: &'static str, value: String },
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `LEXCASE_CONFIG`: YAML file to start from (default: built-in config)
    /// - `LEXCASE_SLA_AT_RISK_HOURS`: at-risk window in hours
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// [`EngineConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) if !path.is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        config.apply_overrides(lookup)?;
        Ok(config)
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = lookup(AT_RISK_HOURS_VAR) {
            self.sla.at_risk_window_hours =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidOverride {
                        var: AT_RISK_HOURS_VAR,
                        value: raw.clone(),
                    })?;
            tracing::debug!(
                hours = self.sla.at_risk_window_hours,
                "at-risk window overridden from environment"
            );
        }
        Ok(())
    }
}
