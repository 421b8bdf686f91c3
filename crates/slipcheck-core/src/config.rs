//! Rule thresholds.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default deadline horizon: 24 hours.
pub const DEFAULT_DEADLINE_HORIZON_SECS: u64 = 24 * 60 * 60;

/// Default maximum path length, in tokens, before `LONG_PATH` is raised.
pub const DEFAULT_MAX_HOPS: usize = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

/// Tunable thresholds for the rule checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// A deadline further than this many seconds past "now" is excessive.
    #[serde(default = "default_deadline_horizon_secs")]
    pub deadline_horizon_secs: u64,
    /// Paths with more tokens than this raise `LONG_PATH`.
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

fn default_deadline_horizon_secs() -> u64 { DEFAULT_DEADLINE_HORIZON_SECS }
fn default_max_hops() -> usize { DEFAULT_MAX_HOPS }

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            deadline_horizon_secs: DEFAULT_DEADLINE_HORIZON_SECS,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }
}

impl CheckConfig {
    /// Parse a JSON object such as `{ "max_hops": 4 }`. Missing fields take
    /// their defaults. The result is validated.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Reject thresholds that would make a rule meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deadline_horizon_secs == 0 {
            return Err(ConfigError::Invalid {
                reason: "deadline_horizon_secs must be at least 1".into(),
            });
        }
        if self.max_hops < 2 {
            return Err(ConfigError::Invalid {
                reason: format!("max_hops must be at least 2, got {}", self.max_hops),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = CheckConfig::default();
        assert_eq!(cfg.deadline_horizon_secs, 86_400);
        assert_eq!(cfg.max_hops, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let cfg = CheckConfig::from_json_str(r#"{ "max_hops": 3 }"#).unwrap();
        assert_eq!(cfg.max_hops, 3);
        assert_eq!(cfg.deadline_horizon_secs, DEFAULT_DEADLINE_HORIZON_SECS);

        let cfg = CheckConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, CheckConfig::default());
    }

    #[test]
    fn rejects_zero_horizon_and_tiny_hops() {
        assert!(matches!(
            CheckConfig::from_json_str(r#"{ "deadline_horizon_secs": 0 }"#),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            CheckConfig::from_json_str(r#"{ "max_hops": 1 }"#),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn rejects_unknown_fields_and_bad_json() {
        assert!(matches!(
            CheckConfig::from_json_str(r#"{ "max_hop": 3 }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(CheckConfig::from_json_str("not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CheckConfig::from_json_file(Path::new("/nonexistent/slipcheck.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
