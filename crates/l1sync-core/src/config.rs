//! Dispatch configuration.

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::telemetry::LogConfig;

/// What the builder does when two processors claim the same (fork, event) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail `build()` with [`RegistryError::DuplicateProcessor`].
    #[default]
    Reject,
    /// Keep the processor registered last.
    LastWins,
}

/// Configuration for the event-processor registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[serde(default)]
    pub log: LogConfig,
}

impl DispatchConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RegistryError> {
        if let Some(level) = self.log.unknown_level() {
            return Err(RegistryError::InvalidConfig(format!(
                "unknown log level '{level}'"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let cfg = DispatchConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, DispatchConfig::default());
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(cfg.log.level, "info");
    }

    #[test]
    fn parses_last_wins_and_log_overrides() {
        let cfg = DispatchConfig::from_json_str(
            r#"{
                "duplicate_policy": "last_wins",
                "log": { "level": "warn", "components": { "l1sync_core": "debug" }, "json": true }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::LastWins);
        assert!(cfg.log.json);
        assert_eq!(cfg.log.directives(), "warn,l1sync_core=debug");
    }

    #[test]
    fn unknown_level_rejected() {
        let err =
            DispatchConfig::from_json_str(r#"{ "log": { "level": "verbose" } }"#).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_rejected() {
        let err = DispatchConfig::from_json_str(r#"{ "duplicate_policy": "first_wins" }"#)
            .unwrap_err();
        assert!(matches!(err, RegistryError::Json(_)));
    }
}
