//! Tracing / logging initialisation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: component_name → level
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// `EnvFilter` directives, e.g. `"info,l1sync_core=debug"`.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }

    /// Returns the first level (global or per component) that is not a known level.
    pub fn unknown_level(&self) -> Option<&str> {
        std::iter::once(&self.level)
            .chain(self.components.values())
            .map(String::as_str)
            .find(|l| !LEVELS.contains(&l.to_ascii_lowercase().as_str()))
    }
}

/// Install the global tracing subscriber. Call once at startup.
///
/// Returns `false` if a subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> bool {
    let filter = EnvFilter::try_new(config.directives()).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .try_init()
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_append_component_overrides() {
        let mut config = LogConfig::default();
        config.components.insert("l1sync-core".into(), "trace".into());
        assert_eq!(config.directives(), "info,l1sync_core=trace");
    }

    #[test]
    fn unknown_level_is_reported() {
        let mut config = LogConfig::default();
        assert_eq!(config.unknown_level(), None);
        config.components.insert("l1sync_core".into(), "loud".into());
        assert_eq!(config.unknown_level(), Some("loud"));
    }

    #[test]
    fn init_twice_reports_existing_subscriber() {
        let config = LogConfig::default();
        init_tracing(&config);
        assert!(!init_tracing(&config));
    }
}
