//! Runtime settings for the admin frontend.
//!
//! Defaults are compiled in; a JSON object stored under
//! `localStorage["app-config"]` overrides any subset of the fields, e.g.
//! `{"api_port": 8080}`.

use serde::Deserialize;
use web_sys::window;

use super::alert::DEFAULT_TIMEOUT_MS;

const CONFIG_STORAGE_KEY: &str = "app-config";
const DEFAULT_API_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Port of the API server on the page's host.
    pub api_port: u16,
    /// Auto-dismiss delay for alerts that do not set one. 0 keeps them open.
    pub alert_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_port: DEFAULT_API_PORT,
            alert_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str(raw).map_err(|e| format!("Invalid {}: {}", CONFIG_STORAGE_KEY, e))
    }

    /// Defaults merged with the localStorage override, if any.
    pub fn load() -> Self {
        let stored = window()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(CONFIG_STORAGE_KEY).ok().flatten());

        match stored {
            Some(raw) => Self::from_json(&raw).unwrap_or_else(|e| {
                log::warn!("{}; using defaults", e);
                Self::default()
            }),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api_port, 3000);
        assert_eq!(config.alert_timeout_ms, 5000);
    }

    #[test]
    fn test_partial_override() {
        let config = AppConfig::from_json(r#"{"api_port": 8080}"#).unwrap();
        assert_eq!(config.api_port, 8080);
        assert_eq!(config.alert_timeout_ms, DEFAULT_TIMEOUT_MS);

        let config = AppConfig::from_json(r#"{"alert_timeout_ms": 0}"#).unwrap();
        assert_eq!(config.api_port, DEFAULT_API_PORT);
        assert_eq!(config.alert_timeout_ms, 0);
    }

    #[test]
    fn test_invalid_json() {
        assert!(AppConfig::from_json("not json").is_err());
        assert!(AppConfig::from_json(r#"{"api_port": -1}"#).is_err());
    }
}
