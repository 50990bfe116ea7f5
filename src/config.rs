/// Runtime configuration passed in from the page

use crate::poller::DEFAULT_POLL_INTERVAL_MS;
use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for backend routes; empty means same origin
    pub api_base: String,
    pub poll_interval_ms: u32,
    /// Poll requests slower than this are aborted and count as a skipped tick
    pub request_timeout_ms: u32,
    pub toast_ms: u32,
    pub default_workers: u32,
    pub worker_choices: Vec<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            api_base: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            request_timeout_ms: 10_000,
            toast_ms: 3_000,
            default_workers: 3,
            worker_choices: vec![1, 2, 3, 5, 10],
        }
    }
}

impl AppConfig {
    /// Read the object handed to `start_app`; anything unusable means defaults
    pub fn from_js(value: JsValue) -> Self {
        if value.is_undefined() || value.is_null() {
            return Self::default();
        }
        match serde_wasm_bindgen::from_value(value) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid config: {}", e);
                Self::default()
            }
        }
    }

    /// Absolute or origin-relative URL for a backend route
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.default_workers, 3);
        assert!(config.worker_choices.contains(&config.default_workers));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"poll_interval_ms": 1000}"#).unwrap();
        assert_eq!(config.poll_interval_ms, 1000);
        assert_eq!(config.toast_ms, 3_000);
    }

    #[test]
    fn test_endpoint() {
        let mut config = AppConfig::default();
        assert_eq!(config.endpoint("/progress"), "/progress");

        config.api_base = "http://localhost:5000/".to_string();
        assert_eq!(config.endpoint("/check"), "http://localhost:5000/check");
    }
}
