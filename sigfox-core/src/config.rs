//! Runtime settings for the Sigfox API client.
//!
//! The original flags that control response representation, verbose
//! logging, and TLS validation are held in an explicit `Settings`
//! struct behind a shared `SettingsHandle` instead of process-wide
//! state. The client reads the handle at call time, so mutating it
//! affects every subsequent call on every client sharing the handle.

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{SigfoxError, SigfoxResult};

/// How the client represents response payloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Return the deserialized JSON value as-is.
    #[default]
    Plain,
    /// Wrap the payload in the lazy read-only view object.
    Object,
}

/// Client settings, evaluated at call time rather than construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Base URL of the backend REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Response representation for subsequent calls.
    #[serde(default)]
    pub response_mode: ResponseMode,

    /// Log full request parameters and response bodies at debug level.
    #[serde(default)]
    pub debug: bool,

    /// Skip TLS certificate validation.
    #[serde(default)]
    pub ignore_ssl_validation: bool,
}

fn default_api_url() -> String {
    constants::DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    constants::DEFAULT_TIMEOUT_MS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            response_mode: ResponseMode::default(),
            debug: false,
            ignore_ssl_validation: false,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn load_from_file(path: &Path) -> SigfoxResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Save settings to a TOML file.
    pub fn save_to_file(&self, path: &Path) -> SigfoxResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| SigfoxError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// The API base URL without a trailing slash, so request paths
    /// starting with `/` concatenate cleanly.
    pub fn sanitized_api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

/// Shared settings holder read by clients at call time.
#[derive(Clone, Default)]
pub struct SettingsHandle {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsHandle {
    /// Create a handle around the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(settings)),
        }
    }

    /// Read the settings.
    pub fn read(&self) -> RwLockReadGuard<'_, Settings> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write/update the settings.
    pub fn write(&self) -> RwLockWriteGuard<'_, Settings> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy the current settings.
    pub fn snapshot(&self) -> Settings {
        self.read().clone()
    }

    /// Apply a mutation to the settings in place.
    pub fn update(&self, f: impl FnOnce(&mut Settings)) {
        f(&mut self.write());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, constants::DEFAULT_API_URL);
        assert_eq!(settings.timeout_ms, 30_000);
        assert_eq!(settings.response_mode, ResponseMode::Plain);
        assert!(!settings.debug);
        assert!(!settings.ignore_ssl_validation);
    }

    #[test]
    fn test_sanitized_api_url() {
        let mut settings = Settings::default();
        settings.api_url = "https://backend.sigfox.com/api/".into();
        assert_eq!(settings.sanitized_api_url(), "https://backend.sigfox.com/api");
    }

    #[test]
    fn test_roundtrip_toml() {
        let mut settings = Settings::default();
        settings.response_mode = ResponseMode::Object;
        settings.debug = true;
        let serialized = toml::to_string_pretty(&settings).unwrap();
        let deserialized: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.response_mode, ResponseMode::Object);
        assert!(deserialized.debug);
    }

    #[test]
    fn test_load_and_save_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sigfox.toml");

        let mut settings = Settings::default();
        settings.timeout_ms = 5_000;
        settings.save_to_file(&path).unwrap();

        let loaded = Settings::load_from_file(&path).unwrap();
        assert_eq!(loaded.timeout_ms, 5_000);
    }

    #[test]
    fn test_handle_update_visible_to_clones() {
        let handle = SettingsHandle::default();
        let other = handle.clone();
        handle.update(|s| s.response_mode = ResponseMode::Object);
        assert_eq!(other.read().response_mode, ResponseMode::Object);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let settings: Settings = toml::from_str("debug = true").unwrap();
        assert!(settings.debug);
        assert_eq!(settings.api_url, constants::DEFAULT_API_URL);
    }
}
