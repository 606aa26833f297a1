//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across tasks.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Environment variable consulted when no API key is stored in the settings
/// file.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

// ---------------------------------------------------------------------------
// GeminiConfig
// ---------------------------------------------------------------------------

/// Settings for the Gemini translation endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key — `None` until the user configures one (the `GEMINI_API_KEY`
    /// environment variable is consulted as a fallback).
    pub api_key: Option<String>,
    /// Base URL of the API endpoint.
    pub base_url: String,
    /// Model identifier used in the request path (e.g. `"gemini-pro"`).
    pub model: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f32,
    /// Maximum seconds to wait for one model response before timing out.
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: "gemini-pro".into(),
            temperature: 0.7,
            timeout_secs: 20,
        }
    }
}

impl GeminiConfig {
    /// The API key from settings, or the `GEMINI_API_KEY` environment
    /// variable when the settings hold none.  Empty strings count as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.is_empty())
            .or_else(|| std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()))
    }

    /// Whether a usable credential is available from any source.
    pub fn is_configured(&self) -> bool {
        self.resolved_api_key().is_some()
    }
}

// ---------------------------------------------------------------------------
// HistoryConfig
// ---------------------------------------------------------------------------

/// Settings for the local translation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Most-recent entries kept; older ones are discarded on append.
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_entries: 50 }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use grandtalk::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Gemini endpoint settings.
    pub gemini: GeminiConfig,
    /// Local history settings.
    pub history: HistoryConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// Verify that a default `AppConfig` can be serialised to TOML and
    /// deserialised back without any data loss.
    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.gemini.base_url, loaded.gemini.base_url);
        assert_eq!(original.gemini.api_key, loaded.gemini.api_key);
        assert_eq!(original.gemini.model, loaded.gemini.model);
        assert_eq!(original.gemini.timeout_secs, loaded.gemini.timeout_secs);
        assert_eq!(original.gemini.temperature, loaded.gemini.temperature);
        assert_eq!(original.history.max_entries, loaded.history.max_entries);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");

        assert_eq!(config.gemini.model, GeminiConfig::default().model);
        assert_eq!(config.history.max_entries, 50);
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(cfg.gemini.api_key.is_none());
        assert_eq!(cfg.gemini.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(cfg.gemini.model, "gemini-pro");
        assert_eq!(cfg.gemini.timeout_secs, 20);
        assert_eq!(cfg.history.max_entries, 50);
    }

    /// Verify that modified non-default values survive a round trip.
    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.gemini.api_key = Some("AIza-test".into());
        cfg.gemini.model = "gemini-1.5-flash".into();
        cfg.gemini.timeout_secs = 30;
        cfg.history.max_entries = 10;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.gemini.api_key, Some("AIza-test".into()));
        assert_eq!(loaded.gemini.model, "gemini-1.5-flash");
        assert_eq!(loaded.gemini.timeout_secs, 30);
        assert_eq!(loaded.history.max_entries, 10);
    }

    #[test]
    fn stored_key_wins_over_missing_env() {
        let cfg = GeminiConfig {
            api_key: Some("stored-key".into()),
            ..GeminiConfig::default()
        };
        assert_eq!(cfg.resolved_api_key().as_deref(), Some("stored-key"));
        assert!(cfg.is_configured());
    }

    #[test]
    fn empty_stored_key_counts_as_unset() {
        // NB: does not touch the real environment variable; if GEMINI_API_KEY
        // is set in the test environment it may legitimately resolve.
        let cfg = GeminiConfig {
            api_key: Some(String::new()),
            ..GeminiConfig::default()
        };
        assert_eq!(
            cfg.resolved_api_key(),
            std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty())
        );
    }
}
