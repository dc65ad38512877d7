//! User settings for the Akiba client
//!
//! Manages the API base URL, display currency and list sizes.

use serde::{Deserialize, Serialize};

use super::paths::AkibaPaths;
use crate::error::AkibaError;

/// Environment variable that overrides the configured API base URL
pub const API_BASE_URL_ENV: &str = "AKIBA_API_BASE_URL";

/// User settings for the Akiba client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the REST API, without trailing slash
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Currency code shown next to amounts
    #[serde(default = "default_currency")]
    pub currency: String,

    /// `limit` sent when listing transactions
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Number of transactions on the dashboard
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:8000/api/v1".to_string()
}

fn default_currency() -> String {
    "KES".to_string()
}

fn default_page_size() -> u32 {
    100
}

fn default_recent_limit() -> u32 {
    5
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            currency: default_currency(),
            page_size: default_page_size(),
            recent_limit: default_recent_limit(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &AkibaPaths) -> Result<Self, AkibaError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| AkibaError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                AkibaError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AkibaPaths) -> Result<(), AkibaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| AkibaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| AkibaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Apply overrides: explicit flag first, then the environment
    pub fn with_overrides(mut self, api_url: Option<&str>) -> Result<Self, AkibaError> {
        let env_url = std::env::var(API_BASE_URL_ENV).ok();
        if let Some(url) = api_url.or(env_url.as_deref()) {
            self.api_base_url = url.to_string();
        }
        self.api_base_url = normalize_base_url(&self.api_base_url)?;
        Ok(self)
    }
}

/// Validate a base URL and strip any trailing slash
pub fn normalize_base_url(raw: &str) -> Result<String, AkibaError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AkibaError::Config(format!(
            "API base URL must start with http:// or https://: '{}'",
            raw
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8000/api/v1");
        assert_eq!(settings.currency, "KES");
        assert_eq!(settings.page_size, 100);
        assert_eq!(settings.recent_limit, 5);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AkibaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency = "USD".into();
        settings.page_size = 20;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.page_size, 20);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AkibaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency": "UGX"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency, "UGX");
        assert_eq!(loaded.page_size, 100);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AkibaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(AkibaError::Config(_))
        ));
    }

    #[test]
    fn test_flag_override_wins() {
        let settings = Settings::default()
            .with_overrides(Some("https://api.example.com/api/v1/"))
            .unwrap();
        assert_eq!(settings.api_base_url, "https://api.example.com/api/v1");
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/").unwrap(),
            "http://localhost:8000"
        );
        assert!(normalize_base_url("localhost:8000").is_err());
    }
}
