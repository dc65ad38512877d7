//! Path management for the Akiba client
//!
//! Provides XDG-compliant path resolution for the settings and session files.
//!
//! ## Path Resolution Order
//!
//! 1. `AKIBA_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/akiba` or `~/.config/akiba`
//! 3. Windows: `%APPDATA%\akiba`

use std::path::PathBuf;

use crate::error::AkibaError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "AKIBA_DATA_DIR";

/// Manages all paths used by the Akiba client
#[derive(Debug, Clone)]
pub struct AkibaPaths {
    /// Base directory for all Akiba files
    base_dir: PathBuf,
}

impl AkibaPaths {
    /// Create a new AkibaPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, AkibaError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create AkibaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/akiba/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the persisted auth session
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), AkibaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| AkibaError::Io(format!("Failed to create base directory: {}", e)))
    }
}

/// Resolve the default directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AkibaError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("akiba"));
    }

    let base = directories::BaseDirs::new()
        .ok_or_else(|| AkibaError::Config("Could not determine home directory".into()))?;
    Ok(base.home_dir().join(".config").join("akiba"))
}

/// Resolve the default directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AkibaError> {
    let base = directories::BaseDirs::new()
        .ok_or_else(|| AkibaError::Config("Could not determine APPDATA directory".into()))?;
    Ok(base.config_dir().join("akiba"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AkibaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(paths.session_file(), temp_dir.path().join("session.json"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(DATA_DIR_ENV, custom_path);
        let paths = AkibaPaths::new().unwrap();
        std::env::remove_var(DATA_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = AkibaPaths::with_base_dir(temp_dir.path().join("nested").join("akiba"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
