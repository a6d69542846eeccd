//! Application configuration and path resolution

use std::path::{Path, PathBuf};

/// Name of the per-user configuration subfolder
pub const APP_DIR_NAME: &str = "MultiTool";

/// File holding the persisted profile set
pub const PROFILES_FILE_NAME: &str = "profiles.json";

/// Overrides the configuration directory (used by tests and portable installs)
pub const CONFIG_DIR_ENV: &str = "MULTITOOL_CONFIG_DIR";

/// Overrides the directory icons are loaded from
pub const ASSETS_DIR_ENV: &str = "MULTITOOL_ASSETS_DIR";

/// Resolved locations the core reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `profiles.json`
    pub config_dir: PathBuf,
    /// Directory holding icon assets
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// Build a config from explicit directories
    #[must_use]
    pub fn with_dirs(config_dir: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    /// Resolve directories from the environment
    ///
    /// `MULTITOOL_CONFIG_DIR` wins; otherwise the platform config directory
    /// plus `MultiTool`, or the working directory when none is known.
    #[must_use]
    pub fn from_env() -> Self {
        let config_dir = std::env::var_os(CONFIG_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(default_config_dir, PathBuf::from);

        let assets_dir = std::env::var_os(ASSETS_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from("assets"), PathBuf::from);

        Self {
            config_dir,
            assets_dir,
        }
    }

    /// Path of the persisted profile set
    #[must_use]
    pub fn profiles_path(&self) -> PathBuf {
        self.config_dir.join(PROFILES_FILE_NAME)
    }

    /// Path of an icon asset
    #[must_use]
    pub fn asset_path(&self, file_name: &str) -> PathBuf {
        self.assets_dir.join(file_name)
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir().map_or_else(|| Path::new(".").to_path_buf(), |dir| dir.join(APP_DIR_NAME))
}
