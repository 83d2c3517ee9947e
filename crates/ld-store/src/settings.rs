//! Settings file (`config.json`)
//!
//! Missing keys fall back to their defaults, so older or hand-trimmed files
//! keep loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default settings file name
pub const SETTINGS_FILE: &str = "config.json";

/// Draw program settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LotterySettings {
    /// Program name
    pub software_name: String,
    /// Banner shown above the draw
    pub title: String,
    /// Folder holding the store files
    pub data_folder: PathBuf,
    /// Draw count used when none is given
    pub default_count: u32,
    /// Rolling tick cadence (ms)
    pub display_interval: u64,
    /// Reserved-winner capability
    #[serde(alias = "is_allow_reserve")]
    pub allow_reserved: bool,
}

impl Default for LotterySettings {
    fn default() -> Self {
        Self {
            software_name: "Lucky Draw".to_string(),
            title: "Annual Party Lucky Draw".to_string(),
            data_folder: PathBuf::from("data"),
            default_count: 1,
            display_interval: 100,
            allow_reserved: false,
        }
    }
}

impl LotterySettings {
    /// Read settings, writing the defaults first if the file does not exist
    pub fn load_or_create(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            Self::default().save(path)?;
            log::info!("Created default settings at {}", path.display());
        }
        Self::load(path)
    }

    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate then write pretty JSON
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        self.validate()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Report every invalid field at once
    pub fn validate(&self) -> ConfigResult<()> {
        let mut errors = Vec::new();
        if self.default_count == 0 {
            errors.push("default_count must be greater than 0".to_string());
        }
        if self.display_interval == 0 {
            errors.push("display_interval must be greater than 0".to_string());
        }
        if self.data_folder.as_os_str().is_empty() {
            errors.push("data_folder must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    pub fn display_interval(&self) -> Duration {
        Duration::from_millis(self.display_interval)
    }

    /// Data folder resolved against the directory holding the settings file
    pub fn data_folder_relative_to(&self, settings_path: &Path) -> PathBuf {
        match settings_path.parent() {
            Some(dir) if self.data_folder.is_relative() => dir.join(&self.data_folder),
            _ => self.data_folder.clone(),
        }
    }
}
