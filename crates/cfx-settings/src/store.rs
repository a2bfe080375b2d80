//! Settings persistence - load and save settings to disk.
//!
//! The default file lives in the platform-specific configuration folder:
//! - Windows: %APPDATA%/cfx/CF Extractor/config/settings.toml
//! - macOS: ~/Library/Application Support/it.cfx.CF-Extractor/settings.toml
//! - Linux: ~/.config/cfextractor/settings.toml

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{Result, SettingsError};
use crate::settings::Settings;

const APP_QUALIFIER: &str = "it";
const APP_ORG: &str = "cfx";
const APP_NAME: &str = "CF Extractor";
const CONFIG_FILENAME: &str = "settings.toml";

/// A settings file at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform configuration directory.
    pub fn default_location() -> Result<Self> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| Self::new(dirs.config_dir().join(CONFIG_FILENAME)))
            .ok_or(SettingsError::NoConfigDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file; `Ok(None)` when it does not exist.
    pub fn try_load(&self) -> Result<Option<Settings>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        Ok(Some(toml::from_str(&content)?))
    }

    /// Load settings, falling back to defaults if:
    /// - the file doesn't exist
    /// - the file cannot be read or parsed
    pub fn load(&self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => {
                tracing::info!(path = %self.path.display(), "loaded settings");
                settings
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no settings file, using defaults");
                Settings::default()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), "{e}, using defaults");
                Settings::default()
            }
        }
    }

    /// Write settings, creating the parent directory if needed.
    pub fn save(&self, settings: &Settings) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(settings)?;
        fs::write(&self.path, content).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "saved settings");
        Ok(())
    }
}
