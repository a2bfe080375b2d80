use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid hotkey: {0}")]
    InvalidHotkey(String),
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, SettingsError>;
