use cfx_core::ChecksumPolicy;
use serde::{Deserialize, Serialize};

use crate::hotkey::HotkeyConfig;

/// Application settings (persisted to disk as TOML).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub hotkey: HotkeyConfig,
}

/// General application preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Start with the user session. Applied by the autostart collaborator.
    pub autostart: bool,
    /// Whether codes with a wrong control character are still copied.
    pub checksum_policy: ChecksumPolicy,
}
