//! Persisted user settings for the fiscal code extractor.
//!
//! Settings are read by the application shell only; the recognition engine
//! in `cfx-core` never looks at them.

mod error;
pub mod hotkey;
mod settings;
mod store;

pub use error::{Result, SettingsError};
pub use hotkey::{HotkeyConfig, Modifiers, VirtualKey};
pub use settings::{GeneralSettings, Settings};
pub use store::SettingsStore;
