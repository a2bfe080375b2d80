//! System clipboard sink.
//!
//! Returns errors where no clipboard is reachable (SSH sessions, headless
//! environments), so callers can report instead of crashing.

use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::capture::ClipboardSink;

/// The desktop clipboard.
pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("clipboard not available")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard
            .set_text(text)
            .context("failed to set clipboard text")
    }
}
