//! The hotkey pipeline: find the clinical record window, pull the fiscal
//! code out of its title and hand it to the clipboard.
//!
//! Window enumeration and the clipboard are behind [`WindowLocator`] and
//! [`ClipboardSink`] so the pipeline runs the same against a live desktop,
//! a JSON snapshot, or a test double.

use std::io::{self, Read, Write};

use anyhow::{Context, Result};
use cfx_core::{CodeExtractor, FiscalCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use crate::logging::redact_value;

/// Window class prefix of the clinical record application.
pub const TARGET_CLASS_PREFIX: &str = "FNWND";
/// Executable name of the clinical record application.
pub const TARGET_PROCESS_NAME: &str = "millewin.exe";
/// Titles longer than this usually carry the open patient's details.
const PATIENT_TITLE_MIN_CHARS: usize = 30;
const SEARCH_SCREEN_PREFIX: &str = "MilleWin versione";
const SEARCH_SCREEN_MARKER: &str = "Ricerca paziente";

/// A top-level window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowInfo {
    pub title: String,
    pub class_name: String,
    /// Executable file name, when it could be read.
    #[serde(default)]
    pub process_name: Option<String>,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl WindowInfo {
    pub fn new(title: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            class_name: class_name.into(),
            process_name: None,
            visible: true,
        }
    }

    #[must_use]
    pub fn with_process(mut self, process_name: impl Into<String>) -> Self {
        self.process_name = Some(process_name.into());
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

fn default_visible() -> bool {
    true
}

/// Source of the current top-level windows.
pub trait WindowLocator {
    fn windows(&self) -> Result<Vec<WindowInfo>>;
}

/// Destination for a captured code.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Windows taken from a JSON array captured earlier.
#[derive(Debug, Clone, Default)]
pub struct SnapshotLocator {
    windows: Vec<WindowInfo>,
}

impl SnapshotLocator {
    pub fn new(windows: Vec<WindowInfo>) -> Self {
        Self { windows }
    }

    /// Read a JSON array of windows.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let windows: Vec<WindowInfo> =
            serde_json::from_reader(reader).context("invalid window snapshot")?;
        Ok(Self::new(windows))
    }
}

impl WindowLocator for SnapshotLocator {
    fn windows(&self) -> Result<Vec<WindowInfo>> {
        Ok(self.windows.clone())
    }
}

/// Writes each code as a line, standing in for the clipboard.
#[derive(Debug)]
pub struct StdoutSink<W = io::Stdout> {
    writer: W,
}

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> StdoutSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ClipboardSink for StdoutSink<W> {
    fn set_text(&mut self, text: &str) -> Result<()> {
        writeln!(self.writer, "{text}").context("failed to write code")?;
        self.writer.flush().context("failed to write code")
    }
}

/// A code handed to the clipboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapturedCode {
    /// The code as it appeared in the title.
    pub raw: FiscalCode,
    /// The value given to the sink.
    pub normalized: FiscalCode,
    pub verified: bool,
}

impl CapturedCode {
    /// True when the title carried omocodia letters.
    pub fn from_omocodia(&self) -> bool {
        self.raw != self.normalized
    }

    /// Overlay text: the code, flagged when it came from an omocodic title.
    pub fn notification(&self) -> String {
        if self.from_omocodia() {
            format!("{} (da omocodice)", self.normalized)
        } else {
            self.normalized.to_string()
        }
    }
}

/// Result of one capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CaptureOutcome {
    /// No clinical record window is open.
    WindowNotFound,
    /// The window is open but shows no patient.
    NoPatient,
    Copied(CapturedCode),
}

impl CaptureOutcome {
    /// Short message for the user.
    pub fn message(&self) -> String {
        match self {
            Self::WindowNotFound => "Avvia MilleWin per poter estrarre il codice fiscale".to_string(),
            Self::NoPatient => {
                "Apri la cartella di un paziente per poterne estrarre il codice fiscale".to_string()
            }
            Self::Copied(code) => code.notification(),
        }
    }
}

/// Find the clinical record window, extract its fiscal code and give the
/// normalized code to `sink`.
///
/// # Errors
///
/// Fails when the windows cannot be listed or the sink rejects the code.
pub fn capture<L, S>(locator: &L, sink: &mut S, extractor: &CodeExtractor) -> Result<CaptureOutcome>
where
    L: WindowLocator + ?Sized,
    S: ClipboardSink + ?Sized,
{
    let windows = locator.windows().context("failed to list windows")?;
    let Some(window) = select_target_window(&windows) else {
        info!(windows = windows.len(), "clinical record window not found");
        return Ok(CaptureOutcome::WindowNotFound);
    };
    debug!(title = redact_value(&window.title), "selected window");

    if is_patient_search_screen(&window.title) {
        info!("patient search screen is open");
        return Ok(CaptureOutcome::NoPatient);
    }
    let Some(extraction) = extractor.extract(&window.title) else {
        info!("no fiscal code in window title");
        return Ok(CaptureOutcome::NoPatient);
    };

    let normalized = extraction.normalized();
    sink.set_text(normalized.as_str())?;
    let captured = CapturedCode {
        raw: extraction.code,
        normalized,
        verified: extraction.verified,
    };
    info!(
        code = redact_value(captured.normalized.as_str()),
        verified = captured.verified,
        omocodia = captured.from_omocodia(),
        "fiscal code captured"
    );
    Ok(CaptureOutcome::Copied(captured))
}

/// Pick the clinical record window out of `windows`.
///
/// Only visible windows whose class starts with [`TARGET_CLASS_PREFIX`]
/// count. Windows whose process is known and is not the clinical record executable
/// are skipped, unless that leaves nothing; then the class name alone
/// decides. The first candidate with a long title wins, else the first
/// candidate.
pub fn select_target_window(windows: &[WindowInfo]) -> Option<&WindowInfo> {
    let by_class: Vec<&WindowInfo> = windows
        .iter()
        .filter(|w| w.visible && has_target_class(w))
        .collect();
    let by_process: Vec<&WindowInfo> = by_class
        .iter()
        .copied()
        .filter(|w| process_matches(w))
        .collect();
    trace!(
        class = by_class.len(),
        process = by_process.len(),
        "window candidates"
    );
    let candidates = if by_process.is_empty() {
        by_class
    } else {
        by_process
    };
    candidates
        .iter()
        .find(|w| w.title.chars().count() > PATIENT_TITLE_MIN_CHARS)
        .or_else(|| candidates.first())
        .copied()
}

/// True for the title the application shows while no patient is open.
pub fn is_patient_search_screen(title: &str) -> bool {
    title.starts_with(SEARCH_SCREEN_PREFIX) && title.contains(SEARCH_SCREEN_MARKER)
}

fn has_target_class(window: &WindowInfo) -> bool {
    window
        .class_name
        .get(..TARGET_CLASS_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(TARGET_CLASS_PREFIX))
}

fn process_matches(window: &WindowInfo) -> bool {
    window
        .process_name
        .as_deref()
        .is_none_or(|name| name.eq_ignore_ascii_case(TARGET_PROCESS_NAME))
}
