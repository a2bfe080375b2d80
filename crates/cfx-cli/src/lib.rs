//! CLI library components for the fiscal code extractor.

pub mod capture;
#[cfg(feature = "clipboard")]
pub mod clipboard;
pub mod extract;
pub mod logging;
pub mod report;
