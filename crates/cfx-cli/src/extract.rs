//! The `extract` command: one output line per text that holds a code.

use std::io::Write;
use std::ops::Range;

use anyhow::{Context, Result};
use cfx_core::{ChecksumPolicy, CodeExtractor, FiscalCode};
use cfx_settings::Settings;
use serde::Serialize;
use tracing::{info, warn};

use crate::capture::ClipboardSink;
use crate::logging::redact_value;

/// Policy for this run: a `--strict` or `--lenient` flag wins over the
/// persisted setting.
pub fn resolve_policy(strict: bool, lenient: bool, settings: &Settings) -> ChecksumPolicy {
    if strict {
        ChecksumPolicy::Strict
    } else if lenient {
        ChecksumPolicy::Lenient
    } else {
        settings.general.checksum_policy
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractOptions {
    pub policy: ChecksumPolicy,
    /// Print codes as found instead of normalized.
    pub raw: bool,
    /// One JSON object per line.
    pub json: bool,
}

/// One extracted code as printed by `extract --json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedLine {
    /// The printed value: normalized, or raw with `--raw`.
    pub code: FiscalCode,
    pub raw: FiscalCode,
    pub span: Range<usize>,
    pub verified: bool,
    pub omocodia: bool,
}

/// Write a line for every text holding a code, then give the last printed
/// code to `clipboard`.
///
/// Returns true when at least one text held a code.
pub fn extract_texts<I, S, W>(
    texts: I,
    options: ExtractOptions,
    out: &mut W,
    clipboard: Option<&mut dyn ClipboardSink>,
) -> Result<bool>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    W: Write + ?Sized,
{
    let extractor = CodeExtractor::new(options.policy);
    let mut last = None;
    for text in texts {
        let Some(extraction) = extractor.extract(text.as_ref()) else {
            continue;
        };
        if !extraction.verified {
            warn!(
                code = redact_value(extraction.code.as_str()),
                "control character does not verify"
            );
        }
        let normalized = extraction.normalized();
        let line = ExtractedLine {
            omocodia: extraction.code != normalized,
            code: if options.raw {
                extraction.code.clone()
            } else {
                normalized
            },
            raw: extraction.code,
            span: extraction.span,
            verified: extraction.verified,
        };
        if options.json {
            serde_json::to_writer(&mut *out, &line)?;
            writeln!(out).context("failed to write output")?;
        } else {
            writeln!(out, "{}", line.code).context("failed to write output")?;
        }
        last = Some(line.code);
    }

    if let (Some(code), Some(clipboard)) = (&last, clipboard) {
        clipboard.set_text(code.as_str())?;
        info!(code = redact_value(code.as_str()), "copied to clipboard");
    }
    Ok(last.is_some())
}
