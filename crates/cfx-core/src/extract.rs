//! Fiscal code extraction from free text such as window titles.

use std::ops::Range;

use tracing::debug;

use crate::code::FiscalCode;
use crate::{checksum, grammar};

/// What to do with a grammar match whose control character is wrong.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumPolicy {
    /// Return the first grammar match and tag whether it verified.
    ///
    /// A mismatch is treated as a typo in the source system rather than as
    /// a non-match.
    #[default]
    Lenient,
    /// Skip candidates whose control character does not verify.
    Strict,
}

/// A fiscal code found in a text.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Extraction {
    /// The match, uppercased, with any omocodia letters left in place.
    pub code: FiscalCode,
    /// Byte range of the match in the searched text.
    pub span: Range<usize>,
    /// Whether the control character matched.
    pub verified: bool,
}

impl Extraction {
    /// The code with canonical digits, as handed to the clipboard.
    pub fn normalized(&self) -> FiscalCode {
        self.code.normalized()
    }
}

/// Finds fiscal codes in text according to a [`ChecksumPolicy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeExtractor {
    policy: ChecksumPolicy,
}

impl CodeExtractor {
    pub fn new(policy: ChecksumPolicy) -> Self {
        Self { policy }
    }

    pub fn lenient() -> Self {
        Self::new(ChecksumPolicy::Lenient)
    }

    pub fn strict() -> Self {
        Self::new(ChecksumPolicy::Strict)
    }

    pub fn policy(&self) -> ChecksumPolicy {
        self.policy
    }

    /// Find the first acceptable fiscal code in `text`.
    pub fn extract(&self, text: &str) -> Option<Extraction> {
        for span in grammar::candidates(text) {
            let matched = &text[span.clone()];
            let verified = checksum::verify(matched);
            debug!(
                start = span.start,
                verified,
                policy = ?self.policy,
                "fiscal code candidate"
            );
            if verified || self.policy == ChecksumPolicy::Lenient {
                return Some(Extraction {
                    code: FiscalCode::from_match(matched),
                    span,
                    verified,
                });
            }
        }
        debug!(len = text.len(), policy = ?self.policy, "no fiscal code in text");
        None
    }
}

/// Leftmost fiscal code in `text`, uppercased, whether or not its control
/// character verifies.
pub fn extract(text: &str) -> Option<FiscalCode> {
    CodeExtractor::lenient()
        .extract(text)
        .map(|extraction| extraction.code)
}
