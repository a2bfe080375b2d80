//! Per-code findings for the `check` command.

use cfx_core::checksum::{self, INVALID_CIN};
use cfx_core::{BODY_LEN, CodeError, FiscalCode};
use serde::Serialize;

/// What `check` found out about one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeReport {
    pub input: String,
    /// Why the input is not a well-formed code, if it is not.
    pub problem: Option<String>,
    pub found_cin: Option<char>,
    /// Control character computed from the first 15 characters.
    pub expected_cin: Option<char>,
    pub verified: bool,
    pub omocodia: bool,
    pub normalized: Option<String>,
}

impl CodeReport {
    pub fn new(input: &str) -> Self {
        let trimmed = input.trim();
        match FiscalCode::parse(trimmed) {
            Ok(code) => {
                let expected = code.expected_control_char();
                let found = code.control_char();
                let verified = expected == found;
                let problem = (!verified)
                    .then(|| CodeError::ChecksumMismatch { expected, found }.to_string());
                Self {
                    input: trimmed.to_string(),
                    problem,
                    found_cin: Some(found),
                    expected_cin: Some(expected),
                    verified,
                    omocodia: code.has_omocodia(),
                    normalized: Some(code.normalized().into_inner()),
                }
            }
            Err(error) => Self {
                input: trimmed.to_string(),
                problem: Some(error.to_string()),
                found_cin: trimmed.chars().nth(BODY_LEN),
                expected_cin: Some(checksum::compute_cin(trimmed))
                    .filter(|&cin| cin != INVALID_CIN),
                verified: false,
                omocodia: false,
                normalized: None,
            },
        }
    }

    /// Well formed and verified.
    pub fn is_valid(&self) -> bool {
        self.problem.is_none()
    }
}

/// Reports for every input, in order.
pub fn check_all<I, S>(inputs: I) -> Vec<CodeReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    inputs
        .into_iter()
        .map(|input| CodeReport::new(input.as_ref()))
        .collect()
}
