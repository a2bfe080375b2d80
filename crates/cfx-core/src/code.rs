use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::error::{CodeError, Result};
use crate::{checksum, grammar, omocodia};

/// Length of a complete fiscal code.
pub const CODE_LEN: usize = 16;

/// Length of the part covered by the control character.
pub const BODY_LEN: usize = 15;

/// Structural zones of a fiscal code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    /// Positions 1-3: consonants/vowels of the surname.
    Surname,
    /// Positions 4-6: consonants/vowels of the given name.
    GivenName,
    /// Positions 7-8: last two digits of the birth year.
    Year,
    /// Position 9: month letter.
    Month,
    /// Positions 10-11: day of birth, plus 40 for women.
    Day,
    /// Positions 12-15: cadastral code of the birthplace.
    Birthplace,
    /// Position 16: control character.
    Control,
}

impl Zone {
    pub const ALL: [Zone; 7] = [
        Zone::Surname,
        Zone::GivenName,
        Zone::Year,
        Zone::Month,
        Zone::Day,
        Zone::Birthplace,
        Zone::Control,
    ];

    /// 0-indexed position range covered by the zone.
    pub fn range(self) -> Range<usize> {
        match self {
            Zone::Surname => 0..3,
            Zone::GivenName => 3..6,
            Zone::Year => 6..8,
            Zone::Month => 8..9,
            Zone::Day => 9..11,
            Zone::Birthplace => 11..15,
            Zone::Control => 15..16,
        }
    }

    /// Zone holding a 0-indexed position; positions past the end map to
    /// [`Zone::Control`].
    pub fn containing(position: usize) -> Zone {
        Zone::ALL
            .into_iter()
            .find(|zone| zone.range().contains(&position))
            .unwrap_or(Zone::Control)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Zone::Surname => "surname",
            Zone::GivenName => "given name",
            Zone::Year => "year",
            Zone::Month => "month",
            Zone::Day => "day",
            Zone::Birthplace => "birthplace",
            Zone::Control => "control",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An Italian fiscal code with a valid shape, stored uppercase.
///
/// The control character is not required to verify; use
/// [`FiscalCode::parse_verified`] or [`FiscalCode::is_verified`] when it
/// matters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FiscalCode(String);

impl FiscalCode {
    /// Parse a code, checking its shape. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        grammar::check(trimmed)?;
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Parse a code, checking both its shape and its control character.
    pub fn parse_verified(value: &str) -> Result<Self> {
        let code = Self::parse(value)?;
        let expected = checksum::compute_cin(&code.0);
        let found = code.control_char();
        if expected != found {
            return Err(CodeError::ChecksumMismatch { expected, found });
        }
        Ok(code)
    }

    /// Wrap a string already known to match the grammar.
    pub(crate) fn from_match(matched: &str) -> Self {
        debug_assert!(grammar::matches(matched));
        Self(matched.to_ascii_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    /// The 16th character.
    pub fn control_char(&self) -> char {
        char::from(self.0.as_bytes()[BODY_LEN])
    }

    /// Control character computed from the first 15 characters.
    pub fn expected_control_char(&self) -> char {
        checksum::compute_cin(&self.0)
    }

    /// Characters of one zone.
    pub fn zone(&self, zone: Zone) -> &str {
        &self.0[zone.range()]
    }

    pub fn is_verified(&self) -> bool {
        checksum::verify(&self.0)
    }

    pub fn has_omocodia(&self) -> bool {
        omocodia::has_omocodia(&self.0)
    }

    /// Same code with canonical digits at every omocodia position.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self(omocodia::normalize(&self.0))
    }
}

impl fmt::Display for FiscalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FiscalCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for FiscalCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for FiscalCode {
    type Error = CodeError;

    fn try_from(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl serde::Serialize for FiscalCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for FiscalCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
