//! Structural grammar of a fiscal code.
//!
//! The matcher walks the seven zones of a 16-character candidate and checks
//! each against its character classes. Digit positions accept both digits
//! and omocodia letters, so the day and birthplace rules are expressed on
//! the numeric value of each position rather than on its spelling.
//!
//! Matching is ASCII case-insensitive.

use std::ops::Range;

use crate::code::{CODE_LEN, Zone};
use crate::error::{CodeError, Result};
use crate::omocodia::digit_value;

/// Month letters, January through December.
pub const MONTH_LETTERS: [u8; 12] = *b"ABCDEHLMPRST";

const THIRTY_DAY_MONTHS: &[u8] = b"DHPS";
const THIRTY_ONE_DAY_MONTHS: &[u8] = b"ACELMRT";

fn is_vowel(byte: u8) -> bool {
    matches!(byte, b'A' | b'E' | b'I' | b'O' | b'U')
}

fn is_consonant(byte: u8) -> bool {
    byte.is_ascii_uppercase() && !is_vowel(byte)
}

/// Surname and given-name triplets: a letter followed by vowels (with `X`
/// as filler for short names), or two consonants followed by any letter.
fn name_triplet(zone: &[u8]) -> bool {
    let [a, b, c] = [zone[0], zone[1], zone[2]];
    (a.is_ascii_uppercase() && is_vowel(b) && (is_vowel(c) || c == b'X'))
        || (is_consonant(a) && is_consonant(b) && c.is_ascii_uppercase())
}

fn year(zone: &[u8]) -> bool {
    zone.iter().all(|&byte| digit_value(byte).is_some())
}

fn month(zone: &[u8]) -> bool {
    MONTH_LETTERS.contains(&zone[0])
}

/// Day of birth (plus 40 for women), checked against the month length.
fn day(month: u8, zone: &[u8]) -> bool {
    let (Some(tens), Some(units)) = (digit_value(zone[0]), digit_value(zone[1])) else {
        return false;
    };
    match tens {
        0 | 4 => (1..=9).contains(&units),
        1 | 2 | 5 | 6 => true,
        3 | 7 if THIRTY_DAY_MONTHS.contains(&month) => units == 0,
        3 | 7 if THIRTY_ONE_DAY_MONTHS.contains(&month) => units <= 1,
        _ => false,
    }
}

/// Cadastral code: `A`-`M` plus a non-zero number, or `Z` (foreign state)
/// plus a number whose first digit is non-zero.
fn birthplace(zone: &[u8]) -> bool {
    let [Some(hundreds), Some(tens), Some(units)] =
        [zone[1], zone[2], zone[3]].map(digit_value)
    else {
        return false;
    };
    match zone[0] {
        b'A'..=b'M' => hundreds + tens + units > 0,
        b'Z' => hundreds > 0,
        _ => false,
    }
}

fn control(zone: &[u8]) -> bool {
    zone[0].is_ascii_uppercase()
}

/// Check a 16-byte window. Returns the first zone that fails.
fn check_window(window: &[u8]) -> std::result::Result<(), Zone> {
    debug_assert_eq!(window.len(), CODE_LEN);
    let mut upper = [0u8; CODE_LEN];
    for (slot, byte) in upper.iter_mut().zip(window) {
        *slot = byte.to_ascii_uppercase();
    }
    let part = |zone: Zone| &upper[zone.range()];
    let month_letter = upper[Zone::Month.range().start];

    let checks: [(Zone, bool); 7] = [
        (Zone::Surname, name_triplet(part(Zone::Surname))),
        (Zone::GivenName, name_triplet(part(Zone::GivenName))),
        (Zone::Year, year(part(Zone::Year))),
        (Zone::Month, month(part(Zone::Month))),
        (Zone::Day, day(month_letter, part(Zone::Day))),
        (Zone::Birthplace, birthplace(part(Zone::Birthplace))),
        (Zone::Control, control(part(Zone::Control))),
    ];
    match checks.iter().find(|(_, ok)| !ok) {
        Some((zone, _)) => Err(*zone),
        None => Ok(()),
    }
}

/// Check that `candidate` has the shape of a fiscal code.
///
/// Reports the length, or the first zone that does not match. The control
/// character is only checked for being a letter; see
/// [`checksum::verify`](crate::checksum::verify) for its value.
pub fn check(candidate: &str) -> Result<()> {
    let len = candidate.chars().count();
    if len != CODE_LEN {
        return Err(CodeError::InvalidLength { len });
    }
    if !candidate.is_ascii() {
        // 16 chars but multi-byte: locate the zone holding the first non-ASCII char.
        let position = candidate
            .chars()
            .position(|c| !c.is_ascii())
            .unwrap_or_default();
        let zone = Zone::containing(position);
        let range = zone.range();
        return Err(CodeError::InvalidZone {
            zone,
            value: candidate
                .chars()
                .skip(range.start)
                .take(range.len())
                .collect(),
        });
    }
    check_window(candidate.as_bytes()).map_err(|zone| CodeError::InvalidZone {
        zone,
        value: candidate[zone.range()].to_ascii_uppercase(),
    })
}

/// True iff `candidate` is exactly 16 characters and matches the grammar.
pub fn matches(candidate: &str) -> bool {
    candidate.len() == CODE_LEN && check_window(candidate.as_bytes()).is_ok()
}

/// Byte span of the leftmost grammar match inside `text`.
pub fn search(text: &str) -> Option<Range<usize>> {
    candidates(text).next()
}

/// Every grammar match inside `text`, left to right.
///
/// Overlapping matches are all reported, in order of their start offset.
pub fn candidates(text: &str) -> Candidates<'_> {
    Candidates {
        bytes: text.as_bytes(),
        next_start: 0,
    }
}

/// Iterator returned by [`candidates`].
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    bytes: &'a [u8],
    next_start: usize,
}

impl Iterator for Candidates<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next_start + CODE_LEN <= self.bytes.len() {
            let start = self.next_start;
            self.next_start += 1;
            // A window of ASCII alphanumerics always starts on a char boundary.
            let window = &self.bytes[start..start + CODE_LEN];
            if window.iter().all(u8::is_ascii_alphanumeric) && check_window(window).is_ok() {
                return Some(start..start + CODE_LEN);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_canonical_code() {
        assert!(matches("RSSMRA80A01H501U"));
        assert!(matches("MRTMRA85M01H501Z"));
        assert!(matches("rssmra80a01h501u"));
    }

    #[test]
    fn accepts_omocodia_at_every_digit_position() {
        assert!(matches("MRTMRA85M01H5Q1Z"));
        assert!(matches("MRTMRAURMLMHRLMB"));
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(!matches(""));
        assert!(!matches("RSSMRA80A01H501"));
        assert!(!matches("RSSMRA80A01H501UX"));
        assert_eq!(
            check("RSSMRA80A01H501"),
            Err(CodeError::InvalidLength { len: 15 })
        );
    }

    #[test]
    fn month_must_be_one_of_twelve_letters() {
        for letter in b'A'..=b'Z' {
            let code = format!("RSSMRA80{}01H501U", char::from(letter));
            assert_eq!(
                matches(&code),
                MONTH_LETTERS.contains(&letter),
                "month letter {}",
                char::from(letter)
            );
        }
    }

    #[test]
    fn name_triplets() {
        // Consonant-consonant-any and letter-vowel-vowel/X.
        assert!(matches("BBAMRA80A01H501U"));
        assert!(matches("FOXMRA80A01H501U"));
        assert!(matches("AIEMRA80A01H501U"));
        // Vowel followed by consonant is never produced.
        assert_eq!(
            check("ABCMRA80A01H501U"),
            Err(CodeError::InvalidZone {
                zone: Zone::Surname,
                value: "ABC".to_string()
            })
        );
        assert!(!matches("RSSMAB80A01H501U"));
        assert!(!matches("RS1MRA80A01H501U"));
    }

    #[test]
    fn day_respects_month_length() {
        // 31 January, 30 April, no 31 April, no 30 February.
        assert!(matches("RSSMRA80A31H501U"));
        assert!(matches("RSSMRA80D30H501U"));
        assert!(!matches("RSSMRA80D31H501U"));
        assert!(!matches("RSSMRA80B30H501U"));
        // Female days are offset by 40.
        assert!(matches("RSSMRA80A41H501U"));
        assert!(matches("RSSMRA80A71H501U"));
        assert!(!matches("RSSMRA80A00H501U"));
        assert!(!matches("RSSMRA80A40H501U"));
        assert!(!matches("RSSMRA80A81H501U"));
        // Omocodia letters keep the day rules: 'P' is 3, 'L' is 0.
        assert!(matches("RSSMRA80DPLH501U"));
        assert!(!matches("RSSMRA80BPLH501U"));
    }

    #[test]
    fn omocodic_day_tens_use_digit_values() {
        // 'N' is 2: day 25.
        assert!(matches("RSSMRA80AN5H501U"));
        assert!(matches("RSSMRA80ANRH501U"));
        // 'L' is 0: day 00 and day 00 in letters.
        assert!(!matches("RSSMRA80AL0H501U"));
        assert!(!matches("RSSMRA80ALLH501U"));
        // 'Q' is 4: female day 41.
        assert!(matches("RSSMRA80AQ1H501U"));
    }

    #[test]
    fn birthplace_rules() {
        assert!(matches("RSSMRA80A01M001U"));
        assert!(matches("RSSMRA80A01Z100U"));
        assert!(!matches("RSSMRA80A01H000U"));
        assert!(!matches("RSSMRA80A01Z099U"));
        assert!(!matches("RSSMRA80A01N501U"));
        assert_eq!(
            check("RSSMRA80A01HLLLU"),
            Err(CodeError::InvalidZone {
                zone: Zone::Birthplace,
                value: "HLLL".to_string()
            })
        );
    }

    #[test]
    fn control_must_be_a_letter() {
        assert!(!matches("RSSMRA80A01H5011"));
    }

    #[test]
    fn check_reports_non_ascii_zone() {
        assert_eq!(
            check("RSSMRÀ80A01H501U"),
            Err(CodeError::InvalidZone {
                zone: Zone::GivenName,
                value: "MRÀ".to_string()
            })
        );
    }

    #[test]
    fn search_finds_embedded_code() {
        let text = "Paziente: MRTMRA85M01H501B - Cartella 123";
        let span = search(text).expect("match");
        assert_eq!(&text[span], "MRTMRA85M01H501B");
    }

    #[test]
    fn search_handles_multibyte_text() {
        let text = "Città: Milano - RSSMRA80A01H501U è il codice";
        let span = search(text).expect("match");
        assert_eq!(&text[span], "RSSMRA80A01H501U");
    }

    #[test]
    fn search_without_match() {
        assert_eq!(search("MilleWin versione 5.2 - Ricerca paziente"), None);
        assert_eq!(search(""), None);
    }

    #[test]
    fn candidates_include_overlaps_in_order() {
        let text = "M".repeat(17);
        let spans: Vec<_> = candidates(&text).collect();
        assert_eq!(spans, vec![0..16, 1..17]);
        assert_eq!(search(&text), Some(0..16));
    }
}
