//! Control character (CIN) computation.
//!
//! The 16th character is derived from the first 15: each character is
//! converted through the odd or even table according to its 1-indexed
//! position, the values are summed, and `sum % 26` selects a letter.
//!
//! The tables are the ones published with the national algorithm and are
//! not derivable from a formula. The sum runs over the raw characters, so an
//! omocodic code carries its own control character.

use crate::code::{BODY_LEN, CODE_LEN};
use crate::grammar;

/// Returned by [`compute_cin`] when the input is too short.
pub const INVALID_CIN: char = '?';

/// Values at odd 1-indexed positions (1, 3, ..., 15), indexed by
/// `0-9` then `A-Z`.
pub const ODD_VALUES: [u8; 36] = [
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // 0-9
    1, 0, 5, 7, 9, 13, 15, 17, 19, 21, // A-J
    2, 4, 18, 20, 11, 3, 6, 8, 12, 14, // K-T
    16, 10, 22, 25, 24, 23, // U-Z
];

/// Values at even 1-indexed positions (2, 4, ..., 14), indexed by
/// `0-9` then `A-Z`.
pub const EVEN_VALUES: [u8; 36] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // 0-9
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, // A-J
    10, 11, 12, 13, 14, 15, 16, 17, 18, 19, // K-T
    20, 21, 22, 23, 24, 25, // U-Z
];

/// Table index of a character; anything outside `[0-9A-Za-z]` counts as 0.
fn table_index(c: char) -> usize {
    match c.to_ascii_uppercase() {
        d @ '0'..='9' => d as usize - '0' as usize,
        l @ 'A'..='Z' => l as usize - 'A' as usize + 10,
        _ => 0,
    }
}

/// Compute the control character from the first 15 characters of `code`.
///
/// Extra characters past the 15th are ignored. Returns [`INVALID_CIN`] when
/// fewer than 15 characters are supplied.
pub fn compute_cin(code: &str) -> char {
    if code.chars().count() < BODY_LEN {
        return INVALID_CIN;
    }
    let sum: u32 = code
        .chars()
        .take(BODY_LEN)
        .enumerate()
        .map(|(index, c)| {
            let table = if index % 2 == 0 {
                &ODD_VALUES
            } else {
                &EVEN_VALUES
            };
            u32::from(table[table_index(c)])
        })
        .sum();
    char::from(b'A' + (sum % 26) as u8)
}

/// True when `code` is 16 characters long and its last character matches
/// the computed control character (case-insensitive).
pub fn verify(code: &str) -> bool {
    if code.chars().count() != CODE_LEN {
        return false;
    }
    code.chars()
        .next_back()
        .is_some_and(|found| found.to_ascii_uppercase() == compute_cin(code))
}

/// Shape and checksum together.
pub fn is_valid(code: &str) -> bool {
    grammar::matches(code) && verify(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn computes_known_control_characters() {
        assert_eq!(compute_cin("RSSMRA80A01H501"), 'U');
        assert_eq!(compute_cin("MRTMRA85M01H501"), 'B');
        assert_eq!(compute_cin("BNCGVN75L15F205"), 'G');
    }

    #[test]
    fn ignores_characters_past_fifteen() {
        assert_eq!(compute_cin("RSSMRA80A01H501U"), 'U');
        assert_eq!(compute_cin("RSSMRA80A01H501XYZ"), 'U');
    }

    #[test]
    fn is_case_insensitive() {
        assert_eq!(compute_cin("rssmra80a01h501"), 'U');
        assert!(verify("rssmra80a01h501u"));
    }

    #[test]
    fn short_input_yields_sentinel() {
        assert_eq!(compute_cin("RSSMRA80A01H50"), INVALID_CIN);
        assert_eq!(compute_cin(""), INVALID_CIN);
    }

    #[test]
    fn verify_requires_exact_length() {
        assert!(verify("RSSMRA80A01H501U"));
        assert!(!verify("RSSMRA80A01H501"));
        assert!(!verify("RSSMRA80A01H501UU"));
    }

    #[test]
    fn verify_rejects_wrong_control_character() {
        assert!(!verify("RSSMRA80A01H501Q"));
        assert!(!verify("MRTMRA85M01H501Z"));
    }

    #[test]
    fn omocodic_code_has_its_own_control_character() {
        // '0' at an even position is worth 0, 'Q' is worth 16.
        assert_eq!(compute_cin("MRTMRA85M01H5Q1"), 'R');
        assert!(verify("MRTMRA85M01H5Q1R"));
        assert!(!verify("MRTMRA85M01H5Q1B"));
    }

    #[test]
    fn tables_match_published_values() {
        assert_eq!(ODD_VALUES[table_index('0')], 1);
        assert_eq!(ODD_VALUES[table_index('9')], 21);
        assert_eq!(ODD_VALUES[table_index('K')], 2);
        assert_eq!(ODD_VALUES[table_index('O')], 11);
        assert_eq!(ODD_VALUES[table_index('Z')], 23);
        assert_eq!(EVEN_VALUES[table_index('Z')], 25);
        assert_eq!(EVEN_VALUES[table_index('7')], 7);
    }

    #[test]
    fn is_valid_needs_shape_and_checksum() {
        assert!(is_valid("RSSMRA80A01H501U"));
        assert!(!is_valid("RSSMRA80A01H501Q"));
        // Checksum alone is not enough: 'F' is not a month letter.
        let body = "RSSMRA80F01H501";
        let code = format!("{body}{}", compute_cin(body));
        assert!(verify(&code));
        assert!(!is_valid(&code));
    }
}
