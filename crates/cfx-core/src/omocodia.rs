//! Omocodia: letter substitutes for the digit positions of a fiscal code.
//!
//! When two people would receive the same code, the revenue agency replaces
//! digits (right to left) with letters from a fixed table:
//!
//! | digit  | 0 | 1 | 2 | 3 | 4 | 5 | 6 | 7 | 8 | 9 |
//! |--------|---|---|---|---|---|---|---|---|---|---|
//! | letter | L | M | N | P | Q | R | S | T | U | V |
//!
//! Any subset of the seven digit positions may be substituted independently.

use crate::code::CODE_LEN;

/// Letters standing for the digits `0..=9`, indexed by digit value.
pub const OMOCODIA_LETTERS: [u8; 10] = *b"LMNPQRSTUV";

/// 0-indexed positions that hold digits in a canonical code.
pub const ELIGIBLE_POSITIONS: [usize; 7] = [6, 7, 9, 10, 12, 13, 14];

/// Map an omocodia letter back to its digit (case-insensitive).
pub fn letter_to_digit(c: char) -> Option<char> {
    let upper = c.to_ascii_uppercase();
    OMOCODIA_LETTERS
        .iter()
        .position(|&letter| char::from(letter) == upper)
        .map(|digit| char::from(b'0' + digit as u8))
}

/// Map a digit to the letter that replaces it under omocodia.
pub fn digit_to_letter(c: char) -> Option<char> {
    c.to_digit(10)
        .map(|digit| char::from(OMOCODIA_LETTERS[digit as usize]))
}

/// Numeric value of a digit-position character: the digit itself, or the
/// digit an omocodia letter stands for.
pub(crate) fn digit_value(byte: u8) -> Option<u8> {
    match byte.to_ascii_uppercase() {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b => OMOCODIA_LETTERS
            .iter()
            .position(|&letter| letter == b)
            .map(|digit| digit as u8),
    }
}

/// Restore canonical digits at the seven eligible positions.
///
/// Other positions are returned as they are. Input that is not exactly 16
/// characters long comes back unchanged. Applying this twice is the same as
/// applying it once.
pub fn normalize(code: &str) -> String {
    if code.chars().count() != CODE_LEN {
        return code.to_string();
    }
    code.chars()
        .enumerate()
        .map(|(index, c)| {
            if ELIGIBLE_POSITIONS.contains(&index) {
                letter_to_digit(c).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// True when any eligible position carries a letter instead of a digit.
pub fn has_omocodia(code: &str) -> bool {
    code.chars().count() == CODE_LEN
        && code
            .chars()
            .enumerate()
            .any(|(index, c)| ELIGIBLE_POSITIONS.contains(&index) && c.is_ascii_alphabetic())
}

/// Replace the digits at `positions` with their omocodia letters.
///
/// Positions outside [`ELIGIBLE_POSITIONS`], or holding something other than
/// a digit, are skipped. The control character is not recomputed.
pub fn substitute(code: &str, positions: &[usize]) -> String {
    code.chars()
        .enumerate()
        .map(|(index, c)| {
            if positions.contains(&index) && ELIGIBLE_POSITIONS.contains(&index) {
                digit_to_letter(c).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_digits() {
        let pairs: Vec<(char, char)> = "LMNPQRSTUV".chars().zip('0'..='9').collect();
        for (letter, digit) in pairs {
            assert_eq!(letter_to_digit(letter), Some(digit));
            assert_eq!(letter_to_digit(letter.to_ascii_lowercase()), Some(digit));
            assert_eq!(digit_to_letter(digit), Some(letter));
        }
        assert_eq!(letter_to_digit('A'), None);
        assert_eq!(letter_to_digit('O'), None);
        assert_eq!(digit_to_letter('X'), None);
    }

    #[test]
    fn normalize_restores_single_position() {
        assert_eq!(normalize("MRTMRA85M01H5Q1Z"), "MRTMRA85M01H501Z");
    }

    #[test]
    fn normalize_restores_all_positions() {
        assert_eq!(normalize("MRTMRAURMLMHRLMB"), "MRTMRA85M01H501B");
    }

    #[test]
    fn normalize_leaves_letter_zones_alone() {
        // Month 'M' and birthplace letter 'L' are in letter-only positions.
        assert_eq!(normalize("LLLMMML1M01L501Z"), "LLLMMM01M01L501Z");
    }

    #[test]
    fn normalize_ignores_wrong_length() {
        assert_eq!(normalize("MRTMRA85M01H5Q1"), "MRTMRA85M01H5Q1");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("MRTMRA85M01H5Q1ZZ"), "MRTMRA85M01H5Q1ZZ");
    }

    #[test]
    fn normalize_is_idempotent_on_sample() {
        let once = normalize("MRTMRAURMLMHRLMB");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn detects_omocodia() {
        assert!(has_omocodia("MRTMRA85M01H5Q1R"));
        assert!(!has_omocodia("MRTMRA85M01H501B"));
        assert!(!has_omocodia("SHORT"));
    }

    #[test]
    fn substitute_only_touches_eligible_digits() {
        assert_eq!(
            substitute("MRTMRA85M01H501B", &[0, 8, 13]),
            "MRTMRA85M01H5L1B"
        );
        assert_eq!(
            substitute("MRTMRA85M01H501B", &ELIGIBLE_POSITIONS),
            "MRTMRAURMLMHRLMB"
        );
    }

    #[test]
    fn digit_value_covers_both_forms() {
        assert_eq!(digit_value(b'7'), Some(7));
        assert_eq!(digit_value(b'T'), Some(7));
        assert_eq!(digit_value(b't'), Some(7));
        assert_eq!(digit_value(b'A'), None);
    }
}
