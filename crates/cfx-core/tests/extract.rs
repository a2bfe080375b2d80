//! Extraction scenarios over window-title-like text.

use cfx_core::{CodeExtractor, checksum, extract, grammar, omocodia};

#[test]
fn extracts_verified_code_from_title() {
    let found = CodeExtractor::lenient()
        .extract("Paziente: MRTMRA85M01H501B - Cartella 123")
        .expect("match");
    assert_eq!(found.code.as_str(), "MRTMRA85M01H501B");
    assert!(found.verified);

    insta::assert_json_snapshot!(found, @r#"
    {
      "code": "MRTMRA85M01H501B",
      "span": {
        "start": 10,
        "end": 26
      },
      "verified": true
    }
    "#);
}

#[test]
fn wrong_control_character_is_returned_unverified() {
    // compute_cin("MRTMRA85M01H501") is 'B', so the 'Z' variant does not verify.
    let found = CodeExtractor::lenient()
        .extract("Paziente: MRTMRA85M01H501Z - Cartella 123")
        .expect("match");
    assert_eq!(found.code.as_str(), "MRTMRA85M01H501Z");
    assert!(!found.verified);
    assert_eq!(
        extract("Paziente: MRTMRA85M01H501Z - Cartella 123").map(|code| code.into_inner()),
        Some("MRTMRA85M01H501Z".to_string())
    );
}

#[test]
fn patient_search_title_has_no_code() {
    assert_eq!(extract("MilleWin versione 5.2 - Ricerca paziente"), None);
    assert_eq!(
        CodeExtractor::strict().extract("MilleWin versione 5.2 - Ricerca paziente"),
        None
    );
}

#[test]
fn typo_in_control_character_is_tolerated() {
    assert_eq!(checksum::compute_cin("RSSMRA80A01H501"), 'U');
    let code = extract("RSSMRA80A01H501Q").expect("match");
    assert_eq!(code.as_str(), "RSSMRA80A01H501Q");
    assert!(!code.is_verified());
}

#[test]
fn normalizes_single_omocodia_position() {
    assert_eq!(omocodia::normalize("MRTMRA85M01H5Q1Z"), "MRTMRA85M01H501Z");
}

#[test]
fn overlapping_candidates_yield_leftmost() {
    let text = format!("x {} y", "M".repeat(17));
    assert_eq!(grammar::candidates(&text).count(), 2);
    let found = CodeExtractor::lenient().extract(&text).expect("match");
    assert_eq!(found.span, 2..18);
}

#[test]
fn first_of_two_codes_wins() {
    let text = "BNCGVN75L15F205G, RSSMRA80A01H501U";
    assert_eq!(
        extract(text).map(|code| code.into_inner()),
        Some("BNCGVN75L15F205G".to_string())
    );
}

#[test]
fn code_glued_to_other_text_is_still_found() {
    // The grammar has no word boundaries; the first 16-character window that
    // fits the zones wins.
    let found = extract("CF:RSSMRA80A01H501U;").expect("match");
    assert_eq!(found.as_str(), "RSSMRA80A01H501U");
}

#[test]
fn omocodic_title_is_normalized_for_output() {
    let title = "ROSSI MARIO (MRTMRAURMLMHRLML) - Scheda";
    let found = CodeExtractor::strict().extract(title).expect("match");
    assert!(found.verified);
    assert!(found.code.has_omocodia());
    assert_eq!(found.normalized().as_str(), "MRTMRA85M01H501L");

    // Same body with the canonical code's control character does not verify.
    let stale = "ROSSI MARIO (MRTMRAURMLMHRLMB) - Scheda";
    assert_eq!(CodeExtractor::strict().extract(stale), None);
}
