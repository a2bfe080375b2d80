//! `check` report tests.

use cfx_cli::report::{CodeReport, check_all};

#[test]
fn reports_keep_input_order() {
    let reports = check_all(["RSSMRA80A01H501U", "RSSMRA80A01H501Q", "not a code"]);
    let valid: Vec<bool> = reports.iter().map(CodeReport::is_valid).collect();
    assert_eq!(valid, vec![true, false, false]);
}

#[test]
fn mismatch_report_snapshot() {
    let report = CodeReport::new("RSSMRA80A01H501Q");
    insta::assert_json_snapshot!(report, @r#"
    {
      "input": "RSSMRA80A01H501Q",
      "problem": "control character mismatch: expected 'U', found 'Q'",
      "found_cin": "Q",
      "expected_cin": "U",
      "verified": false,
      "omocodia": false,
      "normalized": "RSSMRA80A01H501Q"
    }
    "#);
}

#[test]
fn malformed_zone_report_snapshot() {
    let report = CodeReport::new("RSSMRA80X01H501U");
    insta::assert_json_snapshot!(report, @r#"
    {
      "input": "RSSMRA80X01H501U",
      "problem": "invalid month zone: 'X'",
      "found_cin": "U",
      "expected_cin": "S",
      "verified": false,
      "omocodia": false,
      "normalized": null
    }
    "#);
}
