//! `extract` command tests: policy precedence, output forms, copy.

use anyhow::Result;
use cfx_cli::capture::ClipboardSink;
use cfx_cli::extract::{ExtractOptions, extract_texts, resolve_policy};
use cfx_core::ChecksumPolicy;
use cfx_settings::Settings;

const TYPO: &str = "ROSSI MARIO - RSSMRA80A01H501Q - Cartella clinica";
const OMOCODIC: &str = "MARTINI MARIA (MRTMRA85M01H5Q1R) - Scheda paziente";

#[derive(Default)]
struct RecordingSink {
    texts: Vec<String>,
}

impl ClipboardSink for RecordingSink {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.texts.push(text.to_string());
        Ok(())
    }
}

fn strict_settings() -> Settings {
    let mut settings = Settings::default();
    settings.general.checksum_policy = ChecksumPolicy::Strict;
    settings
}

fn run(texts: &[&str], options: ExtractOptions) -> (bool, String) {
    let mut out = Vec::new();
    let found = extract_texts(texts, options, &mut out, None).unwrap();
    (found, String::from_utf8(out).unwrap())
}

#[test]
fn flags_take_precedence_over_settings() {
    let strict = strict_settings();
    assert_eq!(resolve_policy(false, false, &strict), ChecksumPolicy::Strict);
    assert_eq!(resolve_policy(false, true, &strict), ChecksumPolicy::Lenient);
    let lenient = Settings::default();
    assert_eq!(resolve_policy(false, false, &lenient), ChecksumPolicy::Lenient);
    assert_eq!(resolve_policy(true, false, &lenient), ChecksumPolicy::Strict);
}

#[test]
fn strict_settings_reject_bad_control_character() {
    let options = ExtractOptions {
        policy: resolve_policy(false, false, &strict_settings()),
        ..Default::default()
    };
    let (found, output) = run(&[TYPO], options);
    assert!(!found);
    assert_eq!(output, "");
}

#[test]
fn lenient_flag_overrides_strict_settings() {
    let options = ExtractOptions {
        policy: resolve_policy(false, true, &strict_settings()),
        ..Default::default()
    };
    let (found, output) = run(&[TYPO], options);
    assert!(found);
    assert_eq!(output, "RSSMRA80A01H501Q\n");
}

#[test]
fn normalized_by_default_raw_on_request() {
    let (_, normalized) = run(&[OMOCODIC], ExtractOptions::default());
    assert_eq!(normalized, "MRTMRA85M01H501R\n");

    let raw = ExtractOptions {
        raw: true,
        ..Default::default()
    };
    let (_, output) = run(&[OMOCODIC], raw);
    assert_eq!(output, "MRTMRA85M01H5Q1R\n");
}

#[test]
fn json_lines_flag_omocodia() {
    let json = ExtractOptions {
        json: true,
        ..Default::default()
    };
    let (found, output) = run(&[OMOCODIC, "no code here", "RSSMRA80A01H501U"], json);
    assert!(found);
    let lines: Vec<serde_json::Value> = output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["code"], "MRTMRA85M01H501R");
    assert_eq!(lines[0]["raw"], "MRTMRA85M01H5Q1R");
    assert_eq!(lines[0]["span"]["start"], 15);
    assert_eq!(lines[0]["verified"], true);
    assert_eq!(lines[0]["omocodia"], true);
    assert_eq!(lines[1]["code"], "RSSMRA80A01H501U");
    assert_eq!(lines[1]["omocodia"], false);
}

#[test]
fn nothing_found() {
    let (found, output) = run(&[], ExtractOptions::default());
    assert!(!found);
    assert_eq!(output, "");

    let (found, _) = run(&["MilleWin versione 5.2 - Ricerca paziente"], ExtractOptions::default());
    assert!(!found);
}

#[test]
fn last_code_goes_to_clipboard() {
    let mut sink = RecordingSink::default();
    let mut out: Vec<u8> = Vec::new();
    let found = extract_texts(
        [OMOCODIC, "RSSMRA80A01H501U", "nothing"],
        ExtractOptions::default(),
        &mut out,
        Some(&mut sink),
    )
    .unwrap();
    assert!(found);
    assert_eq!(sink.texts, vec!["RSSMRA80A01H501U"]);
}

#[test]
fn clipboard_untouched_when_nothing_found() {
    let mut sink = RecordingSink::default();
    let found = extract_texts(
        ["nothing"],
        ExtractOptions::default(),
        &mut Vec::<u8>::new(),
        Some(&mut sink),
    )
    .unwrap();
    assert!(!found);
    assert!(sink.texts.is_empty());
}
