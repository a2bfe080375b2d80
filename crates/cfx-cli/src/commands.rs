use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::warn;

use cfx_cli::capture::{self, CaptureOutcome, ClipboardSink, SnapshotLocator, StdoutSink};
use cfx_cli::extract::{ExtractOptions, extract_texts, resolve_policy};
use cfx_cli::logging::redact_value;
use cfx_cli::report::{CodeReport, check_all};
use cfx_core::checksum::{self, INVALID_CIN};
use cfx_core::{BODY_LEN, ChecksumPolicy, CodeExtractor, grammar, omocodia};
use cfx_settings::{HotkeyConfig, Settings, SettingsStore};

use crate::cli::{CaptureArgs, CheckArgs, CinArgs, ConfigCommand, ExtractArgs, NormalizeArgs, PolicyArg};

pub fn run_extract(args: &ExtractArgs, settings: &Settings) -> Result<bool> {
    let options = ExtractOptions {
        policy: resolve_policy(args.strict, args.lenient, settings),
        raw: args.raw,
        json: args.json,
    };
    // Fail before any output when no clipboard is reachable.
    let mut clipboard = if args.copy {
        Some(system_clipboard()?)
    } else {
        None
    };
    let clipboard = clipboard
        .as_mut()
        .map(|sink| sink as &mut dyn ClipboardSink);
    let mut out = io::stdout().lock();
    if args.texts.is_empty() {
        extract_texts(read_stdin_lines()?, options, &mut out, clipboard)
    } else {
        extract_texts(&args.texts, options, &mut out, clipboard)
    }
}

/// Returns true when every code is well formed and verified.
pub fn run_check(args: &CheckArgs) -> Result<bool> {
    let reports: Vec<CodeReport> = check_all(&args.codes);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        crate::summary::print_check_report(&reports);
    }
    Ok(reports.iter().all(CodeReport::is_valid))
}

pub fn run_cin(args: &CinArgs) -> Result<()> {
    let body = args.body.trim();
    let cin = checksum::compute_cin(body);
    if cin == INVALID_CIN {
        bail!(
            "need at least {BODY_LEN} characters, got {}",
            body.chars().count()
        );
    }
    println!("{cin}");
    Ok(())
}

pub fn run_normalize(args: &NormalizeArgs) -> Result<()> {
    for code in &args.codes {
        let code = code.trim().to_ascii_uppercase();
        if !grammar::matches(&code) {
            warn!(code = redact_value(&code), "not a fiscal code");
        }
        println!("{}", omocodia::normalize(&code));
    }
    Ok(())
}

pub fn run_capture(args: &CaptureArgs, settings: &Settings) -> Result<CaptureOutcome> {
    let extractor = CodeExtractor::new(resolve_policy(args.strict, args.lenient, settings));
    let locator = match &args.windows {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("open {}", path.display()))?;
            SnapshotLocator::from_reader(BufReader::new(file))?
        }
        None => SnapshotLocator::from_reader(io::stdin().lock())?,
    };
    let mut sink: Box<dyn ClipboardSink> = if args.copy {
        Box::new(system_clipboard()?)
    } else {
        Box::new(StdoutSink::stdout())
    };

    let outcome = capture::capture(&locator, sink.as_mut(), &extractor)?;
    match &outcome {
        CaptureOutcome::Copied(code) => {
            if args.copy {
                println!("Codice Fiscale copiato: {}", code.notification());
            }
        }
        other => eprintln!("{}", other.message()),
    }
    Ok(outcome)
}

pub fn run_config(command: &ConfigCommand, config: Option<&Path>) -> Result<()> {
    let store = settings_store(config)?;
    match command {
        ConfigCommand::Path => println!("{}", store.path().display()),
        ConfigCommand::Show => print_settings(&store, &store.load()),
        ConfigCommand::SetHotkey { hotkey } => {
            let hotkey: HotkeyConfig = hotkey.parse()?;
            update_settings(&store, |settings| settings.hotkey = hotkey)?;
            println!("hotkey: {hotkey}");
        }
        ConfigCommand::SetPolicy { policy } => {
            let policy = match policy {
                PolicyArg::Lenient => ChecksumPolicy::Lenient,
                PolicyArg::Strict => ChecksumPolicy::Strict,
            };
            update_settings(&store, |settings| {
                settings.general.checksum_policy = policy;
            })?;
            println!("checksum policy: {}", policy_name(policy));
        }
        ConfigCommand::SetAutostart { enabled } => {
            update_settings(&store, |settings| settings.general.autostart = *enabled)?;
            println!("autostart: {enabled}");
        }
    }
    Ok(())
}

/// Settings from `config` or the platform location; defaults when neither
/// is available.
pub fn load_settings(config: Option<&Path>) -> Settings {
    match settings_store(config) {
        Ok(store) => store.load(),
        Err(error) => {
            warn!("{error:#}, using default settings");
            Settings::default()
        }
    }
}

fn settings_store(config: Option<&Path>) -> Result<SettingsStore> {
    match config {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::default_location().context("locate settings file"),
    }
}

fn update_settings(store: &SettingsStore, change: impl FnOnce(&mut Settings)) -> Result<()> {
    let mut settings = store.load();
    change(&mut settings);
    store
        .save(&settings)
        .with_context(|| format!("save {}", store.path().display()))
}

fn print_settings(store: &SettingsStore, settings: &Settings) {
    println!("file: {}", store.path().display());
    println!("hotkey: {}", settings.hotkey);
    println!(
        "checksum policy: {}",
        policy_name(settings.general.checksum_policy)
    );
    println!("autostart: {}", settings.general.autostart);
}

fn policy_name(policy: ChecksumPolicy) -> &'static str {
    match policy {
        ChecksumPolicy::Lenient => "lenient",
        ChecksumPolicy::Strict => "strict",
    }
}

fn read_stdin_lines() -> Result<Vec<String>> {
    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("read stdin")
}

#[cfg(feature = "clipboard")]
fn system_clipboard() -> Result<cfx_cli::clipboard::SystemClipboard> {
    cfx_cli::clipboard::SystemClipboard::new()
}

#[cfg(not(feature = "clipboard"))]
fn system_clipboard() -> Result<StdoutSink> {
    bail!("built without clipboard support")
}
