//! Global hotkey configuration.
//!
//! Values mirror the Win32 `RegisterHotKey` inputs so the registration
//! collaborator can pass them through untouched: modifiers are `MOD_*` bit
//! flags and keys are virtual-key codes.
//!
//! Older settings files stored names (`"CTRL"`, `"NUMPAD1"`) instead of
//! numbers; both forms are accepted when loading.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SettingsError;

/// Set of hotkey modifiers (`MOD_ALT`, `MOD_CONTROL`, `MOD_SHIFT`, `MOD_WIN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const ALT: Modifiers = Modifiers(0x1);
    pub const CONTROL: Modifiers = Modifiers(0x2);
    pub const SHIFT: Modifiers = Modifiers(0x4);
    pub const WIN: Modifiers = Modifiers(0x8);

    /// `MOD_NOREPEAT`: keeps a held key from firing repeatedly.
    pub const NO_REPEAT: u32 = 0x4000;

    const ALL_BITS: u32 = 0xF;

    /// Display order, matching the usual Windows spelling.
    const NAMED: [(Modifiers, &'static str); 4] = [
        (Modifiers::CONTROL, "CTRL"),
        (Modifiers::ALT, "ALT"),
        (Modifiers::SHIFT, "SHIFT"),
        (Modifiers::WIN, "WIN"),
    ];

    /// Keep only the four modifier bits.
    pub fn from_bits(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, other: Modifiers) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse one modifier name, case-insensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "CTRL" | "CONTROL" => Some(Self::CONTROL),
            "ALT" => Some(Self::ALT),
            "SHIFT" => Some(Self::SHIFT),
            "WIN" | "SUPER" => Some(Self::WIN),
            _ => None,
        }
    }

    /// Legacy single-modifier value; anything unknown means CTRL.
    fn from_legacy(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Self::from_bits(leading_number(trimmed));
        }
        Self::from_name(trimmed).unwrap_or(Self::CONTROL)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        f.write_str(&names.join(" + "))
    }
}

/// A Win32 virtual-key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualKey(u32);

impl VirtualKey {
    pub const NUMPAD0: VirtualKey = VirtualKey(0x60);
    pub const NUMPAD1: VirtualKey = VirtualKey(0x61);
    pub const F1: VirtualKey = VirtualKey(0x70);

    const NUMPAD9: u32 = 0x69;
    const F24: u32 = 0x87;

    pub fn from_code(code: u32) -> Self {
        Self(code)
    }

    pub fn code(self) -> u32 {
        self.0
    }

    pub fn numpad(digit: u8) -> Option<Self> {
        (digit <= 9).then(|| Self(Self::NUMPAD0.0 + u32::from(digit)))
    }

    pub fn function(number: u8) -> Option<Self> {
        (1..=24)
            .contains(&number)
            .then(|| Self(Self::F1.0 + u32::from(number) - 1))
    }

    pub fn numpad_digit(self) -> Option<u8> {
        (Self::NUMPAD0.0..=Self::NUMPAD9)
            .contains(&self.0)
            .then(|| (self.0 - Self::NUMPAD0.0) as u8)
    }

    pub fn function_number(self) -> Option<u8> {
        (Self::F1.0..=Self::F24)
            .contains(&self.0)
            .then(|| (self.0 - Self::F1.0 + 1) as u8)
    }

    /// Parse a key name: `NUMPAD3`, `NUM3`, `3 (Num)`, `F5`, a single letter
    /// or digit, or a hex code such as `0x2D`.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_ascii_uppercase();
        if let Some(rest) = upper.strip_suffix("(NUM)") {
            return single_digit(rest.trim()).and_then(Self::numpad);
        }
        if let Some(rest) = upper
            .strip_prefix("NUMPAD")
            .or_else(|| upper.strip_prefix("NUM"))
        {
            return single_digit(rest).and_then(Self::numpad);
        }
        if let Some(rest) = upper.strip_prefix("0X") {
            return u32::from_str_radix(rest, 16).ok().map(Self);
        }
        if let Some(rest) = upper.strip_prefix('F')
            && !rest.is_empty()
        {
            return rest.parse::<u8>().ok().and_then(Self::function);
        }
        let mut chars = upper.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() || c.is_ascii_digit() => Some(Self(c as u32)),
            _ => None,
        }
    }

    /// Legacy key value; anything unknown means NUMPAD1.
    fn from_legacy(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with(|c: char| c.is_ascii_digit()) {
            return Self(leading_number(trimmed));
        }
        trimmed
            .to_ascii_uppercase()
            .strip_prefix("NUMPAD")
            .and_then(single_digit)
            .and_then(Self::numpad)
            .unwrap_or(Self::NUMPAD1)
    }
}

impl Default for VirtualKey {
    fn default() -> Self {
        Self::NUMPAD1
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(digit) = self.numpad_digit() {
            return write!(f, "{digit} (Num)");
        }
        if let Some(number) = self.function_number() {
            return write!(f, "F{number}");
        }
        match char::from_u32(self.0) {
            Some(c) if c.is_ascii_uppercase() || c.is_ascii_digit() => write!(f, "{c}"),
            _ => write!(f, "0x{:02X}", self.0),
        }
    }
}

fn single_digit(text: &str) -> Option<u8> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.to_digit(10).map(|digit| digit as u8),
        _ => None,
    }
}

/// Value of the leading decimal digits, 0 when they overflow.
fn leading_number(text: &str) -> u32 {
    let digits: String = text.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Modifier set plus key, e.g. `CTRL + 1 (Num)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    pub modifiers: Modifiers,
    pub key: VirtualKey,
}

impl HotkeyConfig {
    pub fn new(modifiers: Modifiers, key: VirtualKey) -> Self {
        Self { modifiers, key }
    }

    /// Modifier flags as passed to `RegisterHotKey`.
    pub fn registration_modifiers(&self) -> u32 {
        self.modifiers.bits() | Modifiers::NO_REPEAT
    }
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            modifiers: Modifiers::CONTROL,
            key: VirtualKey::NUMPAD1,
        }
    }
}

impl fmt::Display for HotkeyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{} + {}", self.modifiers, self.key)
        }
    }
}

impl FromStr for HotkeyConfig {
    type Err = SettingsError;

    /// Parse `MOD+MOD+KEY`; the last `+`-separated part is the key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let Some((key, modifiers)) = parts.split_last() else {
            return Err(SettingsError::InvalidHotkey(s.to_string()));
        };
        let key = VirtualKey::from_name(key)
            .ok_or_else(|| SettingsError::InvalidHotkey(format!("unknown key '{key}'")))?;
        let modifiers = modifiers.iter().try_fold(Modifiers::NONE, |acc, name| {
            Modifiers::from_name(name)
                .map(|flag| acc | flag)
                .ok_or_else(|| SettingsError::InvalidHotkey(format!("unknown modifier '{name}'")))
        })?;
        Ok(Self { modifiers, key })
    }
}

/// Stored value: a number, or a string holding a number or a legacy name.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCode {
    Number(u32),
    Text(String),
}

impl Serialize for Modifiers {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for Modifiers {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Number(bits) => Self::from_bits(bits),
            RawCode::Text(text) => Self::from_legacy(&text),
        })
    }
}

impl Serialize for VirtualKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for VirtualKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawCode::deserialize(deserializer)? {
            RawCode::Number(code) => Self(code),
            RawCode::Text(text) => Self::from_legacy(&text),
        })
    }
}
