use crate::schema::{InputFile, RunReport};
use anyhow::{bail, Context};
use pontifex_core::{letter_to_number, parse_tokens, DeckError, KeyFormat, KeyMaterial};
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Reads the text line and the optional key line. Anything after the
/// second line is ignored.
pub fn load_input(path: &Path) -> anyhow::Result<InputFile> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    // Non UTF-8 bytes become replacement characters, which cleaning drops.
    let raw = String::from_utf8_lossy(&bytes);
    parse_input(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_input(raw: &str) -> anyhow::Result<InputFile> {
    let mut lines = raw.lines();
    let text = lines.next().unwrap_or_default();
    if text.is_empty() {
        bail!("input text line is blank");
    }
    let key = lines
        .next()
        .filter(|line| !line.is_empty())
        .map(str::to_string);
    Ok(InputFile {
        text: text.to_string(),
        key,
    })
}

/// Keeps ASCII letters, upper-cased.
pub fn clean_text(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphabetic)
        .map(|letter| letter.to_ascii_uppercase())
        .collect()
}

/// Cleaned key text and its letter values, 1..=26.
pub fn alpha_key_values(raw: &str) -> (String, Vec<u8>) {
    let cleaned = clean_text(raw);
    let values = cleaned.chars().filter_map(letter_to_number).collect();
    (cleaned, values)
}

/// Whitespace separated integers, read left to right up to the first token
/// that is not one.
pub fn parse_numeric_key(raw: &str) -> Vec<i64> {
    raw.split_whitespace()
        .map_while(|token| token.parse::<i64>().ok())
        .collect()
}

/// A deck key given either as numbers or as card tokens such as `Ah 2c`.
/// The format is picked from the first token.
pub fn parse_deck_key(raw: &str) -> Result<Vec<i64>, DeckError> {
    let first = raw.split_whitespace().next().unwrap_or_default();
    if first.is_empty() || first.parse::<i64>().is_ok() {
        return Ok(parse_numeric_key(raw));
    }
    parse_tokens(raw)
}

/// Key material plus the cleaned key text worth reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedKey {
    pub material: KeyMaterial,
    pub cleaned: Option<String>,
}

/// Unparseable deck keys are carried as [`KeyMaterial::Malformed`] so the
/// run decides between aborting and falling back.
pub fn prepare_key(raw: Option<&str>, format: KeyFormat) -> PreparedKey {
    let Some(raw) = raw else {
        return PreparedKey {
            material: KeyMaterial::None,
            cleaned: None,
        };
    };
    match format {
        KeyFormat::Deck => PreparedKey {
            material: match parse_deck_key(raw) {
                Ok(identities) => KeyMaterial::Permutation(identities),
                Err(err) => KeyMaterial::Malformed(err),
            },
            cleaned: None,
        },
        KeyFormat::Alphabetic => {
            let (cleaned, values) = alpha_key_values(raw);
            PreparedKey {
                material: KeyMaterial::Alphabetic(values),
                cleaned: Some(cleaned),
            }
        }
    }
}

pub fn write_summary(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    fs::write(path, report.render()).with_context(|| format!("write {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(value).context("serialize report")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))
}
