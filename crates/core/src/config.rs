use crate::Mode;
use serde::{Deserialize, Serialize};

/// How the key line of an input is read.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeyFormat {
    /// A full deck, as numbers 1-54 or card tokens.
    #[default]
    Deck,
    /// Free text whose letters key a standard deck.
    Alphabetic,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub key_format: KeyFormat,
    /// Encrypt with a random deck when the supplied key cannot build one.
    /// Never applies to decryption.
    #[serde(default)]
    pub fallback_to_random: bool,
}

impl RunConfig {
    pub fn encrypt() -> Self {
        Self::default()
    }

    pub fn decrypt() -> Self {
        Self {
            mode: Mode::Decrypt,
            ..Self::default()
        }
    }

    pub fn allows_fallback(&self) -> bool {
        self.fallback_to_random && self.mode == Mode::Encrypt
    }
}
