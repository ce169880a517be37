use crate::{transform, CipherError, Deck, DeckError, Mode, RunConfig};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("input text contains no letters")]
    EmptyCleanedText,
    #[error("decryption needs a key or deck")]
    MissingKeyForDecryption,
    #[error("invalid key: {0}")]
    Deck(#[from] DeckError),
    #[error("cipher error: {0}")]
    Cipher(#[from] CipherError),
}

impl RunError {
    /// Internal errors mean a broken invariant; everything else is the
    /// caller's input.
    pub fn is_internal(&self) -> bool {
        match self {
            Self::EmptyCleanedText | Self::MissingKeyForDecryption => false,
            Self::Deck(err) => err.is_internal(),
            Self::Cipher(err) => err.is_internal(),
        }
    }
}

/// Key material already pulled out of the input by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// Flat identities in deck order, not yet validated.
    Permutation(Vec<i64>),
    /// Letter values 1..=26.
    Alphabetic(Vec<u8>),
    /// A key line that could not be read as a deck at all.
    Malformed(DeckError),
    None,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeckSource {
    Permutation,
    Alphabetic,
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutcome {
    pub mode: Mode,
    pub output: String,
    pub source: DeckSource,
    /// Deck as built, before any keystream round.
    pub input_deck: Deck,
    pub final_deck: Deck,
}

impl KeyMaterial {
    fn build_deck(&self) -> Result<Option<(Deck, DeckSource)>, DeckError> {
        match self {
            Self::Permutation(identities) => Deck::from_permutation(identities)
                .map(|deck| Some((deck, DeckSource::Permutation))),
            Self::Alphabetic(values) => Deck::from_alphabetic_key(values)
                .map(|deck| Some((deck, DeckSource::Alphabetic))),
            Self::Malformed(err) => Err(err.clone()),
            Self::None => Ok(None),
        }
    }
}

/// Builds the starting deck and runs the cipher over `text`, which must
/// already be cleaned to uppercase letters.
pub fn run<R: RngCore + CryptoRng>(
    config: &RunConfig,
    text: &str,
    key: &KeyMaterial,
    rng: &mut R,
) -> Result<RunOutcome, RunError> {
    if text.is_empty() {
        return Err(RunError::EmptyCleanedText);
    }
    if config.mode == Mode::Decrypt && *key == KeyMaterial::None {
        return Err(RunError::MissingKeyForDecryption);
    }

    let built = match key.build_deck() {
        Ok(built) => built,
        Err(err) if config.allows_fallback() && !err.is_internal() => {
            warn!(%err, "key rejected, falling back to a random deck");
            None
        }
        Err(err) => return Err(err.into()),
    };
    let (mut deck, source) = match built {
        Some(built) => built,
        None => {
            warn!("no usable key, shuffling a random deck");
            (Deck::random(rng), DeckSource::Random)
        }
    };

    let input_deck = deck;
    debug!(mode = %config.mode, ?source, len = text.len(), "starting run");
    let output = transform(config.mode, &mut deck, text)?;
    Ok(RunOutcome {
        mode: config.mode,
        output,
        source,
        input_deck,
        final_deck: deck,
    })
}
