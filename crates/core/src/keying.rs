use crate::{Deck, DeckError};
use tracing::{debug, warn};

/// Shorter alphabetic keys still work but leave too little of the deck
/// state to chance.
pub const RECOMMENDED_KEY_LEN: usize = 64;
pub const PREFERRED_KEY_LEN: usize = 80;

/// Advisory text for a key of `len` letters, if it is shorter than
/// recommended.
pub fn key_advisory(len: usize) -> Option<String> {
    (len < RECOMMENDED_KEY_LEN).then(|| {
        format!(
            "key has {len} letters; at least {RECOMMENDED_KEY_LEN} are recommended \
             ({PREFERRED_KEY_LEN} or more preferred)"
        )
    })
}

impl Deck {
    /// Keys a standard deck with letter values 1..=26. Each value runs a
    /// round without output followed by a count cut of that many cards.
    pub fn from_alphabetic_key(values: &[u8]) -> Result<Self, DeckError> {
        if values.is_empty() {
            return Err(DeckError::EmptyKey);
        }
        if let Some((position, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, value)| !(1..=26).contains(*value))
        {
            return Err(DeckError::InvalidKeyValue { position, value });
        }
        if let Some(advice) = key_advisory(values.len()) {
            warn!("{advice}");
        }
        let mut deck = Self::standard();
        for &value in values {
            deck.mix()?;
            deck.count_cut(value as usize);
        }
        debug!(key_len = values.len(), top = %deck.top(), "keyed deck");
        Ok(deck)
    }
}
