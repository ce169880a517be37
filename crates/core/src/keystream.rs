use crate::{Deck, DeckError};
use tracing::trace;

/// Rounds allowed to land on a joker before a single keystream value is
/// abandoned. A valid deck never comes close.
pub const MAX_ROUND_ATTEMPTS: usize = 1_000;

impl Deck {
    /// Jokers, triple cut and count cut: everything in a round except
    /// picking the output card. Key derivation reuses this.
    pub fn mix(&mut self) -> Result<(), DeckError> {
        self.move_jokers()?;
        self.triple_cut()?;
        self.count_cut_bottom();
        Ok(())
    }

    /// Card found by counting down the top card's flat rank. `None` when
    /// that card is a joker.
    pub fn output_value(&self) -> Option<u8> {
        let depth = self.top().flat_rank() as usize;
        self.cards()[depth].output_value()
    }

    /// Runs rounds until one lands on a non-joker output card and returns
    /// its value, 1..=26.
    pub fn next_keystream_value(&mut self) -> Result<u8, DeckError> {
        for attempt in 1..=MAX_ROUND_ATTEMPTS {
            self.mix()?;
            match self.output_value() {
                Some(value) => {
                    trace!(value, attempt, top = %self.top(), "keystream round");
                    return Ok(value);
                }
                None => trace!(attempt, "output card is a joker, repeating round"),
            }
        }
        Err(DeckError::KeystreamStalled {
            attempts: MAX_ROUND_ATTEMPTS,
        })
    }

    pub fn keystream(&mut self) -> Keystream<'_> {
        Keystream { deck: self }
    }
}

/// Endless keystream over a borrowed deck. Each item advances the deck.
pub struct Keystream<'a> {
    deck: &'a mut Deck,
}

impl Iterator for Keystream<'_> {
    type Item = Result<u8, DeckError>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.deck.next_keystream_value())
    }
}
