use crate::{Card, JokerKind, Rank, Suit};
use rand::{CryptoRng, Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DECK_SIZE: usize = 54;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("invalid card identity {0}, expected 1-54")]
    InvalidIdentity(i64),
    #[error("deck has {0} cards, expected 54")]
    InvalidDeckLength(usize),
    #[error("invalid card value {value} at position {position}, expected 1-54")]
    InvalidCardValue { position: usize, value: i64 },
    #[error("duplicate card {value} at position {position}")]
    DuplicateCard { position: usize, value: i64 },
    #[error("invalid card token '{token}' at position {position}")]
    InvalidCardToken { position: usize, token: String },
    #[error("key has no letters")]
    EmptyKey,
    #[error("invalid key value {value} at position {position}, expected 1-26")]
    InvalidKeyValue { position: usize, value: u8 },
    #[error("joker {0} missing from deck")]
    JokerNotFound(JokerKind),
    #[error("keystream produced no output after {attempts} rounds")]
    KeystreamStalled { attempts: usize },
}

impl DeckError {
    /// True when the error means a deck invariant was broken rather than
    /// bad input reaching a construction boundary.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::JokerNotFound(_) | Self::KeystreamStalled { .. }
        )
    }
}

/// 54 cards, index 0 is the top of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: [Card; DECK_SIZE],
}

impl Deck {
    /// Identities 1 through 54 in order: clubs, diamonds, hearts, spades,
    /// then joker A and joker B.
    pub fn standard() -> Self {
        let faces = Suit::ALL.iter().flat_map(|&suit| {
            Rank::FACES
                .iter()
                .map(move |&rank| Card::standard(suit, rank))
        });
        let mut cards = [Card::JOKER_A; DECK_SIZE];
        for (slot, card) in cards
            .iter_mut()
            .zip(faces.chain([Card::JOKER_A, Card::JOKER_B]))
        {
            *slot = card;
        }
        Self { cards }
    }

    /// Builds a deck in exactly the given order of flat identities.
    pub fn from_permutation(identities: &[i64]) -> Result<Self, DeckError> {
        if identities.len() != DECK_SIZE {
            return Err(DeckError::InvalidDeckLength(identities.len()));
        }
        let mut seen = [false; DECK_SIZE];
        let mut cards = [Card::JOKER_A; DECK_SIZE];
        for (position, &value) in identities.iter().enumerate() {
            let card = Card::try_from_identity(value)
                .ok_or(DeckError::InvalidCardValue { position, value })?;
            let slot = (value - 1) as usize;
            if seen[slot] {
                return Err(DeckError::DuplicateCard { position, value });
            }
            seen[slot] = true;
            cards[position] = card;
        }
        Ok(Self { cards })
    }

    /// Parses the textual deck format: whitespace separated card tokens, top
    /// card first.
    pub fn from_tokens(text: &str) -> Result<Self, DeckError> {
        let identities = parse_tokens(text)?;
        Self::from_permutation(&identities)
    }

    /// A standard deck put through a uniform shuffle.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle(rng);
        deck
    }

    pub fn cards(&self) -> &[Card; DECK_SIZE] {
        &self.cards
    }

    pub fn top(&self) -> Card {
        self.cards[0]
    }

    pub fn bottom(&self) -> Card {
        self.cards[DECK_SIZE - 1]
    }

    pub fn identities(&self) -> Vec<u8> {
        self.cards
            .iter()
            .filter_map(|card| card.identity())
            .collect()
    }

    pub fn position_of(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|candidate| *candidate == card)
    }

    pub fn joker_position(&self, kind: JokerKind) -> Result<usize, DeckError> {
        self.position_of(kind.card())
            .ok_or(DeckError::JokerNotFound(kind))
    }

    /// Takes the card at `from` out of the deck and reinserts it so that it
    /// ends up at `to`, shifting the cards in between by one.
    pub fn relocate(&mut self, from: usize, to: usize) {
        if from < to {
            self.cards[from..=to].rotate_left(1);
        } else if to < from {
            self.cards[to..=from].rotate_right(1);
        }
    }

    /// Moves a joker `shift` places towards the bottom. A joker passing the
    /// bottom comes back in below the top card, never on top.
    pub fn move_joker(&mut self, kind: JokerKind) -> Result<(), DeckError> {
        let from = self.joker_position(kind)?;
        let mut to = from + kind.shift();
        if to >= DECK_SIZE {
            to -= DECK_SIZE - 1;
        }
        self.relocate(from, to);
        Ok(())
    }

    /// Joker A down one, then joker B down two from where it is now.
    pub fn move_jokers(&mut self) -> Result<(), DeckError> {
        self.move_joker(JokerKind::A)?;
        self.move_joker(JokerKind::B)
    }

    /// Swaps the block above the first joker with the block below the
    /// second joker.
    pub fn triple_cut(&mut self) -> Result<(), DeckError> {
        let a = self.joker_position(JokerKind::A)?;
        let b = self.joker_position(JokerKind::B)?;
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        // [before | jokers | after] -> [after | before | jokers]
        self.cards.rotate_left(second + 1);
        // -> [after | jokers | before]
        let after = DECK_SIZE - (second + 1);
        self.cards[after..].rotate_left(first);
        Ok(())
    }

    /// Moves the top `count` cards to sit just above the bottom card. The
    /// bottom card never moves.
    pub fn count_cut(&mut self, count: usize) {
        let count = count.min(DECK_SIZE - 1);
        self.cards[..DECK_SIZE - 1].rotate_left(count);
    }

    /// Count cut by the flat rank of the bottom card; no-op on a joker.
    pub fn count_cut_bottom(&mut self) {
        let bottom = self.bottom();
        if !bottom.is_joker() {
            self.count_cut(bottom.flat_rank() as usize);
        }
    }

    /// Fisher-Yates with one unbiased draw per slot.
    pub fn shuffle<R: RngCore + CryptoRng>(&mut self, rng: &mut R) {
        for remaining in (2..=DECK_SIZE).rev() {
            let pick = rng.gen_range(0..remaining);
            self.cards.swap(pick, remaining - 1);
        }
    }

    /// True when every identity appears exactly once.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; DECK_SIZE];
        for card in &self.cards {
            match card.identity() {
                Some(identity) if !seen[identity as usize - 1] => {
                    seen[identity as usize - 1] = true;
                }
                _ => return false,
            }
        }
        true
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, card) in self.cards.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Deck {
    type Err = DeckError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::from_tokens(text)
    }
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DeckError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        let mut identities = Vec::with_capacity(cards.len());
        for (position, card) in cards.iter().enumerate() {
            let identity = card.identity().ok_or(DeckError::InvalidCardToken {
                position,
                token: card.to_string(),
            })?;
            identities.push(i64::from(identity));
        }
        Self::from_permutation(&identities)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards.to_vec()
    }
}

/// Card tokens to flat identities, order preserved. Length and duplicates
/// are left to [`Deck::from_permutation`].
pub fn parse_tokens(text: &str) -> Result<Vec<i64>, DeckError> {
    text.split_whitespace()
        .enumerate()
        .map(|(position, token)| {
            Card::from_token(token)
                .and_then(|card| card.identity())
                .map(i64::from)
                .ok_or_else(|| DeckError::InvalidCardToken {
                    position,
                    token: token.to_string(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(deck: &Deck) -> Vec<u8> {
        deck.identities()
    }

    #[test]
    fn relocate_down_and_up() {
        let mut deck = Deck::standard();
        deck.relocate(0, 3);
        assert_eq!(&order(&deck)[..5], &[2, 3, 4, 1, 5]);
        deck.relocate(3, 0);
        assert_eq!(deck, Deck::standard());
    }

    #[test]
    fn relocate_same_position_is_noop() {
        let mut deck = Deck::standard();
        deck.relocate(10, 10);
        assert_eq!(deck, Deck::standard());
    }

    #[test]
    fn count_cut_keeps_bottom() {
        let mut deck = Deck::standard();
        deck.count_cut(5);
        let ids = order(&deck);
        assert_eq!(&ids[..3], &[6, 7, 8]);
        assert_eq!(&ids[48..], &[1, 2, 3, 4, 5, 54]);
    }
}
