use crate::DeckError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bridge ordering: Clubs < Diamonds < Hearts < Spades.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Added to the rank value to get the flat rank of a non-joker card.
    pub fn offset(self) -> u8 {
        match self {
            Self::Clubs => 0,
            Self::Diamonds => 13,
            Self::Hearts => 26,
            Self::Spades => 39,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Clubs => 'c',
            Self::Diamonds => 'd',
            Self::Hearts => 'h',
            Self::Spades => 's',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'c' => Some(Self::Clubs),
            'd' => Some(Self::Diamonds),
            'h' => Some(Self::Hearts),
            's' => Some(Self::Spades),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Joker,
}

impl Rank {
    pub const FACES: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Ace is 1, King is 13, both jokers are 53.
    pub fn value(self) -> u8 {
        match self {
            Self::Joker => 53,
            face => face as u8 + 1,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::Ace => 'A',
            Self::Ten => '0',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Joker => 'W',
            face => char::from(b'0' + face.value()),
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'A' => Some(Self::Ace),
            '0' => Some(Self::Ten),
            'J' => Some(Self::Jack),
            'Q' => Some(Self::Queen),
            'K' => Some(Self::King),
            'W' => Some(Self::Joker),
            '2'..='9' => Some(Self::FACES[(symbol as u8 - b'1') as usize]),
            _ => None,
        }
    }
}

/// The two jokers are told apart by the suit they are paired with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum JokerKind {
    A,
    B,
}

impl JokerKind {
    pub fn card(self) -> Card {
        match self {
            Self::A => Card::JOKER_A,
            Self::B => Card::JOKER_B,
        }
    }

    /// How far a round moves this joker down the deck.
    pub fn shift(self) -> usize {
        match self {
            Self::A => 1,
            Self::B => 2,
        }
    }
}

impl fmt::Display for JokerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const JOKER_A: Card = Card {
        suit: Suit::Clubs,
        rank: Rank::Joker,
    };
    pub const JOKER_B: Card = Card {
        suit: Suit::Spades,
        rank: Rank::Joker,
    };

    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn is_joker(&self) -> bool {
        self.rank == Rank::Joker
    }

    pub fn joker_kind(&self) -> Option<JokerKind> {
        match *self {
            Self::JOKER_A => Some(JokerKind::A),
            Self::JOKER_B => Some(JokerKind::B),
            _ => None,
        }
    }

    /// Maps a flat identity (1..=54) to its card.
    pub fn from_identity(identity: i64) -> Result<Self, DeckError> {
        Self::try_from_identity(identity).ok_or(DeckError::InvalidIdentity(identity))
    }

    pub(crate) fn try_from_identity(identity: i64) -> Option<Self> {
        match identity {
            1..=52 => {
                let index = (identity - 1) as usize;
                Some(Self::standard(Suit::ALL[index / 13], Rank::FACES[index % 13]))
            }
            53 => Some(Self::JOKER_A),
            54 => Some(Self::JOKER_B),
            _ => None,
        }
    }

    /// Flat identity, 1..=54. Jokers paired with diamonds or hearts have none.
    pub fn identity(&self) -> Option<u8> {
        match self.joker_kind() {
            Some(JokerKind::A) => Some(53),
            Some(JokerKind::B) => Some(54),
            None if self.is_joker() => None,
            None => Some(self.flat_rank()),
        }
    }

    /// Value used by the keystream: rank plus suit offset, 53 for either joker.
    pub fn flat_rank(&self) -> u8 {
        if self.is_joker() {
            self.rank.value()
        } else {
            self.rank.value() + self.suit.offset()
        }
    }

    /// Keystream contribution of an output card: clubs and hearts give
    /// 1..=13, diamonds and spades 14..=26.
    pub fn output_value(&self) -> Option<u8> {
        if self.is_joker() {
            return None;
        }
        let value = self.rank.value();
        match self.suit {
            Suit::Clubs | Suit::Hearts => Some(value),
            Suit::Diamonds | Suit::Spades => Some(value + 13),
        }
    }

    /// Parses a two character token such as `Qh` or `Wc`.
    pub fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        let rank = Rank::from_symbol(chars.next()?)?;
        let suit = Suit::from_symbol(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        let card = Self::standard(suit, rank);
        card.identity().map(|_| card)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.symbol(), self.suit.symbol())
    }
}
