use crate::{Deck, DeckError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const ALPHABET_LEN: i32 = 26;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Encrypt,
    Decrypt,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encrypt => f.write_str("Encrypt"),
            Self::Decrypt => f.write_str("Decrypt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    #[error("invalid letter {letter:?} at position {position}, expected A-Z")]
    InvalidLetter { position: usize, letter: char },
    #[error("value {0} cannot be mapped to a letter, expected 1-26")]
    InvalidKeystreamValue(i32),
    #[error(transparent)]
    Deck(#[from] DeckError),
}

impl CipherError {
    pub fn is_internal(&self) -> bool {
        match self {
            Self::InvalidLetter { .. } => false,
            Self::InvalidKeystreamValue(_) => true,
            Self::Deck(err) => err.is_internal(),
        }
    }
}

/// 'A' is 1, 'Z' is 26. Only uppercase ASCII letters are accepted.
pub fn letter_to_number(letter: char) -> Option<u8> {
    letter
        .is_ascii_uppercase()
        .then(|| letter as u8 - b'A' + 1)
}

pub fn number_to_letter(value: i32) -> Result<char, CipherError> {
    if (1..=ALPHABET_LEN).contains(&value) {
        Ok(char::from(b'A' + (value - 1) as u8))
    } else {
        Err(CipherError::InvalidKeystreamValue(value))
    }
}

/// Validates the whole text before the deck is touched.
fn to_numbers(text: &str) -> Result<Vec<i32>, CipherError> {
    text.chars()
        .enumerate()
        .map(|(position, letter)| {
            letter_to_number(letter)
                .map(i32::from)
                .ok_or(CipherError::InvalidLetter { position, letter })
        })
        .collect()
}

/// Adds (encrypt) or subtracts (decrypt) one keystream value per letter.
/// The deck is advanced once per letter and left in its final state.
pub fn transform(mode: Mode, deck: &mut Deck, text: &str) -> Result<String, CipherError> {
    let numbers = to_numbers(text)?;
    let mut output = String::with_capacity(numbers.len());
    for number in numbers {
        let key = i32::from(deck.next_keystream_value()?);
        let value = match mode {
            Mode::Encrypt => {
                let sum = number + key;
                if sum > ALPHABET_LEN {
                    sum - ALPHABET_LEN
                } else {
                    sum
                }
            }
            Mode::Decrypt => {
                let difference = number - key;
                if difference <= 0 {
                    difference + ALPHABET_LEN
                } else {
                    difference
                }
            }
        };
        output.push(number_to_letter(value)?);
    }
    Ok(output)
}

pub fn encrypt(deck: &mut Deck, text: &str) -> Result<String, CipherError> {
    transform(Mode::Encrypt, deck, text)
}

pub fn decrypt(deck: &mut Deck, text: &str) -> Result<String, CipherError> {
    transform(Mode::Decrypt, deck, text)
}
