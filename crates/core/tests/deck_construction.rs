use pontifex_core::{
    key_advisory, Card, Deck, DeckError, Rank, RngState, Suit, DECK_SIZE,
};
use std::collections::HashSet;

fn standard_ids() -> Vec<i64> {
    (1..=54).collect()
}

#[test]
fn identity_round_trip() {
    for identity in 1..=54 {
        let card = Card::from_identity(identity).expect("valid identity");
        assert_eq!(card.identity(), Some(identity as u8));
    }
    assert_eq!(Card::from_identity(0), Err(DeckError::InvalidIdentity(0)));
    assert_eq!(Card::from_identity(55), Err(DeckError::InvalidIdentity(55)));
    assert_eq!(Card::from_identity(-3), Err(DeckError::InvalidIdentity(-3)));
}

#[test]
fn identity_layout() {
    assert_eq!(
        Card::from_identity(1),
        Ok(Card::standard(Suit::Clubs, Rank::Ace))
    );
    assert_eq!(
        Card::from_identity(26),
        Ok(Card::standard(Suit::Diamonds, Rank::King))
    );
    assert_eq!(
        Card::from_identity(27),
        Ok(Card::standard(Suit::Hearts, Rank::Ace))
    );
    assert_eq!(
        Card::from_identity(52),
        Ok(Card::standard(Suit::Spades, Rank::King))
    );
    assert_eq!(Card::from_identity(53), Ok(Card::JOKER_A));
    assert_eq!(Card::from_identity(54), Ok(Card::JOKER_B));
}

#[test]
fn flat_rank_collapses_jokers() {
    assert_eq!(Card::JOKER_A.flat_rank(), 53);
    assert_eq!(Card::JOKER_B.flat_rank(), 53);
    assert_ne!(Card::JOKER_A, Card::JOKER_B);
    assert_eq!(Card::standard(Suit::Hearts, Rank::Ten).flat_rank(), 36);
    assert_eq!(Card::standard(Suit::Spades, Rank::Queen).flat_rank(), 51);
}

#[test]
fn card_tokens_round_trip() {
    for identity in 1..=54 {
        let card = Card::from_identity(identity).expect("card");
        let token = card.to_string();
        assert_eq!(token.len(), 2);
        assert_eq!(Card::from_token(&token), Some(card));
    }
    assert_eq!(Card::JOKER_A.to_string(), "Wc");
    assert_eq!(Card::JOKER_B.to_string(), "Ws");
    assert_eq!(Card::standard(Suit::Diamonds, Rank::Ten).to_string(), "0d");
    assert_eq!(Card::from_token("Wd"), None);
    assert_eq!(Card::from_token("Xs"), None);
    assert_eq!(Card::from_token("Ahh"), None);
    assert_eq!(Card::from_token("ah"), None);
}

#[test]
fn standard_deck_text() {
    let text = Deck::standard().to_string();
    assert!(text.starts_with("Ac 2c 3c"));
    assert!(text.ends_with("Qs Ks Wc Ws"));
    assert_eq!(text.split(' ').count(), DECK_SIZE);
    assert_eq!(text.parse::<Deck>(), Ok(Deck::standard()));
}

#[test]
fn token_parse_reports_position() {
    let mut text = Deck::standard().to_string();
    text = text.replacen("3c", "3x", 1);
    assert_eq!(
        Deck::from_tokens(&text),
        Err(DeckError::InvalidCardToken {
            position: 2,
            token: "3x".to_string(),
        })
    );
}

#[test]
fn permutation_accepts_any_order() {
    let mut order = standard_ids();
    order.reverse();
    let deck = Deck::from_permutation(&order).expect("reversed deck");
    assert_eq!(deck.top(), Card::JOKER_B);
    assert_eq!(deck.bottom(), Card::standard(Suit::Clubs, Rank::Ace));
    assert_eq!(
        deck.identities(),
        order.iter().map(|id| *id as u8).collect::<Vec<_>>()
    );
}

#[test]
fn permutation_rejects_wrong_length() {
    let order: Vec<i64> = (1..=53).collect();
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::InvalidDeckLength(53))
    );
    let mut order = standard_ids();
    order.push(1);
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::InvalidDeckLength(55))
    );
    assert_eq!(
        Deck::from_permutation(&[]),
        Err(DeckError::InvalidDeckLength(0))
    );
}

#[test]
fn permutation_rejects_out_of_range() {
    let mut order = standard_ids();
    order[17] = 0;
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::InvalidCardValue {
            position: 17,
            value: 0
        })
    );
    let mut order = standard_ids();
    order[40] = 99;
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::InvalidCardValue {
            position: 40,
            value: 99
        })
    );
}

#[test]
fn permutation_rejects_duplicates() {
    let mut order = standard_ids();
    order[10] = 4;
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::DuplicateCard {
            position: 10,
            value: 4
        })
    );
}

#[test]
fn permutation_rejects_duplicate_in_last_slot() {
    let mut order = standard_ids();
    order[53] = 53;
    assert_eq!(
        Deck::from_permutation(&order),
        Err(DeckError::DuplicateCard {
            position: 53,
            value: 53
        })
    );
}

#[test]
fn deck_copy_is_independent() {
    let original = Deck::standard();
    let mut copy = original;
    copy.next_keystream_value().expect("round");
    assert_eq!(original, Deck::standard());
    assert_ne!(copy, original);
}

#[test]
fn deck_serde_round_trip() {
    let deck = Deck::from_alphabetic_key(&[3, 1, 18, 4]).expect("keyed");
    let json = serde_json::to_string(&deck).expect("serialize");
    let back: Deck = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, deck);
}

#[test]
fn deck_serde_rejects_duplicates() {
    let mut cards: Vec<Card> = Deck::standard().cards().to_vec();
    cards[1] = cards[0];
    let json = serde_json::to_string(&cards).expect("serialize");
    assert!(serde_json::from_str::<Deck>(&json).is_err());
}

#[test]
fn short_alphabetic_key_is_deterministic() {
    let first = Deck::from_alphabetic_key(&[6, 15, 15]).expect("key");
    let second = Deck::from_alphabetic_key(&[6, 15, 15]).expect("key");
    assert_eq!(first, second);
    assert!(first.is_valid());
    assert_ne!(first, Deck::standard());
    assert_eq!(first.top().identity(), Some(22));
    assert_eq!(first.bottom().identity(), Some(2));
}

#[test]
fn alphabetic_key_rejects_bad_values() {
    assert_eq!(Deck::from_alphabetic_key(&[]), Err(DeckError::EmptyKey));
    assert_eq!(
        Deck::from_alphabetic_key(&[1, 2, 27]),
        Err(DeckError::InvalidKeyValue {
            position: 2,
            value: 27
        })
    );
    assert_eq!(
        Deck::from_alphabetic_key(&[0]),
        Err(DeckError::InvalidKeyValue {
            position: 0,
            value: 0
        })
    );
}

#[test]
fn key_advisory_threshold() {
    assert!(key_advisory(3).is_some());
    assert!(key_advisory(63).is_some());
    assert!(key_advisory(64).is_none());
    assert!(key_advisory(120).is_none());
}

#[test]
fn seeded_shuffles_are_reproducible() {
    let first = Deck::random(&mut RngState::from_seed(11));
    let second = Deck::random(&mut RngState::from_seed(11));
    assert_eq!(first, second);
    assert!(first.is_valid());
    assert_eq!(RngState::from_seed(11).seed(), Some(11));
    assert_eq!(RngState::from_entropy().seed(), None);
}

#[test]
fn shuffles_are_distinct_and_unbiased() {
    const SHUFFLES: usize = 1_000;
    let mut rng = RngState::from_seed(0x5011_7A1E);
    let start = Deck::standard();
    let mut seen = HashSet::new();
    let mut fixed = [0usize; DECK_SIZE];
    for _ in 0..SHUFFLES {
        let mut deck = start;
        deck.shuffle(&mut rng);
        assert!(deck.is_valid());
        for (position, card) in deck.cards().iter().enumerate() {
            if *card == start.cards()[position] {
                fixed[position] += 1;
            }
        }
        seen.insert(deck);
    }
    assert_eq!(seen.len(), SHUFFLES);

    // Each position keeps its card with probability 1/54; compare the
    // counts of fixed points against that with a chi-square statistic.
    let expected = SHUFFLES as f64 / DECK_SIZE as f64;
    let chi_square: f64 = fixed
        .iter()
        .map(|&count| {
            let diff = count as f64 - expected;
            diff * diff / expected
        })
        .sum();
    // 53 degrees of freedom; 110 is far past the 0.001 tail.
    assert!(chi_square < 110.0, "chi-square {chi_square}");
    assert!(fixed.iter().all(|&count| count < 60));
}
