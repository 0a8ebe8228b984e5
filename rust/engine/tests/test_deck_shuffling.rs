use std::collections::HashSet;

use oddsmaker_engine::cards::{parse_cards, Card};
use oddsmaker_engine::deck::Deck;
use oddsmaker_engine::errors::DeckError;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

#[test]
fn new_deck_has_52_unique_cards() {
    let deck = Deck::new();
    let set: HashSet<Card> = deck.cards().iter().copied().collect();
    assert_eq!(deck.len(), 52);
    assert_eq!(set.len(), 52);
}

#[test]
fn shuffle_is_deterministic_with_same_seed() {
    let mut d1 = Deck::new();
    let mut d2 = Deck::new();
    d1.shuffle(&mut ChaCha20Rng::seed_from_u64(12345));
    d2.shuffle(&mut ChaCha20Rng::seed_from_u64(12345));
    assert_eq!(d1, d2, "same seed must yield identical order");
}

#[test]
fn shuffle_differs_with_different_seed() {
    let mut d1 = Deck::new();
    let mut d2 = Deck::new();
    d1.shuffle(&mut ChaCha20Rng::seed_from_u64(1));
    d2.shuffle(&mut ChaCha20Rng::seed_from_u64(2));
    assert_ne!(
        d1, d2,
        "different seeds should produce different orders (high probability)"
    );
}

#[test]
fn shuffle_restores_full_deck() {
    let mut deck = Deck::without(&parse_cards("AsKs").unwrap());
    deck.shuffle(&mut ChaCha20Rng::seed_from_u64(3));
    assert_eq!(deck.len(), 52);
}

#[test]
fn without_excludes_known_cards() {
    let known = parse_cards("AsAh7c").unwrap();
    let deck = Deck::without(&known);
    assert_eq!(deck.len(), 49);
    assert!(known.iter().all(|c| !deck.contains(c)));
}

#[test]
fn remove_card_takes_exactly_that_card() {
    let mut deck = Deck::new();
    let target: Card = "2c".parse().unwrap();
    deck.remove_card(target).unwrap();
    assert_eq!(deck.len(), 51);
    assert!(!deck.contains(&target));
    let rest: HashSet<Card> = deck.cards().iter().copied().collect();
    let expected: HashSet<Card> = Deck::new()
        .cards()
        .iter()
        .copied()
        .filter(|c| *c != target)
        .collect();
    assert_eq!(rest, expected);
}

#[test]
fn remove_card_not_in_deck_is_an_error() {
    let mut deck = Deck::from_cards(&parse_cards("2d7c").unwrap());
    let missing: Card = "2c".parse().unwrap();
    assert_eq!(deck.remove_card(missing), Err(DeckError::CardNotInDeck(missing)));
    assert_eq!(deck.len(), 2);
}

#[test]
fn remove_random_from_empty_deck_fails() {
    let mut deck = Deck::from_cards(&[]);
    let mut rng = ChaCha20Rng::seed_from_u64(9);
    assert_eq!(deck.remove_random(&mut rng), Err(DeckError::EmptyDeck));
}

#[test]
fn remove_random_n_takes_distinct_cards() {
    let mut deck = Deck::new();
    let mut rng = ChaCha20Rng::seed_from_u64(777);
    let taken = deck.remove_random_n(9, &mut rng).unwrap();
    let set: HashSet<Card> = taken.iter().copied().collect();
    assert_eq!(set.len(), 9);
    assert_eq!(deck.len(), 43);
    assert!(taken.iter().all(|c| !deck.contains(c)));
}

#[test]
fn remove_random_n_beyond_remaining_leaves_deck_intact() {
    let mut deck = Deck::from_cards(&parse_cards("Ah9s2d").unwrap());
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    assert_eq!(
        deck.remove_random_n(4, &mut rng),
        Err(DeckError::InsufficientCards {
            requested: 4,
            remaining: 3
        })
    );
    assert_eq!(deck.len(), 3);
}

#[test]
fn clone_is_independent() {
    let original = Deck::new();
    let mut copy = original.clone();
    copy.remove_card("Ah".parse().unwrap()).unwrap();
    assert_eq!(original.len(), 52);
    assert_eq!(copy.len(), 51);
}
