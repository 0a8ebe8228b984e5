use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;
use crate::rng::RandomSource;

/// The pool of cards still available for dealing.
///
/// Order carries no meaning: cards are always taken at a uniformly random
/// position, so removal uses `swap_remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A full 52-card deck in canonical order.
    pub fn new() -> Self {
        Self { cards: full_deck() }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self {
            cards: cards.to_vec(),
        }
    }

    /// A full deck minus the given cards (typically the known hole and board cards).
    pub fn without(known: &[Card]) -> Self {
        let mut deck = Self::new();
        deck.cards.retain(|c| !known.contains(c));
        deck
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    /// Restores the full 52 cards and permutes them.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards = full_deck();
        self.cards.shuffle(rng);
    }

    pub fn remove_card(&mut self, card: Card) -> Result<(), DeckError> {
        let pos = self
            .cards
            .iter()
            .position(|c| *c == card)
            .ok_or(DeckError::CardNotInDeck(card))?;
        self.cards.remove(pos);
        Ok(())
    }

    pub fn remove_random<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> Result<Card, DeckError> {
        if self.cards.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        let i = rng.next_below(self.cards.len());
        Ok(self.cards.swap_remove(i))
    }

    /// Takes `k` distinct random cards. Nothing is removed when `k` exceeds
    /// the remaining count.
    pub fn remove_random_n<R: RandomSource + ?Sized>(
        &mut self,
        k: usize,
        rng: &mut R,
    ) -> Result<Vec<Card>, DeckError> {
        if k > self.cards.len() {
            return Err(DeckError::InsufficientCards {
                requested: k,
                remaining: self.cards.len(),
            });
        }
        let mut taken = Vec::with_capacity(k);
        for _ in 0..k {
            taken.push(self.remove_random(rng)?);
        }
        Ok(taken)
    }

    /// Refills this deck with the contents of `other`, keeping the allocation.
    pub fn reset_from(&mut self, other: &Deck) {
        self.cards.clone_from(&other.cards);
    }
}
