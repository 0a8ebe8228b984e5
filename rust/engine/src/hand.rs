use std::cell::Cell;
use std::fmt;
use std::str::FromStr;

use crate::cards::{parse_cards, Card};
use crate::errors::{HandError, ParseHandError};
use crate::rank::{evaluate, HandRank};

/// Most cards a hand can hold: two hole cards plus a five-card board.
pub const MAX_HAND_CARDS: usize = 7;

/// An owned set of up to seven distinct cards with a memoised rank.
///
/// Every mutation marks the cached rank dirty; [`Hand::rank`] recomputes it
/// from the current cards on the next read.
///
/// # Examples
///
/// ```
/// use oddsmaker_engine::hand::Hand;
/// use oddsmaker_engine::rank::Category;
///
/// let mut hand: Hand = "AsAh".parse().unwrap();
/// assert_eq!(hand.rank().category, Category::Pair);
///
/// hand.add_card("Ad".parse().unwrap()).unwrap();
/// assert_eq!(hand.rank().category, Category::ThreeOfAKind);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
    /// `None` when dirty
    rank: Cell<Option<HandRank>>,
}

impl Hand {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(MAX_HAND_CARDS),
            rank: Cell::new(None),
        }
    }

    /// Builds a hand from an initial card set, rejecting more than seven
    /// cards or any duplicate.
    pub fn from_cards(cards: &[Card]) -> Result<Self, HandError> {
        let mut hand = Self::new();
        hand.add_cards(cards)?;
        Ok(hand)
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

    pub fn add_card(&mut self, card: Card) -> Result<(), HandError> {
        if self.cards.len() >= MAX_HAND_CARDS {
            return Err(HandError::TooManyCards {
                max: MAX_HAND_CARDS,
            });
        }
        if self.cards.contains(&card) {
            return Err(HandError::DuplicateCard(card));
        }
        self.cards.push(card);
        self.rank.set(None);
        Ok(())
    }

    /// Adds all cards or none of them.
    pub fn add_cards(&mut self, cards: &[Card]) -> Result<(), HandError> {
        if self.cards.len() + cards.len() > MAX_HAND_CARDS {
            return Err(HandError::TooManyCards {
                max: MAX_HAND_CARDS,
            });
        }
        for (i, card) in cards.iter().enumerate() {
            if self.cards.contains(card) || cards[..i].contains(card) {
                return Err(HandError::DuplicateCard(*card));
            }
        }
        self.cards.extend_from_slice(cards);
        self.rank.set(None);
        Ok(())
    }

    /// Adds every card of `other` (e.g. the board) to this hand.
    pub fn merge(&mut self, other: &Hand) -> Result<(), HandError> {
        self.add_cards(&other.cards)
    }

    pub fn remove_card(&mut self, card: Card) -> Result<(), HandError> {
        let pos = self
            .cards
            .iter()
            .position(|c| *c == card)
            .ok_or(HandError::CardNotInHand(card))?;
        self.cards.remove(pos);
        self.rank.set(None);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.rank.set(None);
    }

    /// Replaces the contents with `cards`, keeping the allocation.
    pub fn reset_to(&mut self, cards: &[Card]) -> Result<(), HandError> {
        self.clear();
        self.add_cards(cards)
    }

    pub fn rank(&self) -> HandRank {
        if let Some(rank) = self.rank.get() {
            return rank;
        }
        let rank = evaluate(&self.cards);
        self.rank.set(Some(rank));
        rank
    }
}

impl PartialEq for Hand {
    /// Card order is irrelevant.
    fn eq(&self, other: &Self) -> bool {
        self.cards.len() == other.cards.len() && self.cards.iter().all(|c| other.contains(c))
    }
}

impl Eq for Hand {}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "[{}]", cards.join(" "))
    }
}

impl FromStr for Hand {
    type Err = ParseHandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cards = parse_cards(s)?;
        Ok(Hand::from_cards(&cards)?)
    }
}
