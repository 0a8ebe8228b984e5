use thiserror::Error;

use crate::cards::Card;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("No card given")]
    Empty,
    #[error("Unknown card rank '{0}'")]
    UnknownRank(char),
    #[error("Unknown card suit '{0}'")]
    UnknownSuit(char),
    #[error("Card rank is missing its suit")]
    MissingSuit,
    #[error("Expected a single card, got '{0}'")]
    TrailingInput(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandError {
    #[error("A hand cannot contain more than {max} cards")]
    TooManyCards { max: usize },
    #[error("A hand cannot contain duplicate cards ({0})")]
    DuplicateCard(Card),
    #[error("Card {0} is not in the hand")]
    CardNotInHand(Card),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseHandError {
    #[error(transparent)]
    Card(#[from] CardParseError),
    #[error(transparent)]
    Hand(#[from] HandError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("No cards left in deck to take")]
    EmptyDeck,
    #[error("Cannot take {requested} cards, only {remaining} left in deck")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Card {0} is not in the deck")]
    CardNotInDeck(Card),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Player hand has {0} cards, at most 2 are allowed")]
    PlayerHandTooLarge(usize),
    #[error("Board has {0} cards, at most 5 are allowed")]
    BoardTooLarge(usize),
    #[error("Card {0} is both known and still in the deck")]
    CardStillInDeck(Card),
    #[error("Card {0} is in both the player hand and the board")]
    CardOnBoardAndInHand(Card),
    #[error("Batch count must be at least 1")]
    NoBatches,
    #[error("Simulation was cancelled")]
    Cancelled,
    #[error(transparent)]
    Deck(#[from] DeckError),
    #[error(transparent)]
    Hand(#[from] HandError),
}
