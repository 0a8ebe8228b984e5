//! Eval command handler: classifies a set of one to seven cards.

use std::io::Write;

use oddsmaker_engine::cards::parse_cards;
use oddsmaker_engine::hand::Hand;

use crate::error::CliError;

pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards)?;
    if cards.is_empty() {
        return Err(CliError::InvalidInput("at least one card is required".into()));
    }
    let hand = Hand::from_cards(&cards)?;
    writeln!(out, "{}: {}", hand, hand.rank())?;
    Ok(())
}
