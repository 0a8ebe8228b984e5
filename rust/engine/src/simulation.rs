//! Monte Carlo odds estimation.
//!
//! A simulation completes the player's hole cards and the board from a
//! private copy of the deck, deals two cards to each opponent, and compares
//! the player's best hand against the best opponent hand. Trials are grouped
//! into batches; each batch owns its random stream, its scratch hands and
//! its tally, so batches run on rayon's pool without any shared mutable
//! state and are merged once all of them have joined.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{DeckError, SimulationError};
use crate::hand::Hand;
use crate::odds::{Outcome, PokerOdds};
use crate::rank::{Category, HandRank};
use crate::rng::{batch_rng, RandomSource};

pub const HOLE_CARDS: usize = 2;
pub const BOARD_CARDS: usize = 5;
pub const DEFAULT_BATCHES: usize = 5;

/// What happens to `iterations % batches` trials that do not fill a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemainderPolicy {
    /// Leftover trials are not run.
    #[default]
    Drop,
    /// The first batches run one extra trial each.
    Distribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    pub batches: usize,
    /// Base seed for every batch stream; drawn from the OS when `None`.
    pub seed: Option<u64>,
    pub parallel: bool,
    pub remainder: RemainderPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            batches: DEFAULT_BATCHES,
            seed: None,
            parallel: true,
            remainder: RemainderPolicy::Drop,
        }
    }
}

/// External stop signal, observed between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Validated, read-only inputs shared by every batch.
#[derive(Debug, Clone)]
pub struct Scenario {
    deck: Deck,
    player: Vec<Card>,
    board: Vec<Card>,
    opponents: usize,
}

impl Scenario {
    /// Checks the known cards against each other and the deck, and that the
    /// deck can cover a full deal for every opponent.
    pub fn new(
        deck: &Deck,
        player: &Hand,
        board: &Hand,
        opponents: usize,
    ) -> Result<Self, SimulationError> {
        if player.len() > HOLE_CARDS {
            return Err(SimulationError::PlayerHandTooLarge(player.len()));
        }
        if board.len() > BOARD_CARDS {
            return Err(SimulationError::BoardTooLarge(board.len()));
        }
        if let Some(&card) = player.cards().iter().find(|c| board.contains(c)) {
            return Err(SimulationError::CardOnBoardAndInHand(card));
        }
        if let Some(&card) = player
            .cards()
            .iter()
            .chain(board.cards())
            .find(|c| deck.contains(c))
        {
            return Err(SimulationError::CardStillInDeck(card));
        }

        // overflow saturates to usize::MAX
        let needed = HOLE_CARDS
            .checked_mul(opponents)
            .and_then(|n| n.checked_add(HOLE_CARDS - player.len()))
            .and_then(|n| n.checked_add(BOARD_CARDS - board.len()))
            .unwrap_or(usize::MAX);
        if needed > deck.len() {
            return Err(DeckError::InsufficientCards {
                requested: needed,
                remaining: deck.len(),
            }
            .into());
        }

        Ok(Self {
            deck: deck.clone(),
            player: player.cards().to_vec(),
            board: board.cards().to_vec(),
            opponents,
        })
    }

    pub fn opponents(&self) -> usize {
        self.opponents
    }
}

/// Deals random cards from `deck` into `hand` until it holds `target` cards.
/// A hand already at `target` is left untouched.
pub fn deal_to<R: RandomSource + ?Sized>(
    hand: &mut Hand,
    deck: &mut Deck,
    target: usize,
    rng: &mut R,
) -> Result<(), SimulationError> {
    while hand.len() < target {
        let card = deck.remove_random(rng)?;
        hand.add_card(card)?;
    }
    Ok(())
}

/// Per-batch buffers reset at the start of every trial.
#[derive(Debug)]
struct TrialScratch {
    deck: Deck,
    player: Hand,
    board: Hand,
    opponent: Hand,
}

impl TrialScratch {
    fn new(scenario: &Scenario) -> Self {
        Self {
            deck: scenario.deck.clone(),
            player: Hand::new(),
            board: Hand::new(),
            opponent: Hand::new(),
        }
    }

    fn run<R: RandomSource + ?Sized>(
        &mut self,
        scenario: &Scenario,
        rng: &mut R,
    ) -> Result<(Outcome, Category), SimulationError> {
        self.deck.reset_from(&scenario.deck);
        self.player.reset_to(&scenario.player)?;
        self.board.reset_to(&scenario.board)?;

        deal_to(&mut self.player, &mut self.deck, HOLE_CARDS, rng)?;
        deal_to(&mut self.board, &mut self.deck, BOARD_CARDS, rng)?;
        self.player.merge(&self.board)?;
        let player_rank = self.player.rank();

        let mut best: Option<HandRank> = None;
        for _ in 0..scenario.opponents {
            self.opponent.clear();
            deal_to(&mut self.opponent, &mut self.deck, HOLE_CARDS, rng)?;
            self.opponent.merge(&self.board)?;
            let rank = self.opponent.rank();
            best = Some(best.map_or(rank, |b| b.max(rank)));
        }

        Ok((outcome_against(player_rank, best), player_rank.category))
    }
}

/// No opponents means nobody can beat the player: an implicit win.
fn outcome_against(player: HandRank, best_opponent: Option<HandRank>) -> Outcome {
    match best_opponent.map(|b| player.cmp(&b)) {
        None | Some(Ordering::Greater) => Outcome::Win,
        Some(Ordering::Less) => Outcome::Loss,
        Some(Ordering::Equal) => Outcome::Draw,
    }
}

/// Runs `trials` sequential trials on one random stream into a fresh tally.
///
/// The cancel token is checked before each trial; a cancelled batch yields
/// no partial result.
pub fn simulate_batch<R: RandomSource + ?Sized>(
    scenario: &Scenario,
    trials: usize,
    rng: &mut R,
    cancel: &CancelToken,
) -> Result<PokerOdds, SimulationError> {
    let mut odds = PokerOdds::new();
    let mut scratch = TrialScratch::new(scenario);
    for _ in 0..trials {
        if cancel.is_cancelled() {
            return Err(SimulationError::Cancelled);
        }
        let (outcome, category) = scratch.run(scenario, rng)?;
        odds.record(outcome, category);
    }
    Ok(odds)
}

/// Trials per batch under the given remainder policy.
pub fn batch_sizes(iterations: usize, batches: usize, policy: RemainderPolicy) -> Vec<usize> {
    if batches == 0 {
        return Vec::new();
    }
    let base = iterations / batches;
    let extra = iterations % batches;
    (0..batches)
        .map(|i| match policy {
            RemainderPolicy::Drop => base,
            RemainderPolicy::Distribute => base + usize::from(i < extra),
        })
        .collect()
}

/// Batch-splitting driver around [`simulate_batch`].
///
/// # Examples
///
/// ```
/// use oddsmaker_engine::deck::Deck;
/// use oddsmaker_engine::hand::Hand;
/// use oddsmaker_engine::simulation::{SimulationConfig, Simulator};
///
/// let player: Hand = "AsAh".parse().unwrap();
/// let board = Hand::new();
/// let deck = Deck::without(player.cards());
///
/// let sim = Simulator::new(SimulationConfig {
///     seed: Some(7),
///     ..SimulationConfig::default()
/// });
/// let odds = sim.run(&deck, &player, &board, 1, 500).unwrap();
/// assert_eq!(odds.total(), 500);
/// assert!(odds.win_percentage() > 0.5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    config: SimulationConfig,
    cancel: CancelToken,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn run(
        &self,
        deck: &Deck,
        player: &Hand,
        board: &Hand,
        opponents: usize,
        iterations: usize,
    ) -> Result<PokerOdds, SimulationError> {
        if self.config.batches == 0 {
            return Err(SimulationError::NoBatches);
        }
        let scenario = Scenario::new(deck, player, board, opponents)?;
        let plan = batch_sizes(iterations, self.config.batches, self.config.remainder);
        let planned: usize = plan.iter().sum();
        if planned < iterations {
            warn!(
                iterations,
                batches = self.config.batches,
                dropped = iterations - planned,
                "iterations not divisible by batch count, dropping remainder"
            );
        }

        let seed = self.config.seed.unwrap_or_else(rand::random);
        let run_batch = |(index, trials): (usize, usize)| {
            debug!(batch = index, trials, "starting batch");
            let mut rng = batch_rng(seed, index);
            simulate_batch(&scenario, trials, &mut rng, &self.cancel)
        };

        let parts: Vec<PokerOdds> = if self.config.parallel {
            plan.into_par_iter()
                .enumerate()
                .map(run_batch)
                .collect::<Result<Vec<_>, SimulationError>>()?
        } else {
            plan.into_iter()
                .enumerate()
                .map(run_batch)
                .collect::<Result<Vec<_>, SimulationError>>()?
        };

        let odds = PokerOdds::aggregate(&parts);
        info!(
            opponents,
            trials = odds.total(),
            win = odds.win_percentage(),
            draw = odds.draw_percentage(),
            loss = odds.loss_percentage(),
            "simulation complete"
        );
        Ok(odds)
    }
}

/// Estimates the player's odds with the default configuration: five
/// batches, an OS-drawn seed, parallel execution, remainder dropped.
pub fn simulate(
    deck: &Deck,
    player: &Hand,
    board: &Hand,
    opponents: usize,
    iterations: usize,
) -> Result<PokerOdds, SimulationError> {
    Simulator::default().run(deck, player, board, opponents, iterations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn hand(s: &str) -> Hand {
        s.parse().unwrap()
    }

    #[test]
    fn batch_sizes_drop_remainder() {
        assert_eq!(batch_sizes(12, 5, RemainderPolicy::Drop), vec![2; 5]);
        assert_eq!(batch_sizes(4, 5, RemainderPolicy::Drop), vec![0; 5]);
    }

    #[test]
    fn batch_sizes_distribute_remainder() {
        assert_eq!(
            batch_sizes(12, 5, RemainderPolicy::Distribute),
            vec![3, 3, 2, 2, 2]
        );
        assert_eq!(batch_sizes(12, 0, RemainderPolicy::Distribute), Vec::<usize>::new());
    }

    #[test]
    fn deal_to_full_hand_is_noop() {
        let mut h = hand("AsAh");
        let before = h.rank();
        let mut deck = Deck::without(h.cards());
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        deal_to(&mut h, &mut deck, HOLE_CARDS, &mut rng).unwrap();
        assert_eq!(h.len(), 2);
        assert_eq!(deck.len(), 50);
        assert_eq!(h.rank(), before);
    }

    #[test]
    fn deal_to_fills_from_deck() {
        let mut board = hand("2c");
        let mut deck = Deck::without(board.cards());
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        deal_to(&mut board, &mut deck, BOARD_CARDS, &mut rng).unwrap();
        assert_eq!(board.len(), 5);
        assert_eq!(deck.len(), 47);
        assert!(board.cards().iter().all(|c| !deck.contains(c)));
    }

    #[test]
    fn deal_to_fails_on_exhausted_deck() {
        let mut h = Hand::new();
        let mut deck = Deck::from_cards(&[]);
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(
            deal_to(&mut h, &mut deck, 1, &mut rng),
            Err(SimulationError::Deck(DeckError::EmptyDeck))
        );
    }

    #[test]
    fn outcome_compares_against_best_opponent() {
        let pair = hand("AsAh").rank();
        let trips = hand("2s2h2d").rank();
        assert_eq!(outcome_against(pair, None), Outcome::Win);
        assert_eq!(outcome_against(pair, Some(trips)), Outcome::Loss);
        assert_eq!(outcome_against(trips, Some(pair)), Outcome::Win);
        assert_eq!(outcome_against(pair, Some(pair)), Outcome::Draw);
    }

    #[test]
    fn scenario_rejects_bad_inputs() {
        let deck = Deck::new();
        assert_eq!(
            Scenario::new(&deck, &hand("AsAhKd"), &Hand::new(), 1).unwrap_err(),
            SimulationError::PlayerHandTooLarge(3)
        );
        assert_eq!(
            Scenario::new(&deck, &Hand::new(), &hand("2c3c4c5c6c7c"), 1).unwrap_err(),
            SimulationError::BoardTooLarge(6)
        );
        assert_eq!(
            Scenario::new(&deck, &hand("As"), &Hand::new(), 1).unwrap_err(),
            SimulationError::CardStillInDeck("As".parse().unwrap())
        );
        let known = hand("AsKs");
        assert_eq!(
            Scenario::new(&Deck::without(known.cards()), &known, &hand("Ks"), 1).unwrap_err(),
            SimulationError::CardOnBoardAndInHand("Ks".parse().unwrap())
        );
    }

    #[test]
    fn scenario_requires_enough_cards_for_every_opponent() {
        let deck = Deck::from_cards(&crate::cards::parse_cards("2c3c4c5c6c7c8c9c").unwrap());
        // 2 + 5 + 2 = 9 needed
        assert_eq!(
            Scenario::new(&deck, &Hand::new(), &Hand::new(), 1).unwrap_err(),
            SimulationError::Deck(DeckError::InsufficientCards {
                requested: 9,
                remaining: 8
            })
        );
        assert!(Scenario::new(&deck, &Hand::new(), &Hand::new(), 0).is_ok());
    }

    #[test]
    fn overflowing_opponent_count_is_insufficient_cards() {
        let deck = Deck::new();
        assert_eq!(
            Scenario::new(&deck, &Hand::new(), &Hand::new(), usize::MAX / 2 + 1).unwrap_err(),
            SimulationError::Deck(DeckError::InsufficientCards {
                requested: usize::MAX,
                remaining: 52
            })
        );
        assert_eq!(
            simulate(&deck, &Hand::new(), &Hand::new(), usize::MAX, 5),
            Err(SimulationError::Deck(DeckError::InsufficientCards {
                requested: usize::MAX,
                remaining: 52
            }))
        );
    }

    #[test]
    fn cancelled_batch_reports_no_result() {
        let player = hand("AsAh");
        let scenario =
            Scenario::new(&Deck::without(player.cards()), &player, &Hand::new(), 1).unwrap();
        let cancel = CancelToken::new();
        cancel.cancel();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        assert_eq!(
            simulate_batch(&scenario, 10, &mut rng, &cancel),
            Err(SimulationError::Cancelled)
        );
    }

    #[test]
    fn zero_batches_is_rejected() {
        let sim = Simulator::new(SimulationConfig {
            batches: 0,
            ..SimulationConfig::default()
        });
        let player = hand("AsAh");
        assert_eq!(
            sim.run(&Deck::without(player.cards()), &player, &Hand::new(), 1, 10),
            Err(SimulationError::NoBatches)
        );
    }
}
