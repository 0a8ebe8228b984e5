use oddsmaker_engine::cards::{parse_cards, Card};
use oddsmaker_engine::deck::Deck;
use oddsmaker_engine::errors::{DeckError, SimulationError};
use oddsmaker_engine::hand::Hand;
use oddsmaker_engine::rank::Category;
use oddsmaker_engine::rng::RandomSource;
use oddsmaker_engine::simulation::{
    simulate, simulate_batch, CancelToken, RemainderPolicy, Scenario, SimulationConfig, Simulator,
};

/// Always picks the first remaining card.
struct FirstCard;

impl RandomSource for FirstCard {
    fn next_below(&mut self, _n: usize) -> usize {
        0
    }
}

fn hand(s: &str) -> Hand {
    s.parse().unwrap()
}

fn deck_without(hands: &[&Hand]) -> Deck {
    let known: Vec<Card> = hands.iter().flat_map(|h| h.cards().iter().copied()).collect();
    Deck::without(&known)
}

fn seeded(seed: u64) -> Simulator {
    Simulator::new(SimulationConfig {
        seed: Some(seed),
        ..SimulationConfig::default()
    })
}

#[test]
fn pocket_aces_heads_up_win_near_85_percent() {
    let player = hand("AsAh");
    let board = Hand::new();
    let deck = deck_without(&[&player]);
    let odds = seeded(2024).run(&deck, &player, &board, 1, 20_000).unwrap();
    assert_eq!(odds.total(), 20_000);
    let win = odds.win_percentage();
    assert!((0.83..=0.87).contains(&win), "win percentage {win}");
    assert!(odds.draw_percentage() < 0.02);
}

#[test]
fn royal_flush_in_hand_always_wins() {
    let player = hand("AhKh");
    let board = hand("QhJhTh2c3d");
    let deck = deck_without(&[&player, &board]);
    let odds = seeded(1).run(&deck, &player, &board, 4, 500).unwrap();
    assert_eq!(odds.win_percentage(), 1.0);
    assert_eq!(odds.draws(), 0);
    assert_eq!(odds.losses(), 0);
    assert_eq!(odds.percentage(Category::RoyalFlush), 1.0);
}

#[test]
fn royal_flush_on_board_is_shared_by_every_opponent() {
    let player = hand("2c3d");
    let board = hand("AhKhQhJhTh");
    let deck = deck_without(&[&player, &board]);

    let heads_up = seeded(3).run(&deck, &player, &board, 2, 100).unwrap();
    assert_eq!(heads_up.draw_percentage(), 1.0);
    assert_eq!(heads_up.percentage(Category::RoyalFlush), 1.0);

    let alone = seeded(3).run(&deck, &player, &board, 0, 100).unwrap();
    assert_eq!(alone.win_percentage(), 1.0);
    assert_eq!(alone.frequency(Category::RoyalFlush), 100);
}

#[test]
fn zero_opponents_counts_as_win() {
    let player = hand("7c2d");
    let deck = deck_without(&[&player]);
    let odds = seeded(11).run(&deck, &player, &Hand::new(), 0, 250).unwrap();
    assert_eq!(odds.wins(), 250);
}

#[test]
fn forced_deck_is_identical_across_calls() {
    let player = hand("AhKh");
    let board = hand("QhJh");
    let deck = Deck::from_cards(&parse_cards("Th2c3d").unwrap());
    let first = seeded(5).run(&deck, &player, &board, 0, 50).unwrap();
    let second = seeded(5).run(&deck, &player, &board, 0, 50).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.frequency(Category::RoyalFlush), 50);
}

#[test]
fn fixed_seed_is_reproducible_and_independent_of_threading() {
    let player = hand("QsJs");
    let board = hand("Ts2d");
    let deck = deck_without(&[&player, &board]);
    let parallel = seeded(99).run(&deck, &player, &board, 3, 2_000).unwrap();
    let again = seeded(99).run(&deck, &player, &board, 3, 2_000).unwrap();
    let sequential = Simulator::new(SimulationConfig {
        seed: Some(99),
        parallel: false,
        ..SimulationConfig::default()
    })
    .run(&deck, &player, &board, 3, 2_000)
    .unwrap();
    assert_eq!(parallel, again);
    assert_eq!(parallel, sequential);
}

#[test]
fn remainder_trials_are_dropped_by_default() {
    let player = hand("9c9d");
    let deck = deck_without(&[&player]);
    let odds = seeded(8).run(&deck, &player, &Hand::new(), 1, 103).unwrap();
    assert_eq!(odds.total(), 100);
}

#[test]
fn remainder_trials_can_be_distributed() {
    let player = hand("9c9d");
    let deck = deck_without(&[&player]);
    let sim = Simulator::new(SimulationConfig {
        seed: Some(8),
        batches: 4,
        remainder: RemainderPolicy::Distribute,
        ..SimulationConfig::default()
    });
    let odds = sim.run(&deck, &player, &Hand::new(), 1, 103).unwrap();
    assert_eq!(odds.total(), 103);
}

#[test]
fn zero_iterations_yield_empty_result() {
    let player = hand("9c9d");
    let deck = deck_without(&[&player]);
    let odds = simulate(&deck, &player, &Hand::new(), 1, 0).unwrap();
    assert_eq!(odds.total(), 0);
    assert_eq!(odds.win_percentage(), 0.0);
}

#[test]
fn scripted_source_deals_a_known_runout() {
    // taking index 0 with swap_remove deals Ks, 2c, 7d, 9h, Jc to the board,
    // then Kd, Kc to the opponent
    let deck = Deck::from_cards(&parse_cards("Ks 3s 4s Kc Kd Jc 9h 7d 2c").unwrap());
    let player = hand("AsAh");
    let scenario = Scenario::new(&deck, &player, &Hand::new(), 1).unwrap();
    let odds = simulate_batch(&scenario, 6, &mut FirstCard, &CancelToken::new()).unwrap();
    assert_eq!(odds.losses(), 6);
    assert_eq!(odds.frequency(Category::Pair), 6);
}

#[test]
fn cancelled_simulation_returns_no_result() {
    let player = hand("AsAh");
    let deck = deck_without(&[&player]);
    let cancel = CancelToken::new();
    cancel.cancel();
    let sim = seeded(1).with_cancel(cancel);
    assert_eq!(
        sim.run(&deck, &player, &Hand::new(), 1, 100),
        Err(SimulationError::Cancelled)
    );
}

#[test]
fn undersized_deck_is_reported() {
    let player = hand("AsAh");
    let deck = Deck::from_cards(&parse_cards("2c3c4c5c6c7c8c").unwrap());
    assert_eq!(
        simulate(&deck, &player, &Hand::new(), 2, 10),
        Err(SimulationError::Deck(DeckError::InsufficientCards {
            requested: 9,
            remaining: 7
        }))
    );
}

#[test]
fn inputs_are_left_untouched() {
    let player = hand("Ac");
    let board = hand("Kd");
    let deck = deck_without(&[&player, &board]);
    seeded(4).run(&deck, &player, &board, 2, 50).unwrap();
    assert_eq!(player.len(), 1);
    assert_eq!(board.len(), 1);
    assert_eq!(deck.len(), 50);
}
