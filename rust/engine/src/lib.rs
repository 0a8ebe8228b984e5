//! # oddsmaker-engine: Monte Carlo Poker Odds
//!
//! Estimates a Texas Hold'em player's chances against any number of
//! opponents by repeatedly dealing out the unknown cards, ranking every
//! player's best hand, and tallying wins, draws, losses and the categories
//! the player ends up with.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), parsing and enumeration
//! - [`deck`] - The pool of undealt cards and its random removal primitives
//! - [`rng`] - Injectable random source and per-batch ChaCha streams
//! - [`rank`] - Hand category classification and tie-break ordering
//! - [`hand`] - Up-to-seven-card hands with a memoised rank
//! - [`odds`] - Win/draw/loss and category frequency aggregation
//! - [`simulation`] - Batched trial driver with cancellation
//! - [`errors`] - Error types for card, hand, deck and simulation operations
//!
//! ## Quick Start
//!
//! ```rust
//! use oddsmaker_engine::rank::{evaluate, Category};
//! use oddsmaker_engine::cards::parse_cards;
//!
//! // Rank a 7-card poker hand
//! let cards = parse_cards("AhKhQhJhTh 2c 3d").unwrap();
//! let rank = evaluate(&cards);
//! assert_eq!(rank.category, Category::RoyalFlush);
//! ```
//!
//! ## Estimating Odds
//!
//! ```rust
//! use oddsmaker_engine::deck::Deck;
//! use oddsmaker_engine::hand::Hand;
//! use oddsmaker_engine::simulation::simulate;
//!
//! let player: Hand = "AsAh".parse().unwrap();
//! let board: Hand = "Kd7c2s".parse().unwrap();
//! let known: Vec<_> = player.cards().iter().chain(board.cards()).copied().collect();
//! let deck = Deck::without(&known);
//!
//! let odds = simulate(&deck, &player, &board, 2, 1_000).unwrap();
//! assert_eq!(odds.total(), 1_000);
//! println!("win {:.1}%", odds.win_percentage() * 100.0);
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod hand;
pub mod odds;
pub mod rank;
pub mod rng;
pub mod simulation;
