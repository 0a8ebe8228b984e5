use std::collections::BTreeMap;

use serde::Serialize;

use crate::rank::Category;

/// Result of one trial from the player's point of view.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

/// Win/draw/loss counters plus how often the player made each category.
///
/// One instance is filled per batch and batches are merged afterwards.
/// Merging is plain counter addition, so it is commutative and associative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PokerOdds {
    wins: u64,
    draws: u64,
    losses: u64,
    frequencies: BTreeMap<Category, u64>,
}

impl Default for PokerOdds {
    fn default() -> Self {
        Self::new()
    }
}

impl PokerOdds {
    /// Empty tally with every category present at zero.
    pub fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
            frequencies: Category::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }

    pub fn record(&mut self, outcome: Outcome, category: Category) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
        *self.frequencies.entry(category).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: &PokerOdds) {
        self.wins += other.wins;
        self.draws += other.draws;
        self.losses += other.losses;
        for (&category, &count) in &other.frequencies {
            *self.frequencies.entry(category).or_insert(0) += count;
        }
    }

    pub fn aggregate<'a, I>(parts: I) -> PokerOdds
    where
        I: IntoIterator<Item = &'a PokerOdds>,
    {
        let mut total = PokerOdds::new();
        for part in parts {
            total.merge(part);
        }
        total
    }

    pub fn wins(&self) -> u64 {
        self.wins
    }
    pub fn draws(&self) -> u64 {
        self.draws
    }
    pub fn losses(&self) -> u64 {
        self.losses
    }
    pub fn total(&self) -> u64 {
        self.wins + self.draws + self.losses
    }

    pub fn win_percentage(&self) -> f64 {
        self.fraction(self.wins)
    }
    pub fn draw_percentage(&self) -> f64 {
        self.fraction(self.draws)
    }
    pub fn loss_percentage(&self) -> f64 {
        self.fraction(self.losses)
    }

    pub fn frequency(&self, category: Category) -> u64 {
        self.frequencies.get(&category).copied().unwrap_or(0)
    }

    pub fn frequencies(&self) -> &BTreeMap<Category, u64> {
        &self.frequencies
    }

    pub fn percentage(&self, category: Category) -> f64 {
        self.fraction(self.frequency(category))
    }

    pub fn percentages(&self) -> BTreeMap<Category, f64> {
        self.frequencies
            .iter()
            .map(|(&c, &n)| (c, self.fraction(n)))
            .collect()
    }

    // Zero trials is the only case that degrades to 0.0.
    fn fraction(&self, count: u64) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            count as f64 / total as f64
        }
    }
}
