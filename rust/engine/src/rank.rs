use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Poker hand categories in strength order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::HighCard,
        Category::Pair,
        Category::TwoPair,
        Category::ThreeOfAKind,
        Category::Straight,
        Category::Flush,
        Category::FullHouse,
        Category::FourOfAKind,
        Category::StraightFlush,
        Category::RoyalFlush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Totally ordered strength of a hand: category first, then kickers
/// lexicographically.
///
/// Kickers are card values (2..=14) ordered for tie-breaking and padded
/// with zeros, so a shorter kicker list compares below a longer one that
/// shares its prefix.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HandRank {
    pub category: Category,
    pub kickers: [u8; 5],
}

impl HandRank {
    fn new(category: Category, values: &[u8]) -> Self {
        let mut kickers = [0u8; 5];
        for (slot, &v) in kickers.iter_mut().zip(values) {
            *slot = v;
        }
        Self { category, kickers }
    }

    /// Kicker values as card ranks, padding skipped.
    pub fn kicker_ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.kickers.iter().filter_map(|&v| Rank::from_value(v))
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)?;
        let kickers: Vec<String> = self.kicker_ranks().map(|r| format!("{:?}", r)).collect();
        if !kickers.is_empty() {
            write!(f, " [{}]", kickers.join(", "))?;
        }
        Ok(())
    }
}

/// Best rank reachable from up to seven distinct cards.
///
/// Fewer than five cards still produce a rank under the same rules, with
/// shorter kicker lists. Duplicate cards are the caller's problem; [`crate::hand::Hand`]
/// rejects them before they get here.
pub fn evaluate(cards: &[Card]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask = [0u16; 4];
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1 << r;
        let s = c.suit.index();
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1 << r;
    }

    // at most one suit can hold five of seven cards
    if let Some(s) = (0..4).find(|&s| suit_counts[s] >= 5) {
        return flush_family(by_suit_mask[s]);
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandRank::new(Category::Straight, &[high]);
    }

    grouped(&rank_counts)
}

fn flush_family(suit_mask: u16) -> HandRank {
    match straight_high_from_mask(suit_mask) {
        Some(14) => HandRank::new(Category::RoyalFlush, &[]),
        Some(high) => HandRank::new(Category::StraightFlush, &[high]),
        None => {
            let mut top = [0u8; 5];
            let mut n = 0;
            for r in (2..=14u8).rev() {
                if n == 5 {
                    break;
                }
                if suit_mask & (1 << r) != 0 {
                    top[n] = r;
                    n += 1;
                }
            }
            HandRank::new(Category::Flush, &top[..n])
        }
    }
}

/// Highest card of the best five-card run, with the wheel topping out at 5.
fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        (m & window) == window
    })
}

fn grouped(rank_counts: &[u8; 15]) -> HandRank {
    // (count, value), count descending then value descending
    let mut groups = [(0u8, 0u8); 13];
    let mut n = 0;
    for v in (2..=14u8).rev() {
        let count = rank_counts[v as usize];
        if count > 0 {
            groups[n] = (count, v);
            n += 1;
        }
    }
    let groups = &mut groups[..n];
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let Some(&(top_count, top_value)) = groups.first() else {
        return HandRank::new(Category::HighCard, &[]);
    };
    let second = groups.get(1).copied();

    match (top_count, second) {
        (4.., _) => HandRank {
            category: Category::FourOfAKind,
            kickers: with_kickers(&[top_value], rank_counts, 1),
        },
        (3, Some((c2, v2))) if c2 >= 2 => HandRank::new(Category::FullHouse, &[top_value, v2]),
        (3, _) => HandRank {
            category: Category::ThreeOfAKind,
            kickers: with_kickers(&[top_value], rank_counts, 2),
        },
        // a third pair still counts as a kicker
        (2, Some((2, v2))) => HandRank {
            category: Category::TwoPair,
            kickers: with_kickers(&[top_value, v2], rank_counts, 1),
        },
        (2, _) => HandRank {
            category: Category::Pair,
            kickers: with_kickers(&[top_value], rank_counts, 3),
        },
        (1, _) => HandRank {
            category: Category::HighCard,
            kickers: with_kickers(&[], rank_counts, 5),
        },
        (count, _) => unreachable!("value group of size {count} cannot be classified"),
    }
}

/// `head` followed by up to `take` of the highest other values present;
/// unused slots are zero.
fn with_kickers(head: &[u8], rank_counts: &[u8; 15], take: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    out[..head.len()].copy_from_slice(head);
    let rest = (2..=14u8)
        .rev()
        .filter(|&v| rank_counts[v as usize] > 0 && !head.contains(&v))
        .take(take);
    for (slot, v) in out[head.len()..].iter_mut().zip(rest) {
        *slot = v;
    }
    out
}
