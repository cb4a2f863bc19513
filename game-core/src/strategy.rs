//! Automated seats.
//!
//! A strategy only ever sees its own hand and the table pattern; it returns
//! a choice, and the caller submits it through the `apply_*` entry points.
//! Any pacing or "thinking" delay belongs to the presentation layer.

use crate::card::{Card, Hand, Rank};
use crate::pattern::Pattern;
use crate::search::find_plays;

pub trait Strategy: Send + Sync {
    /// Whether to call landlord.
    fn choose_bid(&self, hand: &Hand) -> bool;

    /// Cards to play, or `None` to pass.
    fn choose_play(&self, hand: &Hand, table: Option<&Pattern>) -> Option<Vec<Card>>;
}

/// Plays the cheapest legal candidate; calls landlord on a strong hand.
#[derive(Clone, Copy, Debug)]
pub struct GreedyBot {
    pub call_threshold: u32,
}

impl Default for GreedyBot {
    fn default() -> Self {
        GreedyBot { call_threshold: 7 }
    }
}

/// Bidding score: one point per A or 2, two per joker, three per bomb.
pub fn hand_strength(hand: &Hand) -> u32 {
    let high: u32 = hand
        .cards()
        .iter()
        .map(|card| match card.rank {
            Rank::Ace | Rank::Two => 1,
            Rank::BlackJoker | Rank::RedJoker => 2,
            _ => 0,
        })
        .sum();
    let bombs = hand.rank_counts().values().filter(|count| **count == 4).count() as u32;
    high + bombs * 3
}

impl Strategy for GreedyBot {
    fn choose_bid(&self, hand: &Hand) -> bool {
        hand_strength(hand) >= self.call_threshold
    }

    fn choose_play(&self, hand: &Hand, table: Option<&Pattern>) -> Option<Vec<Card>> {
        find_plays(hand, table)
            .into_iter()
            .next()
            .map(|pattern| pattern.cards)
    }
}
