//! Candidate-play search for automated seats.
//!
//! Every candidate draws its cards from the hand's own rank groups, so no
//! two candidates share a mutable pool and each one is independently
//! playable.

use crate::card::{Card, Hand, Rank, MAX_SEQUENCE_ORDER};
use crate::pattern::{
    beats, classify, Pattern, MAX_PLAY_SIZE, MAX_STRAIGHT_LEN, MIN_AIRPLANE_BODIES,
    MIN_PAIR_SEQUENCE_PAIRS, MIN_STRAIGHT_LEN,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

const MAX_PAIR_SEQUENCE_PAIRS: usize = MAX_PLAY_SIZE / 2;

/// Cards of the hand grouped by rank order, each group in suit order.
struct RankGroups {
    groups: BTreeMap<u8, Vec<Card>>,
}

impl RankGroups {
    fn new(hand: &Hand) -> Self {
        let mut groups: BTreeMap<u8, Vec<Card>> = BTreeMap::new();
        for card in hand.cards() {
            groups.entry(card.rank_order()).or_default().push(*card);
        }
        RankGroups { groups }
    }

    fn count(&self, order: u8) -> usize {
        self.groups.get(&order).map_or(0, |group| group.len())
    }

    /// Rank orders holding at least `n` cards.
    fn with_at_least(&self, n: usize) -> Vec<u8> {
        self.groups
            .iter()
            .filter(|(_, group)| group.len() >= n)
            .map(|(order, _)| *order)
            .collect()
    }

    fn take(&self, order: u8, n: usize) -> Vec<Card> {
        self.groups
            .get(&order)
            .map(|group| group.iter().take(n).copied().collect())
            .unwrap_or_default()
    }

    /// `per_rank` cards of every rank in `start..start + len`.
    fn take_run(&self, start: u8, len: usize, per_rank: usize) -> Vec<Card> {
        (0..len as u8)
            .flat_map(|offset| self.take(start + offset, per_rank))
            .collect()
    }

    /// Every run `start..start + len` of sequenceable ranks with at least
    /// `per_rank` cards each, for each `len` in `lengths`.
    fn runs(&self, per_rank: usize, lengths: std::ops::RangeInclusive<usize>) -> Vec<(u8, usize)> {
        let mut runs = Vec::new();
        for start in Rank::Three.order()..=MAX_SEQUENCE_ORDER {
            for len in lengths.clone() {
                let end = start as usize + len - 1;
                if end > MAX_SEQUENCE_ORDER as usize {
                    break;
                }
                if (start..=end as u8).all(|order| self.count(order) >= per_rank) {
                    runs.push((start, len));
                } else {
                    break;
                }
            }
        }
        runs
    }
}

fn push_classified(plays: &mut Vec<Pattern>, cards: Vec<Card>) {
    if let Some(pattern) = classify(&cards) {
        plays.push(pattern);
    }
}

/// All `k`-element combinations of `items`, in lexicographic order.
fn combinations(items: &[u8], k: usize) -> Vec<Vec<u8>> {
    if k == 0 {
        return vec![Vec::new()];
    }
    if items.len() < k {
        return Vec::new();
    }
    let mut results = Vec::new();
    let mut current = Vec::with_capacity(k);
    fn recurse(
        items: &[u8],
        start: usize,
        k: usize,
        current: &mut Vec<u8>,
        results: &mut Vec<Vec<u8>>,
    ) {
        if current.len() == k {
            results.push(current.clone());
            return;
        }
        for idx in start..items.len() {
            current.push(items[idx]);
            recurse(items, idx + 1, k, current, results);
            current.pop();
        }
    }
    recurse(items, 0, k, &mut current, &mut results);
    results
}

fn rocket(groups: &RankGroups) -> Option<Pattern> {
    let black = groups.take(Rank::BlackJoker.order(), 1);
    let red = groups.take(Rank::RedJoker.order(), 1);
    if black.is_empty() || red.is_empty() {
        return None;
    }
    classify(&[black[0], red[0]])
}

fn bombs(groups: &RankGroups) -> Vec<Pattern> {
    let mut plays = Vec::new();
    for order in groups.with_at_least(4) {
        push_classified(&mut plays, groups.take(order, 4));
    }
    plays
}

fn of_a_kind(groups: &RankGroups, plays: &mut Vec<Pattern>) {
    for n in 1..=3 {
        for order in groups.with_at_least(n) {
            push_classified(plays, groups.take(order, n));
        }
    }
}

fn triplets_with(groups: &RankGroups, plays: &mut Vec<Pattern>) {
    for triplet in groups.with_at_least(3) {
        for wing_size in 1..=2 {
            for wing in groups.with_at_least(wing_size) {
                if wing == triplet {
                    continue;
                }
                let mut cards = groups.take(triplet, 3);
                cards.extend(groups.take(wing, wing_size));
                push_classified(plays, cards);
            }
        }
    }
}

fn sequences(groups: &RankGroups, plays: &mut Vec<Pattern>) {
    for (start, len) in groups.runs(1, MIN_STRAIGHT_LEN..=MAX_STRAIGHT_LEN) {
        push_classified(plays, groups.take_run(start, len, 1));
    }
    for (start, len) in groups.runs(2, MIN_PAIR_SEQUENCE_PAIRS..=MAX_PAIR_SEQUENCE_PAIRS) {
        push_classified(plays, groups.take_run(start, len, 2));
    }
}

fn airplanes(groups: &RankGroups, plays: &mut Vec<Pattern>) {
    let max_bodies = MAX_PLAY_SIZE / 3;
    for (start, bodies) in groups.runs(3, MIN_AIRPLANE_BODIES..=max_bodies) {
        let body = groups.take_run(start, bodies, 3);
        let end = start + bodies as u8;
        push_classified(plays, body.clone());

        for wing_size in 1..=2 {
            if body.len() + bodies * wing_size > MAX_PLAY_SIZE {
                continue;
            }
            let wing_ranks: Vec<u8> = groups
                .with_at_least(wing_size)
                .into_iter()
                .filter(|order| *order < start || *order >= end)
                .collect();
            for wings in combinations(&wing_ranks, bodies) {
                let mut cards = body.clone();
                for wing in wings {
                    cards.extend(groups.take(wing, wing_size));
                }
                push_classified(plays, cards);
            }
        }
    }
}

fn ordinary(groups: &RankGroups) -> Vec<Pattern> {
    let mut plays = Vec::new();
    of_a_kind(groups, &mut plays);
    triplets_with(groups, &mut plays);
    sequences(groups, &mut plays);
    airplanes(groups, &mut plays);
    plays
}

fn compare_plays(a: &Pattern, b: &Pattern) -> Ordering {
    a.kind
        .priority()
        .cmp(&b.kind.priority())
        .then(a.length.cmp(&b.length))
        .then(a.primary.cmp(&b.primary))
        .then_with(|| {
            let a_orders = a.cards.iter().map(|card| card.rank_order());
            let b_orders = b.cards.iter().map(|card| card.rank_order());
            a_orders.cmp(b_orders)
        })
}

/// Cheapest first: kind priority, then length, then rank.
pub fn sort_plays(plays: &mut [Pattern]) {
    plays.sort_by(compare_plays);
}

/// Every play the hand can make that beats `table`, cheapest first.
pub fn all_plays(hand: &Hand, table: Option<&Pattern>) -> Vec<Pattern> {
    let groups = RankGroups::new(hand);
    let mut plays = ordinary(&groups);
    plays.extend(bombs(&groups));
    plays.extend(rocket(&groups));
    plays.retain(|play| beats(play, table));
    sort_plays(&mut plays);
    plays
}

/// Candidate plays for a greedy seat.
///
/// A legal Rocket is returned alone. Against a Bomb only stronger Bombs are
/// offered (lowest first); an empty result means the seat must pass.
/// Otherwise every ordinary play that beats the table, followed by the
/// qualifying Bombs.
pub fn find_plays(hand: &Hand, table: Option<&Pattern>) -> Vec<Pattern> {
    let groups = RankGroups::new(hand);
    if let Some(rocket) = rocket(&groups).filter(|play| beats(play, table)) {
        return vec![rocket];
    }

    let mut qualifying_bombs: Vec<Pattern> = bombs(&groups)
        .into_iter()
        .filter(|play| beats(play, table))
        .collect();
    sort_plays(&mut qualifying_bombs);

    if table.is_some_and(|pattern| pattern.kind.is_bomb_or_rocket()) {
        return qualifying_bombs;
    }

    let mut plays: Vec<Pattern> = ordinary(&groups)
        .into_iter()
        .filter(|play| beats(play, table))
        .collect();
    sort_plays(&mut plays);
    plays.extend(qualifying_bombs);
    plays
}
