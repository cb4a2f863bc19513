use crate::card::{rank_counts, sort_cards, Card, Rank, MAX_SEQUENCE_ORDER};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Comparison key of a Rocket; above any Bomb.
pub const ROCKET_ORDER: u8 = 100;
/// Largest selection that can be played at once (a landlord's full hand).
pub const MAX_PLAY_SIZE: usize = 20;
pub const MIN_STRAIGHT_LEN: usize = 5;
pub const MAX_STRAIGHT_LEN: usize = 12;
pub const MIN_PAIR_SEQUENCE_PAIRS: usize = 3;
pub const MIN_AIRPLANE_BODIES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wings {
    None,
    Singles,
    Pairs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternKind {
    Single,
    Pair,
    Triplet,
    TripletSingle,
    TripletPair,
    Straight,
    PairSequence,
    Airplane(Wings),
    Bomb,
    Rocket,
}

impl PatternKind {
    /// Ordering used when ranking candidate plays: ordinary shapes first,
    /// then Bomb, then Rocket.
    pub fn priority(&self) -> u8 {
        match self {
            PatternKind::Single => 0,
            PatternKind::Pair => 1,
            PatternKind::Triplet => 2,
            PatternKind::TripletSingle => 3,
            PatternKind::TripletPair => 4,
            PatternKind::Straight => 5,
            PatternKind::PairSequence => 6,
            PatternKind::Airplane(Wings::None) => 7,
            PatternKind::Airplane(Wings::Singles) => 8,
            PatternKind::Airplane(Wings::Pairs) => 9,
            PatternKind::Bomb => 10,
            PatternKind::Rocket => 11,
        }
    }

    pub fn is_bomb_or_rocket(&self) -> bool {
        matches!(self, PatternKind::Bomb | PatternKind::Rocket)
    }

    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Single => "Single",
            PatternKind::Pair => "Pair",
            PatternKind::Triplet => "Triplet",
            PatternKind::TripletSingle => "Triplet + Single",
            PatternKind::TripletPair => "Triplet + Pair",
            PatternKind::Straight => "Straight",
            PatternKind::PairSequence => "Pair Sequence",
            PatternKind::Airplane(Wings::None) => "Airplane",
            PatternKind::Airplane(Wings::Singles) => "Airplane + Singles",
            PatternKind::Airplane(Wings::Pairs) => "Airplane + Pairs",
            PatternKind::Bomb => "Bomb",
            PatternKind::Rocket => "Rocket",
        }
    }
}

/// A classified play. `primary` is the comparison key: the rank order of the
/// base unit (lowest rank of a sequence, rank of the triplet part, ...).
/// `length` is the card count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub primary: u8,
    pub length: usize,
    pub cards: Vec<Card>,
}

impl Pattern {
    pub fn primary_rank(&self) -> Option<Rank> {
        Rank::from_order(self.primary)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.primary_rank() {
            Some(rank) if self.kind != PatternKind::Rocket => {
                write!(f, "{} ({}, {} cards)", self.kind.name(), rank.to_str(), self.length)
            }
            _ => write!(f, "{}", self.kind.name()),
        }
    }
}

type Counts = BTreeMap<u8, usize>;

/// Classifies a selection. Special shapes are tried before general ones so
/// that no selection matches two kinds.
pub fn classify(cards: &[Card]) -> Option<Pattern> {
    let len = cards.len();
    if len == 0 || len > MAX_PLAY_SIZE {
        return None;
    }
    let counts = rank_counts(cards);
    let (kind, primary) = rocket(len, &counts)
        .or_else(|| bomb(len, &counts))
        .or_else(|| of_a_kind(len, &counts))
        .or_else(|| triplet_with(len, &counts))
        .or_else(|| straight(len, &counts))
        .or_else(|| pair_sequence(len, &counts))
        .or_else(|| airplane(len, &counts))?;
    let mut sorted = cards.to_vec();
    sort_cards(&mut sorted);
    Some(Pattern {
        kind,
        primary,
        length: len,
        cards: sorted,
    })
}

/// Consecutive rank orders, none of them a 2 or a joker.
pub(crate) fn is_run(orders: &[u8]) -> bool {
    if orders.iter().any(|order| *order > MAX_SEQUENCE_ORDER) {
        return false;
    }
    orders.windows(2).all(|pair| pair[1] == pair[0] + 1)
}

fn lowest(counts: &Counts) -> u8 {
    counts.keys().next().copied().unwrap_or_default()
}

fn rocket(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    let black = Rank::BlackJoker.order();
    let red = Rank::RedJoker.order();
    if len == 2 && counts.get(&black) == Some(&1) && counts.get(&red) == Some(&1) {
        return Some((PatternKind::Rocket, ROCKET_ORDER));
    }
    None
}

fn bomb(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if len == 4 && counts.len() == 1 {
        return Some((PatternKind::Bomb, lowest(counts)));
    }
    None
}

fn of_a_kind(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if counts.len() != 1 {
        return None;
    }
    let kind = match len {
        1 => PatternKind::Single,
        2 => PatternKind::Pair,
        3 => PatternKind::Triplet,
        _ => return None,
    };
    Some((kind, lowest(counts)))
}

fn triplet_with(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if counts.len() != 2 {
        return None;
    }
    let (triplet, _) = counts.iter().find(|(_, count)| **count == 3)?;
    let kind = match len {
        4 => PatternKind::TripletSingle,
        5 => PatternKind::TripletPair,
        _ => return None,
    };
    Some((kind, *triplet))
}

fn straight(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if !(MIN_STRAIGHT_LEN..=MAX_STRAIGHT_LEN).contains(&len) || counts.len() != len {
        return None;
    }
    let orders: Vec<u8> = counts.keys().copied().collect();
    if !is_run(&orders) {
        return None;
    }
    Some((PatternKind::Straight, orders[0]))
}

fn pair_sequence(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if len % 2 != 0 || len < MIN_PAIR_SEQUENCE_PAIRS * 2 {
        return None;
    }
    if !counts.values().all(|count| *count == 2) {
        return None;
    }
    let orders: Vec<u8> = counts.keys().copied().collect();
    if !is_run(&orders) {
        return None;
    }
    Some((PatternKind::PairSequence, orders[0]))
}

fn airplane(len: usize, counts: &Counts) -> Option<(PatternKind, u8)> {
    if counts.values().any(|count| *count > 3) {
        return None;
    }
    let bodies: Vec<u8> = counts
        .iter()
        .filter(|(_, count)| **count == 3)
        .map(|(order, _)| *order)
        .collect();
    if bodies.len() < MIN_AIRPLANE_BODIES || !is_run(&bodies) {
        return None;
    }
    let wing_counts: Vec<usize> = counts
        .values()
        .filter(|count| **count != 3)
        .copied()
        .collect();
    let wing_cards = len - bodies.len() * 3;
    let wings = if wing_cards == 0 {
        Wings::None
    } else if wing_cards == bodies.len() && wing_counts.iter().all(|count| *count == 1) {
        Wings::Singles
    } else if wing_cards == bodies.len() * 2 && wing_counts.iter().all(|count| *count == 2) {
        Wings::Pairs
    } else {
        return None;
    };
    Some((PatternKind::Airplane(wings), bodies[0]))
}

/// Whether `new` may be played onto `table`. An empty table accepts any
/// pattern.
pub fn beats(new: &Pattern, table: Option<&Pattern>) -> bool {
    let Some(table) = table else {
        return true;
    };
    if table.kind == PatternKind::Rocket {
        return false;
    }
    if new.kind == PatternKind::Rocket {
        return true;
    }
    if new.kind == PatternKind::Bomb {
        if table.kind == PatternKind::Bomb {
            return new.primary > table.primary;
        }
        return true;
    }
    if table.kind.is_bomb_or_rocket() {
        return false;
    }
    new.kind == table.kind && new.length == table.length && new.primary > table.primary
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Parses space separated card codes, e.g. `"S3 H3 D3 C4"`.
    pub(crate) fn cards(codes: &str) -> Vec<Card> {
        codes
            .split_whitespace()
            .map(|code| Card::from_code(code).unwrap())
            .collect()
    }

    fn kind_of(codes: &str) -> Option<PatternKind> {
        classify(&cards(codes)).map(|pattern| pattern.kind)
    }

    #[test]
    fn classify_single() {
        let play = classify(&cards("C3")).unwrap();
        assert_eq!(play.kind, PatternKind::Single);
        assert_eq!(play.primary, 3);
        assert_eq!(play.length, 1);
    }

    #[test]
    fn classify_pair_and_triplet() {
        assert_eq!(kind_of("C4 D4"), Some(PatternKind::Pair));
        assert_eq!(kind_of("C5 D5 H5"), Some(PatternKind::Triplet));
        assert_eq!(kind_of("C4 D5"), None);
    }

    #[test]
    fn classify_triplet_with_single() {
        let play = classify(&cards("S3 H3 D3 C4")).unwrap();
        assert_eq!(play.kind, PatternKind::TripletSingle);
        assert_eq!(play.primary, 3);
        let play = classify(&cards("C4 S9 H9 D9")).unwrap();
        assert_eq!(play.kind, PatternKind::TripletSingle);
        assert_eq!(play.primary, 9);
    }

    #[test]
    fn classify_triplet_with_pair() {
        let play = classify(&cards("S5 H5 D5 C6 S6")).unwrap();
        assert_eq!(play.kind, PatternKind::TripletPair);
        assert_eq!(play.primary, 5);
        assert_eq!(play.length, 5);
    }

    #[test]
    fn classify_bomb() {
        let play = classify(&cards("C8 D8 H8 S8")).unwrap();
        assert_eq!(play.kind, PatternKind::Bomb);
        assert_eq!(play.primary, 8);
    }

    #[test]
    fn classify_rocket() {
        let play = classify(&[Card::BLACK_JOKER, Card::RED_JOKER]).unwrap();
        assert_eq!(play.kind, PatternKind::Rocket);
        assert_eq!(play.primary, ROCKET_ORDER);
        assert_eq!(kind_of("BJ"), Some(PatternKind::Single));
    }

    #[test]
    fn classify_straight() {
        let play = classify(&cards("S3 H4 D5 C6 S7")).unwrap();
        assert_eq!(play.kind, PatternKind::Straight);
        assert_eq!(play.primary, 3);
        assert_eq!(play.length, 5);
        let longest = classify(&cards("S3 H4 D5 C6 S7 S8 S9 S10 SJ SQ SK SA")).unwrap();
        assert_eq!(longest.kind, PatternKind::Straight);
        assert_eq!(longest.length, 12);
    }

    #[test]
    fn straight_cannot_include_two_or_jokers() {
        assert_eq!(kind_of("S3 H4 D5 C6 S2"), None);
        assert_eq!(kind_of("S10 HJ DQ CK SA H2"), None);
        assert_eq!(kind_of("S10 HJ DQ CK SA"), Some(PatternKind::Straight));
        assert_eq!(kind_of("SJ DQ CK SA BJ"), None);
        assert_eq!(kind_of("S3 H4 D5 C6"), None);
        assert_eq!(kind_of("S3 H4 D5 C6 S8"), None);
    }

    #[test]
    fn classify_pair_sequence() {
        let play = classify(&cards("C3 D3 C4 D4 C5 D5")).unwrap();
        assert_eq!(play.kind, PatternKind::PairSequence);
        assert_eq!(play.primary, 3);
        assert_eq!(play.length, 6);
        assert_eq!(kind_of("C3 D3 C4 D4"), None);
        assert_eq!(kind_of("CK DK CA DA C2 D2"), None);
    }

    #[test]
    fn classify_airplane_without_wings() {
        let play = classify(&cards("C3 D3 H3 C4 D4 H4")).unwrap();
        assert_eq!(play.kind, PatternKind::Airplane(Wings::None));
        assert_eq!(play.primary, 3);
        assert_eq!(play.length, 6);
        assert_eq!(kind_of("CA DA HA C2 D2 H2"), None);
        assert_eq!(kind_of("C3 D3 H3 C5 D5 H5"), None);
    }

    #[test]
    fn classify_airplane_with_single_wings() {
        let play = classify(&cards("S7 H7 D7 S8 H8 D8 S9 H9 D9 S2 C3 C4")).unwrap();
        assert_eq!(play.kind, PatternKind::Airplane(Wings::Singles));
        assert_eq!(play.primary, 7);
        assert_eq!(play.length, 12);
    }

    #[test]
    fn airplane_needs_one_wing_per_body() {
        // Three bodies with only two singles is no shape at all.
        assert_eq!(kind_of("S7 H7 D7 S8 H8 D8 S9 H9 D9 S2 C3"), None);
    }

    #[test]
    fn classify_airplane_with_pair_wings() {
        let play = classify(&cards("S7 H7 D7 S8 H8 D8 C3 D3 CK DK")).unwrap();
        assert_eq!(play.kind, PatternKind::Airplane(Wings::Pairs));
        assert_eq!(play.primary, 7);
        assert_eq!(play.length, 10);
        // wing ranks must differ for singles and be exact pairs otherwise
        assert_eq!(kind_of("S7 H7 D7 S8 H8 D8 C3 D3"), None);
        assert_eq!(kind_of("S7 H7 D7 S8 H8 D8 C3 D3 H3 S3"), None);
    }

    #[test]
    fn classify_rejects_invalid_play() {
        assert_eq!(kind_of("C3 D3 C4"), None);
        assert_eq!(kind_of("C3 D3 C4 D4"), None);
        assert_eq!(kind_of("C9 D9 H9 S9 C3 C4"), None);
        assert!(classify(&[]).is_none());
    }

    #[test]
    fn classification_ignores_input_order() {
        let a = classify(&cards("S9 C3 D9 H9")).unwrap();
        let b = classify(&cards("H9 D9 C3 S9")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_table_accepts_anything() {
        let single = classify(&cards("C3")).unwrap();
        assert!(beats(&single, None));
    }

    #[test]
    fn same_kind_higher_rank_beats() {
        let a = classify(&cards("C3")).unwrap();
        let b = classify(&cards("C4")).unwrap();
        assert!(beats(&b, Some(&a)));
        assert!(!beats(&a, Some(&b)));
        assert!(!beats(&a, Some(&a)));
    }

    #[test]
    fn kind_mismatch_is_illegal() {
        let triplet_single = classify(&cards("S3 H3 D3 C4")).unwrap();
        let triplet_pair = classify(&cards("S5 H5 D5 C6 S6")).unwrap();
        assert!(!beats(&triplet_pair, Some(&triplet_single)));
    }

    #[test]
    fn straight_requires_same_length() {
        let five = classify(&cards("C3 C4 C5 C6 C7")).unwrap();
        let higher_five = classify(&cards("S4 S5 S6 S7 S8")).unwrap();
        let six = classify(&cards("S4 S5 S6 S7 S8 S9")).unwrap();
        assert!(beats(&higher_five, Some(&five)));
        assert!(!beats(&six, Some(&five)));
    }

    #[test]
    fn bomb_beats_non_bomb() {
        let king = classify(&cards("CK")).unwrap();
        let bomb = classify(&cards("C3 D3 H3 S3")).unwrap();
        assert!(beats(&bomb, Some(&king)));
        assert!(!beats(&king, Some(&bomb)));
    }

    #[test]
    fn bombs_compare_by_rank() {
        let low = classify(&cards("C3 D3 H3 S3")).unwrap();
        let high = classify(&cards("C2 D2 H2 S2")).unwrap();
        assert!(beats(&high, Some(&low)));
        assert!(!beats(&low, Some(&high)));
    }

    #[test]
    fn rocket_beats_bomb() {
        let bomb = classify(&cards("CK DK HK SK")).unwrap();
        let rocket = classify(&cards("BJ RJ")).unwrap();
        assert!(beats(&rocket, Some(&bomb)));
        assert!(!beats(&bomb, Some(&rocket)));
        assert!(!beats(&rocket, Some(&rocket)));
    }
}
