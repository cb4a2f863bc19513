use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    /// Jokers carry no suit.
    Joker,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub(crate) fn order(&self) -> u8 {
        match self {
            Suit::Clubs => 1,
            Suit::Diamonds => 2,
            Suit::Hearts => 3,
            Suit::Spades => 4,
            Suit::Joker => 5,
        }
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }

    fn to_char(&self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
            Suit::Joker => 'J',
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Suit::Clubs => "♣",
            Suit::Diamonds => "♦",
            Suit::Hearts => "♥",
            Suit::Spades => "♠",
            Suit::Joker => "",
        }
    }
}

/// Card rank. The discriminant is the play strength: 3 is weakest, then
/// A=14, 2=15 and the two jokers on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub enum Rank {
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
    Two = 15,
    BlackJoker = 16,
    RedJoker = 17,
}

/// Highest rank order that may take part in a sequence (straights, pair
/// sequences, airplane bodies). 2s and jokers never do.
pub const MAX_SEQUENCE_ORDER: u8 = Rank::Ace as u8;

impl Rank {
    pub const SUITED: [Rank; 13] = [
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
        Rank::Two,
    ];

    pub fn order(&self) -> u8 {
        *self as u8
    }

    pub fn from_order(order: u8) -> Option<Self> {
        match order {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            15 => Some(Rank::Two),
            16 => Some(Rank::BlackJoker),
            17 => Some(Rank::RedJoker),
            _ => None,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "3" => Some(Rank::Three),
            "4" => Some(Rank::Four),
            "5" => Some(Rank::Five),
            "6" => Some(Rank::Six),
            "7" => Some(Rank::Seven),
            "8" => Some(Rank::Eight),
            "9" => Some(Rank::Nine),
            "10" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            "2" => Some(Rank::Two),
            "BJ" => Some(Rank::BlackJoker),
            "RJ" => Some(Rank::RedJoker),
            _ => None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::BlackJoker => "BJ",
            Rank::RedJoker => "RJ",
        }
    }

    pub fn is_joker(&self) -> bool {
        matches!(self, Rank::BlackJoker | Rank::RedJoker)
    }

    pub fn is_sequenceable(&self) -> bool {
        self.order() <= MAX_SEQUENCE_ORDER
    }
}

/// A physical card. Equality is by (rank, suit); patterns only ever look at
/// the rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const BLACK_JOKER: Card = Card {
        rank: Rank::BlackJoker,
        suit: Suit::Joker,
    };
    pub const RED_JOKER: Card = Card {
        rank: Rank::RedJoker,
        suit: Suit::Joker,
    };

    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }

    pub fn rank_order(&self) -> u8 {
        self.rank.order()
    }

    pub fn code(&self) -> String {
        if self.rank.is_joker() {
            return self.rank.to_str().to_string();
        }
        format!("{}{}", self.suit.to_char(), self.rank.to_str())
    }

    pub fn from_code(code: &str) -> Option<Self> {
        if code == "BJ" {
            return Some(Card::BLACK_JOKER);
        }
        if code == "RJ" {
            return Some(Card::RED_JOKER);
        }
        let mut chars = code.chars();
        let suit = Suit::from_char(chars.next()?)?;
        let rank_str: String = chars.collect();
        let rank = Rank::parse(rank_str.as_str())?;
        if rank.is_joker() {
            return None;
        }
        Some(Card { rank, suit })
    }

    /// Display/sort key: rank strength first, suit only as a tie breaker.
    pub fn sort_key(&self) -> (Rank, u8) {
        (self.rank, self.suit.order())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rank {
            Rank::BlackJoker => write!(f, "Black Joker"),
            Rank::RedJoker => write!(f, "Red Joker"),
            _ => write!(f, "{}{}", self.rank.to_str(), self.suit.symbol()),
        }
    }
}

pub fn sort_cards(cards: &mut [Card]) {
    cards.sort_by_key(|card| card.sort_key())
}

/// Multiplicity of each rank order in `cards`, ascending by order.
pub fn rank_counts(cards: &[Card]) -> BTreeMap<u8, usize> {
    let mut counts = BTreeMap::new();
    for card in cards.iter() {
        *counts.entry(card.rank_order()).or_insert(0) += 1;
    }
    counts
}

/// A seat's cards. Kept sorted so views and searches are deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new(mut cards: Vec<Card>) -> Self {
        sort_cards(&mut cards);
        Hand { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }

    pub fn rank_counts(&self) -> BTreeMap<u8, usize> {
        rank_counts(&self.cards)
    }

    /// Cards of one rank order, in suit order.
    pub fn of_rank(&self, order: u8) -> Vec<Card> {
        self.cards
            .iter()
            .filter(|card| card.rank_order() == order)
            .copied()
            .collect()
    }

    /// True when every card of `selection` is held, counting duplicates.
    pub fn contains_all(&self, selection: &[Card]) -> bool {
        let mut remaining = self.cards.clone();
        for card in selection.iter() {
            match remaining.iter().position(|c| c == card) {
                Some(pos) => {
                    remaining.swap_remove(pos);
                }
                None => return false,
            }
        }
        true
    }

    /// Removes `selection` by card identity. Callers check `contains_all`
    /// first; missing cards are ignored.
    pub fn remove_all(&mut self, selection: &[Card]) {
        for card in selection.iter() {
            if let Some(pos) = self.cards.iter().position(|c| c == card) {
                self.cards.remove(pos);
            }
        }
    }

    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
        sort_cards(&mut self.cards);
    }

    pub fn codes(&self) -> Vec<String> {
        self.cards.iter().map(|card| card.code()).collect()
    }
}

impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Hand::new(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_code_round_trip() {
        let c = Card::new(Rank::Ace, Suit::Spades);
        let parsed = Card::from_code(&c.code()).unwrap();
        assert_eq!(parsed, c);
        assert_eq!(Card::from_code("H10"), Some(Card::new(Rank::Ten, Suit::Hearts)));
    }

    #[test]
    fn joker_codes_round_trip() {
        let c = Card::from_code("BJ").unwrap();
        assert_eq!(c.rank, Rank::BlackJoker);
        let r = Card::from_code("RJ").unwrap();
        assert_eq!(r.rank, Rank::RedJoker);
        assert_eq!(Card::from_code("SBJ"), None);
        assert_eq!(Card::from_code("X3"), None);
    }

    #[test]
    fn rank_orders_follow_play_strength() {
        assert_eq!(Rank::Three.order(), 3);
        assert_eq!(Rank::Ace.order(), 14);
        assert_eq!(Rank::Two.order(), 15);
        assert_eq!(Rank::BlackJoker.order(), 16);
        assert_eq!(Rank::RedJoker.order(), 17);
        assert!(Rank::Ace.is_sequenceable());
        assert!(!Rank::Two.is_sequenceable());
        assert!(!Rank::RedJoker.is_sequenceable());
        for rank in Rank::SUITED {
            assert_eq!(Rank::from_order(rank.order()), Some(rank));
        }
    }

    #[test]
    fn hand_removes_by_identity() {
        let three_spades = Card::new(Rank::Three, Suit::Spades);
        let three_hearts = Card::new(Rank::Three, Suit::Hearts);
        let mut hand = Hand::new(vec![three_hearts, Card::RED_JOKER, three_spades]);
        assert_eq!(hand.cards()[0], three_hearts);
        assert!(hand.contains_all(&[three_spades]));
        assert!(!hand.contains_all(&[three_spades, three_spades]));
        hand.remove_all(&[three_spades]);
        assert_eq!(hand.len(), 2);
        assert!(hand.contains(&three_hearts));
        assert!(!hand.contains(&three_spades));
    }
}
