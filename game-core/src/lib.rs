//! Rule engine for three-player Doudizhu ("Fight the Landlord").
//!
//! Selections are classified into patterns, compared against the table
//! pattern and committed through [`GameState`]; [`find_plays`] searches a
//! hand for legal candidates on behalf of automated seats.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod pattern;
pub mod search;
pub mod state;
pub mod strategy;
pub mod view;

pub use card::{sort_cards, Card, Hand, Rank, Suit};
pub use config::{BiddingMode, FirstBidder, RulesConfig};
pub use deck::{deal, shuffled_deck, standard_deck, validate_deck};
pub use error::GameError;
pub use pattern::{beats, classify, Pattern, PatternKind, Wings, ROCKET_ORDER};
pub use search::{all_plays, find_plays, sort_plays};
pub use state::{
    next_seat, BiddingOutcome, GameState, PassOutcome, Phase, PlayOutcome, PlayerState, Side,
    Winner, SEATS,
};
pub use strategy::{hand_strength, GreedyBot, Strategy};
pub use view::{PlayView, SeatInfo, TableView};
