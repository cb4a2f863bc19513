use crate::state::{GameState, Phase, Side, Winner};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatInfo {
    pub id: u64,
    pub hand_count: usize,
    pub side: Side,
    pub bid: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayView {
    pub kind: String,
    pub main_rank: String,
    pub size: usize,
    pub cards: Vec<String>,
}

/// What one seat may see of the game: its own hand, counts for the others.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableView {
    pub phase: Phase,
    pub seat: usize,
    pub seats: Vec<SeatInfo>,
    pub turn: usize,
    pub landlord: Option<usize>,
    pub last_player: Option<usize>,
    pub last_play: Option<PlayView>,
    pub consecutive_passes: u8,
    pub your_hand: Vec<String>,
    pub winner: Option<Winner>,
}

impl GameState {
    pub fn view_for(&self, seat: usize) -> Option<TableView> {
        let own = self.players.get(seat)?;
        let seats = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| SeatInfo {
                id: player.id,
                hand_count: player.hand.len(),
                side: self.side_of(idx),
                bid: self.bids[idx],
            })
            .collect();
        let last_play = self.last_pattern.as_ref().map(|pattern| PlayView {
            kind: pattern.kind.name().to_string(),
            main_rank: pattern
                .primary_rank()
                .map(|rank| rank.to_str().to_string())
                .unwrap_or_default(),
            size: pattern.length,
            cards: pattern.cards.iter().map(|card| card.code()).collect(),
        });
        Some(TableView {
            phase: self.phase,
            seat,
            seats,
            turn: self.turn,
            landlord: self.landlord,
            last_player: self.last_player,
            last_play,
            consecutive_passes: self.consecutive_passes,
            your_hand: own.hand.codes(),
            winner: self.winner,
        })
    }
}
