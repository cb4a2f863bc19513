use crate::error::GameError;
use crate::state::SEATS;
use serde::{Deserialize, Serialize};

/// How the binary call/no-call bidding resolves. There is no auction and no
/// doubling in either mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiddingMode {
    /// Bidding ends at the first call; that seat is landlord.
    #[default]
    StopOnCall,
    /// Every seat bids once; the landlord is drawn uniformly among callers.
    FullRound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstBidder {
    #[default]
    Random,
    Seat(usize),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub bidding: BiddingMode,
    pub first_bidder: FirstBidder,
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        match self.first_bidder {
            FirstBidder::Seat(seat) if seat >= SEATS => Err(GameError::InvalidRules),
            _ => Ok(()),
        }
    }
}
