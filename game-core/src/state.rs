use crate::card::{Card, Hand};
use crate::config::{BiddingMode, FirstBidder, RulesConfig};
use crate::deck::{deal, shuffled_deck};
use crate::error::GameError;
use crate::pattern::{beats, classify, Pattern};
use crate::search::find_plays;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub const SEATS: usize = 3;
/// Passes in a row that clear the table: every opponent declined.
pub const PASSES_TO_CLEAR: u8 = (SEATS - 1) as u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Lobby,
    Bidding,
    Playing,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Landlord,
    Farmers,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub seat: usize,
    pub side: Side,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerState {
    pub id: u64,
    pub hand: Hand,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BiddingOutcome {
    /// Bidding continues with `next_bidder`.
    Pending { next_bidder: usize },
    /// The landlord received `pile` and opens play.
    LandlordChosen { landlord: usize, pile: Vec<Card> },
    /// Nobody called; a fresh deal started a new bidding phase.
    Redeal { first_bidder: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOutcome {
    pub pattern: Pattern,
    /// `None` once the game is over.
    pub next_turn: Option<usize>,
    pub winner: Option<Winner>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub next_turn: usize,
    pub table_cleared: bool,
}

/// One game instance. All mutation goes through `start*` and `apply_*`;
/// callers must serialize those calls per game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub players: [PlayerState; SEATS],
    pub phase: Phase,
    pub rules: RulesConfig,
    pub landlord: Option<usize>,
    pub turn: usize,
    pub bids: [Option<bool>; SEATS],
    pub landlord_pile: Vec<Card>,
    pub last_pattern: Option<Pattern>,
    pub last_player: Option<usize>,
    pub consecutive_passes: u8,
    /// Every card played so far this deal.
    pub played: Vec<Card>,
    pub winner: Option<Winner>,
    pub redeals: u32,
    rng: StdRng,
}

pub fn next_seat(seat: usize) -> usize {
    (seat + 1) % SEATS
}

impl GameState {
    pub fn new(player_ids: [u64; SEATS], rules: RulesConfig, seed: u64) -> Self {
        GameState {
            players: player_ids.map(|id| PlayerState {
                id,
                hand: Hand::default(),
            }),
            phase: Phase::Lobby,
            rules,
            landlord: None,
            turn: 0,
            bids: [None; SEATS],
            landlord_pile: Vec::new(),
            last_pattern: None,
            last_player: None,
            consecutive_passes: 0,
            played: Vec::new(),
            winner: None,
            redeals: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn player_index(&self, player_id: u64) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.id == player_id)
    }

    /// Shuffles the pack, deals and opens bidding. Returns the first bidder.
    pub fn start(&mut self) -> Result<usize, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        let deck = shuffled_deck(&mut self.rng);
        self.deal_from(deck)
    }

    /// Deals a deck supplied by the caller, which must be a permutation of
    /// the 54-card pack.
    pub fn start_with_deck(&mut self, deck: Vec<Card>) -> Result<usize, GameError> {
        if self.phase != Phase::Lobby {
            return Err(GameError::AlreadyStarted);
        }
        self.deal_from(deck)
    }

    fn deal_from(&mut self, deck: Vec<Card>) -> Result<usize, GameError> {
        self.rules.validate()?;
        let (hands, pile) = deal(deck)?;
        let first_bidder = match self.rules.first_bidder {
            FirstBidder::Random => self.rng.gen_range(0..SEATS),
            FirstBidder::Seat(seat) => seat,
        };
        for (player, cards) in self.players.iter_mut().zip(hands) {
            player.hand = Hand::new(cards);
        }
        self.landlord_pile = pile;
        self.phase = Phase::Bidding;
        self.landlord = None;
        self.bids = [None; SEATS];
        self.turn = first_bidder;
        self.clear_table();
        self.played.clear();
        self.winner = None;
        info!(first_bidder, redeals = self.redeals, "cards dealt, bidding open");
        Ok(first_bidder)
    }

    pub fn apply_bid(&mut self, seat: usize, call: bool) -> Result<BiddingOutcome, GameError> {
        let result = self.try_bid(seat, call);
        if let Err(err) = &result {
            debug!(seat, call, %err, "bid rejected");
        }
        result
    }

    fn try_bid(&mut self, seat: usize, call: bool) -> Result<BiddingOutcome, GameError> {
        if self.phase != Phase::Bidding {
            return Err(GameError::StaleBid);
        }
        if seat >= SEATS {
            return Err(GameError::NotYourTurn);
        }
        if self.bids[seat].is_some() {
            return Err(GameError::StaleBid);
        }
        if seat != self.turn {
            return Err(GameError::NotYourTurn);
        }

        let mut bids = self.bids;
        bids[seat] = Some(call);
        let all_bid = bids.iter().all(|bid| bid.is_some());
        let resolved = match self.rules.bidding {
            BiddingMode::StopOnCall => call || all_bid,
            BiddingMode::FullRound => all_bid,
        };
        if !resolved {
            self.bids = bids;
            self.turn = next_seat(seat);
            return Ok(BiddingOutcome::Pending {
                next_bidder: self.turn,
            });
        }

        let callers: Vec<usize> = (0..SEATS).filter(|s| bids[*s] == Some(true)).collect();
        if callers.is_empty() {
            self.redeals += 1;
            info!(redeals = self.redeals, "nobody called landlord, redealing");
            let deck = shuffled_deck(&mut self.rng);
            let first_bidder = self.deal_from(deck)?;
            return Ok(BiddingOutcome::Redeal { first_bidder });
        }

        // Several callers are only possible in a full round; pick uniformly.
        let landlord = callers[self.rng.gen_range(0..callers.len())];
        let pile = std::mem::take(&mut self.landlord_pile);
        self.bids = bids;
        self.players[landlord].hand.extend(pile.iter().copied());
        self.landlord = Some(landlord);
        self.turn = landlord;
        self.phase = Phase::Playing;
        self.clear_table();
        info!(landlord, callers = callers.len(), "landlord assigned");
        Ok(BiddingOutcome::LandlordChosen { landlord, pile })
    }

    fn ensure_can_act(&self, seat: usize) -> Result<(), GameError> {
        match self.phase {
            Phase::Playing => {}
            Phase::GameOver => return Err(GameError::GameOver),
            Phase::Lobby | Phase::Bidding => return Err(GameError::NotPlaying),
        }
        if seat != self.turn {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    pub fn apply_play(&mut self, seat: usize, cards: &[Card]) -> Result<PlayOutcome, GameError> {
        let result = self.try_play(seat, cards);
        if let Err(err) = &result {
            debug!(seat, cards = cards.len(), %err, "play rejected");
        }
        result
    }

    fn try_play(&mut self, seat: usize, cards: &[Card]) -> Result<PlayOutcome, GameError> {
        self.ensure_can_act(seat)?;
        let pattern = classify(cards).ok_or(GameError::InvalidPattern)?;
        if !beats(&pattern, self.last_pattern.as_ref()) {
            return Err(GameError::IllegalMove);
        }
        if !self.players[seat].hand.contains_all(cards) {
            return Err(GameError::CardsNotOwned);
        }

        let hand = &mut self.players[seat].hand;
        hand.remove_all(cards);
        let emptied = hand.is_empty();
        self.played.extend_from_slice(cards);
        self.last_pattern = Some(pattern.clone());
        self.last_player = Some(seat);
        self.consecutive_passes = 0;
        if pattern.kind.is_bomb_or_rocket() {
            debug!(seat, kind = pattern.kind.name(), "bomb played");
        }

        if emptied {
            let winner = Winner {
                seat,
                side: self.side_of(seat),
            };
            self.phase = Phase::GameOver;
            self.winner = Some(winner);
            info!(seat, side = ?winner.side, "hand emptied, game over");
            return Ok(PlayOutcome {
                pattern,
                next_turn: None,
                winner: Some(winner),
            });
        }

        self.turn = next_seat(seat);
        Ok(PlayOutcome {
            pattern,
            next_turn: Some(self.turn),
            winner: None,
        })
    }

    pub fn apply_pass(&mut self, seat: usize) -> Result<PassOutcome, GameError> {
        if let Err(err) = self.ensure_can_act(seat) {
            debug!(seat, %err, "pass rejected");
            return Err(err);
        }
        self.consecutive_passes = self.consecutive_passes.saturating_add(1);
        let table_cleared = self.consecutive_passes >= PASSES_TO_CLEAR;
        if table_cleared {
            self.clear_table();
            info!(seat, "table cleared");
        }
        self.turn = next_seat(seat);
        Ok(PassOutcome {
            next_turn: self.turn,
            table_cleared,
        })
    }

    fn clear_table(&mut self) {
        self.last_pattern = None;
        self.last_player = None;
        self.consecutive_passes = 0;
    }

    pub fn last_played_cards(&self) -> &[Card] {
        self.last_pattern
            .as_ref()
            .map(|pattern| pattern.cards.as_slice())
            .unwrap_or_default()
    }

    /// Landlord or Farmers; every seat is a farmer until bidding resolves.
    pub fn side_of(&self, seat: usize) -> Side {
        if self.landlord == Some(seat) {
            Side::Landlord
        } else {
            Side::Farmers
        }
    }

    /// Candidate plays for `seat` against the current table.
    pub fn hint(&self, seat: usize) -> Vec<Pattern> {
        match self.players.get(seat) {
            Some(player) => find_plays(&player.hand, self.last_pattern.as_ref()),
            None => Vec::new(),
        }
    }
}
