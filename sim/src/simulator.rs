use game_core::{
    BiddingOutcome, GameError, GameState, GreedyBot, Phase, PatternKind, RulesConfig, Side,
    Strategy, SEATS,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("engine rejected a bot action: {0}")]
    Game(#[from] GameError),
    #[error("game {game} did not finish within {steps} steps")]
    StepLimit { game: u32, steps: usize },
    #[error("game {game} was redealt {redeals} times without a landlord")]
    RedealLimit { game: u32, redeals: u32 },
    #[error("game {game} ended without a winner")]
    NoWinner { game: u32 },
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of one simulated game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub game: u32,
    pub seed: u64,
    pub landlord: usize,
    pub winner: usize,
    pub winning_side: Side,
    pub redeals: u32,
    pub plays: u32,
    pub passes: u32,
    pub table_clears: u32,
    pub bombs: u32,
    pub rockets: u32,
    pub steps: usize,
    pub cards_left: [usize; SEATS],
}

pub struct Simulator {
    seats: [Box<dyn Strategy>; SEATS],
    rules: RulesConfig,
    max_steps: usize,
    max_redeals: u32,
}

impl Simulator {
    pub fn new(seats: [Box<dyn Strategy>; SEATS], rules: RulesConfig) -> Self {
        Simulator {
            seats,
            rules,
            max_steps: 1_000,
            max_redeals: 50,
        }
    }

    /// Three default greedy bots.
    pub fn greedy(rules: RulesConfig) -> Self {
        Simulator::new(
            [
                Box::new(GreedyBot::default()),
                Box::new(GreedyBot::default()),
                Box::new(GreedyBot::default()),
            ],
            rules,
        )
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_max_redeals(mut self, max_redeals: u32) -> Self {
        self.max_redeals = max_redeals;
        self
    }

    pub fn run_game(&self, game: u32, seed: u64) -> Result<GameRecord, SimError> {
        let mut state = GameState::new([0, 1, 2], self.rules, seed);
        let mut tally = Tally::default();
        let mut steps = 0;

        while state.phase != Phase::GameOver {
            if steps == self.max_steps {
                return Err(SimError::StepLimit { game, steps });
            }
            steps += 1;
            self.step(game, &mut state, &mut tally)?;
        }

        let winner = state.winner.ok_or(SimError::NoWinner { game })?;
        Ok(GameRecord {
            game,
            seed,
            landlord: state.landlord.unwrap_or(winner.seat),
            winner: winner.seat,
            winning_side: winner.side,
            redeals: state.redeals,
            plays: tally.plays,
            passes: tally.passes,
            table_clears: tally.table_clears,
            bombs: tally.bombs,
            rockets: tally.rockets,
            steps,
            cards_left: [0, 1, 2].map(|seat| state.players[seat].hand.len()),
        })
    }

    fn step(&self, game: u32, state: &mut GameState, tally: &mut Tally) -> Result<(), SimError> {
        let seat = state.turn;
        match state.phase {
            Phase::Lobby => {
                state.start()?;
            }
            Phase::Bidding => {
                let call = self.seats[seat].choose_bid(&state.players[seat].hand);
                let outcome = state.apply_bid(seat, call)?;
                let redealt = matches!(outcome, BiddingOutcome::Redeal { .. });
                if redealt && state.redeals > self.max_redeals {
                    return Err(SimError::RedealLimit {
                        game,
                        redeals: state.redeals,
                    });
                }
            }
            Phase::Playing => {
                let choice = self.seats[seat]
                    .choose_play(&state.players[seat].hand, state.last_pattern.as_ref());
                match choice {
                    Some(cards) => {
                        let outcome = state.apply_play(seat, &cards)?;
                        tally.plays += 1;
                        match outcome.pattern.kind {
                            PatternKind::Bomb => tally.bombs += 1,
                            PatternKind::Rocket => tally.rockets += 1,
                            _ => {}
                        }
                        debug!(game, seat, play = %outcome.pattern, "played");
                    }
                    None => {
                        let outcome = state.apply_pass(seat)?;
                        tally.passes += 1;
                        if outcome.table_cleared {
                            tally.table_clears += 1;
                        }
                    }
                }
            }
            Phase::GameOver => {}
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Tally {
    plays: u32,
    passes: u32,
    table_clears: u32,
    bombs: u32,
    rockets: u32,
}

/// Aggregate over a batch of records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    pub landlord_wins: usize,
    pub farmer_wins: usize,
    pub average_steps: f64,
    pub total_redeals: u32,
    pub bombs: u32,
    pub rockets: u32,
}

impl Summary {
    pub fn from_records(records: &[GameRecord]) -> Self {
        if records.is_empty() {
            return Summary::default();
        }
        let landlord_wins = records
            .iter()
            .filter(|record| record.winning_side == Side::Landlord)
            .count();
        let steps: usize = records.iter().map(|record| record.steps).sum();
        Summary {
            games: records.len(),
            landlord_wins,
            farmer_wins: records.len() - landlord_wins,
            average_steps: steps as f64 / records.len() as f64,
            total_redeals: records.iter().map(|record| record.redeals).sum(),
            bombs: records.iter().map(|record| record.bombs).sum(),
            rockets: records.iter().map(|record| record.rockets).sum(),
        }
    }

    pub fn landlord_win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.landlord_wins as f64 / self.games as f64
    }
}
