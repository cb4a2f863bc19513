//! Batch self-play for the Doudizhu engine.

pub mod output;
pub mod simulator;

pub use output::OutputWriter;
pub use simulator::{GameRecord, SimError, Simulator, Summary};
