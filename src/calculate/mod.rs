//! Ranking and pairing engine.
//!
//! Pure functions over a snapshot of players and match results:
//! - Standings: per-player wins and matches, ranked by wins
//! - Pairings: next-round pairings of adjacent players without rematches

mod pairing;
mod standings;

pub use pairing::*;
pub use standings::*;

use thiserror::Error;

use crate::models::PlayerId;

/// Errors raised by the ranking and pairing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Match references unknown player {0}")]
    InvalidReference(PlayerId),

    #[error("Cannot pair an odd number of players ({0})")]
    OddPlayerCount(usize),

    #[error("No unplayed opponent left for player {0}")]
    NoValidPairing(PlayerId),
}
