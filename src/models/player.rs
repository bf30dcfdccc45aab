//! Registered players and reported match results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A registered tournament player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique serial id
    pub id: PlayerId,

    /// Full name as registered (need not be unique)
    pub name: String,

    /// When the player registered
    pub registered_at: DateTime<Utc>,
}

impl Player {
    /// Create a new Player registered now.
    pub fn new(id: PlayerId, name: String) -> Self {
        Self {
            id,
            name,
            registered_at: Utc::now(),
        }
    }
}

/// The outcome of a single match between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub winner_id: PlayerId,
    pub loser_id: PlayerId,

    /// When the result was reported
    pub reported_at: DateTime<Utc>,
}

impl MatchResult {
    /// Create a new MatchResult reported now.
    pub fn new(winner_id: PlayerId, loser_id: PlayerId) -> Self {
        Self {
            winner_id,
            loser_id,
            reported_at: Utc::now(),
        }
    }

    /// Whether the given player took part in this match.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.winner_id == id || self.loser_id == id
    }

    /// Whether this match was played between `a` and `b`, in either order.
    pub fn is_between(&self, a: PlayerId, b: PlayerId) -> bool {
        (self.winner_id == a && self.loser_id == b) || (self.winner_id == b && self.loser_id == a)
    }
}
