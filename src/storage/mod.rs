//! Filesystem storage for players and match results.
//!
//! Handles reading and writing the tournament data directory:
//! - `players.jsonl` in registration order
//! - `matches.jsonl` in report order
//! - `sequence.json` holding the player id high-water mark
//!
//! The rest of the crate talks to storage through the `TournamentStore` trait.

mod jsonl;
mod store;

pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::models::{MatchResult, Player, PlayerId};

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt record at line {line} of {path:?}: {source}")]
    CorruptLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown player: {0}")]
    UnknownPlayer(PlayerId),

    #[error("Player {0} cannot play against themselves")]
    SelfMatch(PlayerId),

    #[error("Cannot delete players while {0} match results reference them")]
    PlayersReferenced(usize),

    #[error("Player id sequence exhausted")]
    IdsExhausted,

    #[error("Storage lock poisoned")]
    Poisoned,
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn players_path(&self) -> PathBuf {
        self.data_dir.join(EntityType::Player.filename())
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(EntityType::Match.filename())
    }

    pub fn sequence_path(&self) -> PathBuf {
        self.data_dir.join("sequence.json")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}

/// Players and match results read together.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub matches: Vec<MatchResult>,
}

/// The persistence collaborator behind the tournament.
pub trait TournamentStore: Send + Sync {
    /// All registered players, in registration order.
    fn list_players(&self) -> Result<Vec<Player>, StorageError>;

    /// All reported match results, in report order.
    fn list_matches(&self) -> Result<Vec<MatchResult>, StorageError>;

    /// Register a player, assigning the next serial id. Ids are never reused,
    /// even after `clear_players`.
    fn add_player(&self, name: &str) -> Result<Player, StorageError>;

    /// Record the outcome of a match.
    fn add_match(&self, winner: PlayerId, loser: PlayerId) -> Result<MatchResult, StorageError>;

    /// Remove all match results. Returns how many were removed.
    fn clear_matches(&self) -> Result<usize, StorageError>;

    /// Remove all players. Returns how many were removed.
    fn clear_players(&self) -> Result<usize, StorageError>;

    fn count_players(&self) -> Result<usize, StorageError> {
        Ok(self.list_players()?.len())
    }

    /// Read players and matches together.
    ///
    /// The default makes two separate reads and is not atomic: a reset
    /// landing between them can yield matches whose players are gone.
    /// Stores that can lock both collections should override it.
    fn snapshot(&self) -> Result<Snapshot, StorageError> {
        let matches = self.list_matches()?;
        let players = self.list_players()?;
        Ok(Snapshot { players, matches })
    }
}
