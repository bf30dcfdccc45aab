//! JSONL-backed tournament store with scoped transactions.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    persist_all, JsonlReader, JsonlWriter, Snapshot, StagedFile, StorageConfig, StorageError,
    TournamentStore,
};
use crate::models::{MatchResult, Player, PlayerId};

/// Player id high-water mark, kept apart from `players.jsonl` so that
/// clearing players does not rewind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct IdSequence {
    next_player_id: PlayerId,
}

impl Default for IdSequence {
    fn default() -> Self {
        Self {
            next_player_id: PlayerId::new(1),
        }
    }
}

impl IdSequence {
    fn load(path: &Path) -> Result<Self, StorageError> {
        match fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Tournament store persisting players and matches as JSONL files.
pub struct JsonlStore {
    config: StorageConfig,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Open a transaction over a fresh snapshot of both files.
    ///
    /// Writers are serialized until the transaction is committed or dropped.
    /// Staged changes reach disk only through `commit`.
    pub fn transaction(&self) -> Result<StoreTransaction<'_>, StorageError> {
        let guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        Ok(StoreTransaction {
            config: &self.config,
            _guard: guard,
            players: JsonlReader::new(self.config.players_path()).read_all()?,
            matches: JsonlReader::new(self.config.matches_path()).read_all()?,
            sequence: IdSequence::load(&self.config.sequence_path())?,
            players_dirty: false,
            matches_dirty: false,
            sequence_dirty: false,
            committed: false,
        })
    }
}

impl TournamentStore for JsonlStore {
    fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        JsonlReader::new(self.config.players_path()).read_all()
    }

    fn list_matches(&self) -> Result<Vec<MatchResult>, StorageError> {
        JsonlReader::new(self.config.matches_path()).read_all()
    }

    fn add_player(&self, name: &str) -> Result<Player, StorageError> {
        let mut tx = self.transaction()?;
        let player = tx.insert_player(name)?;
        tx.commit()?;
        Ok(player)
    }

    fn add_match(&self, winner: PlayerId, loser: PlayerId) -> Result<MatchResult, StorageError> {
        let mut tx = self.transaction()?;
        let result = tx.insert_match(winner, loser)?;
        tx.commit()?;
        Ok(result)
    }

    fn clear_matches(&self) -> Result<usize, StorageError> {
        let mut tx = self.transaction()?;
        let removed = tx.clear_matches();
        tx.commit()?;
        Ok(removed)
    }

    fn clear_players(&self) -> Result<usize, StorageError> {
        let mut tx = self.transaction()?;
        let removed = tx.clear_players()?;
        tx.commit()?;
        Ok(removed)
    }

    fn snapshot(&self) -> Result<Snapshot, StorageError> {
        let mut tx = self.transaction()?;
        Ok(Snapshot {
            players: std::mem::take(&mut tx.players),
            matches: std::mem::take(&mut tx.matches),
        })
    }
}

/// A scoped unit of work over the store.
///
/// `commit` writes staged changes; dropping without committing discards them.
/// A commit replaces every changed file or none of them.
pub struct StoreTransaction<'a> {
    config: &'a StorageConfig,
    _guard: MutexGuard<'a, ()>,
    players: Vec<Player>,
    matches: Vec<MatchResult>,
    sequence: IdSequence,
    players_dirty: bool,
    matches_dirty: bool,
    sequence_dirty: bool,
    committed: bool,
}

impl StoreTransaction<'_> {
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[MatchResult] {
        &self.matches
    }

    /// Stage a new player with the next serial id.
    ///
    /// Ids come from the persisted sequence, bumped past any id already on
    /// disk, so an id is never handed out twice.
    pub fn insert_player(&mut self, name: &str) -> Result<Player, StorageError> {
        let past_existing = match self.players.iter().map(|p| p.id).max() {
            Some(max) => max.next().ok_or(StorageError::IdsExhausted)?,
            None => PlayerId::new(1),
        };
        let id = past_existing.max(self.sequence.next_player_id);
        self.sequence.next_player_id = id.next().ok_or(StorageError::IdsExhausted)?;
        self.sequence_dirty = true;

        let player = Player::new(id, name.to_string());
        self.players.push(player.clone());
        self.players_dirty = true;
        Ok(player)
    }

    /// Stage a match result between two registered players.
    pub fn insert_match(
        &mut self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchResult, StorageError> {
        if winner == loser {
            return Err(StorageError::SelfMatch(winner));
        }
        for id in [winner, loser] {
            if !self.players.iter().any(|p| p.id == id) {
                return Err(StorageError::UnknownPlayer(id));
            }
        }

        let result = MatchResult::new(winner, loser);
        self.matches.push(result.clone());
        self.matches_dirty = true;
        Ok(result)
    }

    /// Stage removal of every match result.
    pub fn clear_matches(&mut self) -> usize {
        let removed = self.matches.len();
        self.matches.clear();
        self.matches_dirty = true;
        removed
    }

    /// Stage removal of every player. Fails while match results remain.
    pub fn clear_players(&mut self) -> Result<usize, StorageError> {
        if !self.matches.is_empty() {
            return Err(StorageError::PlayersReferenced(self.matches.len()));
        }

        let removed = self.players.len();
        self.players.clear();
        self.players_dirty = true;
        Ok(removed)
    }

    /// Write staged changes to disk.
    ///
    /// Every changed file is written to a temp file first; targets are only
    /// replaced once all of them are ready.
    pub fn commit(mut self) -> Result<(), StorageError> {
        let mut staged = Vec::new();
        if self.players_dirty {
            staged.push(JsonlWriter::new(self.config.players_path()).stage(&self.players)?);
        }
        if self.matches_dirty {
            staged.push(JsonlWriter::new(self.config.matches_path()).stage(&self.matches)?);
        }
        if self.sequence_dirty {
            let contents = serde_json::to_vec(&self.sequence)?;
            staged.push(StagedFile::write(self.config.sequence_path(), &contents)?);
        }
        persist_all(staged)?;

        self.committed = true;
        info!(
            players = self.players.len(),
            matches = self.matches.len(),
            "Committed store transaction"
        );
        Ok(())
    }
}

impl Drop for StoreTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed && (self.players_dirty || self.matches_dirty) {
            debug!("Discarding uncommitted store transaction");
        }
    }
}
