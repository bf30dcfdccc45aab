//! Tournament service.
//!
//! Binds a `TournamentStore` to the ranking and pairing engine. Each call
//! reads a fresh snapshot from the store; nothing is cached between calls.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::calculate::{
    compute_adjacent_pairings, compute_pairings, compute_standings, ranked_players, EngineError,
};
use crate::config::PairingConfig;
use crate::models::{MatchResult, Pairing, Player, PlayerId, StandingRecord};
use crate::storage::{StorageError, TournamentStore};

/// Errors surfaced by tournament operations.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Player name must not be blank")]
    InvalidName,
}

/// A Swiss-system tournament backed by a store.
pub struct Tournament<S> {
    store: S,
    pairing: PairingConfig,
}

impl<S: TournamentStore> Tournament<S> {
    pub fn new(store: S, pairing: PairingConfig) -> Self {
        Self { store, pairing }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Register a player. Surrounding whitespace is trimmed from the name.
    pub fn register_player(&self, name: &str) -> Result<Player, TournamentError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidName);
        }

        let player = self.store.add_player(name)?;
        info!(id = %player.id, name = %player.name, "Registered player");
        Ok(player)
    }

    /// Record that `winner` beat `loser`.
    pub fn report_match(
        &self,
        winner: PlayerId,
        loser: PlayerId,
    ) -> Result<MatchResult, TournamentError> {
        let result = self.store.add_match(winner, loser)?;
        info!(%winner, %loser, "Reported match");
        Ok(result)
    }

    pub fn players(&self) -> Result<Vec<Player>, TournamentError> {
        Ok(self.store.list_players()?)
    }

    pub fn matches(&self) -> Result<Vec<MatchResult>, TournamentError> {
        Ok(self.store.list_matches()?)
    }

    pub fn count_players(&self) -> Result<usize, TournamentError> {
        Ok(self.store.count_players()?)
    }

    /// Remove every match result.
    pub fn delete_matches(&self) -> Result<usize, TournamentError> {
        let removed = self.store.clear_matches()?;
        info!(removed, "Deleted matches");
        Ok(removed)
    }

    /// Remove every player. Matches must be deleted first.
    pub fn delete_players(&self) -> Result<usize, TournamentError> {
        let removed = self.store.clear_players()?;
        info!(removed, "Deleted players");
        Ok(removed)
    }

    /// Current standings, ranked by wins.
    pub fn player_standings(&self) -> Result<Vec<StandingRecord>, TournamentError> {
        let snapshot = self.store.snapshot()?;
        let standings = compute_standings(&snapshot.players, &snapshot.matches)?;
        debug!(players = standings.len(), "Computed standings");
        Ok(standings)
    }

    /// Pairings for the next round.
    ///
    /// With `rematch_fallback` enabled, a round the greedy strategy cannot
    /// pair without a rematch is paired strictly by adjacent rank instead.
    pub fn swiss_pairings(&self) -> Result<Vec<Pairing>, TournamentError> {
        let snapshot = self.store.snapshot()?;
        let standings = compute_standings(&snapshot.players, &snapshot.matches)?;
        let ranked = ranked_players(&standings);

        match compute_pairings(&ranked, &snapshot.matches) {
            Ok(pairings) => {
                debug!(pairings = pairings.len(), "Computed pairings");
                Ok(pairings)
            }
            Err(EngineError::NoValidPairing(id)) if self.pairing.rematch_fallback => {
                warn!(
                    player = %id,
                    "No rematch-free pairing, falling back to adjacent ranks"
                );
                Ok(compute_adjacent_pairings(&ranked)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
