use std::collections::HashMap;

use crate::models::{MatchResult, Player, PlayerId, StandingRecord};

use super::EngineError;

/// Compute standings from a snapshot of players and match results.
///
/// Returns one record per player, sorted by wins descending. Ties keep
/// registration order, i.e. the order of `players`.
pub fn compute_standings(
    players: &[Player],
    matches: &[MatchResult],
) -> Result<Vec<StandingRecord>, EngineError> {
    let index: HashMap<PlayerId, usize> = players
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id, i))
        .collect();

    let mut records: Vec<StandingRecord> = players
        .iter()
        .map(|p| StandingRecord::new(p.id, p.name.clone()))
        .collect();

    for m in matches {
        let winner = *index
            .get(&m.winner_id)
            .ok_or(EngineError::InvalidReference(m.winner_id))?;
        let loser = *index
            .get(&m.loser_id)
            .ok_or(EngineError::InvalidReference(m.loser_id))?;

        records[winner].wins += 1;
        records[winner].matches += 1;
        records[loser].matches += 1;
    }

    // sort_by is stable, so equal win counts stay in registration order
    records.sort_by(|a, b| b.wins.cmp(&a.wins));

    Ok(records)
}

/// Reduce standings to `(id, name)` in rank order.
pub fn ranked_players(standings: &[StandingRecord]) -> Vec<(PlayerId, String)> {
    standings
        .iter()
        .map(|r| (r.player_id, r.name.clone()))
        .collect()
}
