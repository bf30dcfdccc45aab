use std::collections::HashSet;

use crate::models::{MatchResult, Pairing, PlayerId};

use super::EngineError;

/// Set of player pairs that have already met, regardless of who won.
#[derive(Debug, Clone, Default)]
pub struct MatchHistory {
    played: HashSet<(PlayerId, PlayerId)>,
}

impl MatchHistory {
    /// Build the history from a snapshot of match results.
    pub fn from_matches(matches: &[MatchResult]) -> Self {
        let played = matches
            .iter()
            .map(|m| Self::key(m.winner_id, m.loser_id))
            .collect();
        Self { played }
    }

    /// Whether `a` and `b` have already played each other.
    pub fn has_played(&self, a: PlayerId, b: PlayerId) -> bool {
        self.played.contains(&Self::key(a, b))
    }

    /// Number of distinct pairs that have met.
    pub fn len(&self) -> usize {
        self.played.len()
    }

    pub fn is_empty(&self) -> bool {
        self.played.is_empty()
    }

    fn key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }
}

/// Generate next-round pairings from players in rank order.
///
/// The highest-ranked unpaired player is matched with the nearest-ranked
/// player they have not yet faced. Greedy: if the head of the queue has no
/// unplayed opponent left, pairing fails with `NoValidPairing` rather than
/// backtracking over earlier choices.
pub fn compute_pairings(
    ranked: &[(PlayerId, String)],
    matches: &[MatchResult],
) -> Result<Vec<Pairing>, EngineError> {
    if ranked.len() % 2 != 0 {
        return Err(EngineError::OddPlayerCount(ranked.len()));
    }

    let history = MatchHistory::from_matches(matches);
    let mut queue = ranked.to_vec();
    let mut pairings = Vec::with_capacity(ranked.len() / 2);

    while !queue.is_empty() {
        let player1 = queue.remove(0);
        let opponent = queue
            .iter()
            .position(|(id, _)| !history.has_played(player1.0, *id))
            .ok_or(EngineError::NoValidPairing(player1.0))?;
        let player2 = queue.remove(opponent);

        pairings.push(Pairing::new(player1, player2));
    }

    Ok(pairings)
}

/// Pair players strictly by adjacent rank (1st with 2nd, 3rd with 4th, ...)
/// without looking at match history.
pub fn compute_adjacent_pairings(
    ranked: &[(PlayerId, String)],
) -> Result<Vec<Pairing>, EngineError> {
    if ranked.len() % 2 != 0 {
        return Err(EngineError::OddPlayerCount(ranked.len()));
    }

    Ok(ranked
        .chunks_exact(2)
        .map(|pair| Pairing::new(pair[0].clone(), pair[1].clone()))
        .collect())
}
