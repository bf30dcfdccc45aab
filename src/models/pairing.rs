//! Pairing model — two players assigned to meet in the next round.

use serde::{Deserialize, Serialize};

use super::{MatchResult, PlayerId};

/// A next-round pairing. Unordered; player 1 is the higher-ranked side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pairing {
    pub player1_id: PlayerId,
    pub player1_name: String,
    pub player2_id: PlayerId,
    pub player2_name: String,
}

impl Pairing {
    /// Create a new Pairing from two ranked `(id, name)` entries.
    pub fn new(player1: (PlayerId, String), player2: (PlayerId, String)) -> Self {
        Self {
            player1_id: player1.0,
            player1_name: player1.1,
            player2_id: player2.0,
            player2_name: player2.1,
        }
    }

    /// Whether the given player is one of the two sides.
    pub fn involves(&self, id: PlayerId) -> bool {
        self.player1_id == id || self.player2_id == id
    }

    /// Whether these two players already met in `history`.
    pub fn is_rematch(&self, history: &[MatchResult]) -> bool {
        history
            .iter()
            .any(|m| m.is_between(self.player1_id, self.player2_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairing(a: u32, b: u32) -> Pairing {
        Pairing::new(
            (PlayerId::new(a), format!("P{}", a)),
            (PlayerId::new(b), format!("P{}", b)),
        )
    }

    #[test]
    fn test_pairing_creation() {
        let p = pairing(1, 2);
        assert_eq!(p.player1_id, PlayerId::new(1));
        assert_eq!(p.player1_name, "P1");
        assert_eq!(p.player2_id, PlayerId::new(2));
        assert_eq!(p.player2_name, "P2");
    }

    #[test]
    fn test_pairing_involves() {
        let p = pairing(3, 4);
        assert!(p.involves(PlayerId::new(3)));
        assert!(p.involves(PlayerId::new(4)));
        assert!(!p.involves(PlayerId::new(5)));
    }

    #[test]
    fn test_pairing_is_rematch_either_orientation() {
        let history = vec![MatchResult::new(PlayerId::new(2), PlayerId::new(1))];
        assert!(pairing(1, 2).is_rematch(&history));
        assert!(!pairing(1, 3).is_rematch(&history));
    }
}
