//! Derived standings records.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A player's aggregated win record. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRecord {
    pub player_id: PlayerId,
    pub name: String,

    /// Matches won
    pub wins: u32,

    /// Matches played (wins + losses)
    pub matches: u32,
}

impl StandingRecord {
    /// A fresh record with no matches played.
    pub fn new(player_id: PlayerId, name: String) -> Self {
        Self {
            player_id,
            name,
            wins: 0,
            matches: 0,
        }
    }

    /// Matches lost.
    pub fn losses(&self) -> u32 {
        self.matches - self.wins
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_record_starts_empty() {
        let record = StandingRecord::new(PlayerId::new(1), "Applejack".to_string());
        assert_eq!(record.wins, 0);
        assert_eq!(record.matches, 0);
        assert_eq!(record.losses(), 0);
    }

    #[test]
    fn test_standing_record_losses() {
        let mut record = StandingRecord::new(PlayerId::new(1), "Rarity".to_string());
        record.wins = 2;
        record.matches = 5;
        assert_eq!(record.losses(), 3);
    }
}
