//! Serial player identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A player's unique serial id, assigned by the store on registration.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(u32);

impl PlayerId {
    /// Create a new PlayerId from a raw serial number.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// The id that follows this one in the serial sequence, if any.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// Get the raw serial number.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlayerId({})", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_next() {
        assert_eq!(PlayerId::new(1).next(), Some(PlayerId::new(2)));
    }

    #[test]
    fn test_player_id_next_exhausted() {
        assert_eq!(PlayerId::new(u32::MAX).next(), None);
    }

    #[test]
    fn test_player_id_serializes_as_number() {
        let json = serde_json::to_string(&PlayerId::new(42)).unwrap();
        assert_eq!(json, "42");

        let parsed: PlayerId = serde_json::from_str("7").unwrap();
        assert_eq!(parsed.get(), 7);
    }

    #[test]
    fn test_player_id_display() {
        assert_eq!(format!("{}", PlayerId::new(12)), "12");
    }

    #[test]
    fn test_player_id_debug() {
        let debug_str = format!("{:?}", PlayerId::new(3));
        assert_eq!(debug_str, "PlayerId(3)");
    }

    #[test]
    fn test_player_id_ordering() {
        assert!(PlayerId::from(2) > PlayerId::from(1));
    }
}
