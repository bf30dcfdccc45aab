//! Core data models for the tournament tracker.

mod ids;
mod pairing;
mod player;
mod standing;

pub use ids::*;
pub use pairing::*;
pub use player::*;
pub use standing::*;
