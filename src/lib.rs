//! # Swiss Tracker
//!
//! A Swiss-system tournament tracker: register players, report match
//! results, rank standings and pair the next round.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, match results, standings, pairings)
//! - **calculate**: Standings ranking and rematch-free pairing engine
//! - **storage**: JSONL-backed tournament store with scoped transactions
//! - **tournament**: Service binding a store to the engine
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;
pub mod tournament;

pub use models::*;
