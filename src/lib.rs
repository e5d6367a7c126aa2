//! # Tip Tracker
//!
//! A season-long footy tipping competition engine: participants pick
//! one team per round, picks are scored against real results, and
//! standings accumulate across the season.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (fixtures, tips, standings, etc.)
//! - **tipping**: Round lifecycle, result projection, eligibility and
//!   submission rules
//! - **leaderboard**: Standings aggregation
//! - **cleanup**: Duplicate tip detection and resolution
//! - **storage**: JSONL season stores (fixtures, users, tips)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod cleanup;
pub mod config;
pub mod error;
pub mod leaderboard;
pub mod models;
pub mod storage;
pub mod time;
pub mod tipping;

pub use error::EngineError;
pub use models::*;
