//! Route handlers.

pub mod cleanup;
pub mod leaderboard;
pub mod rounds;
pub mod tips;
