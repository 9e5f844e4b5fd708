//! League processing around the rating engine
//!
//! This module loads league documents, keeps the player and team roster,
//! runs rating periods in the required record-then-update order, and ranks
//! the results.

pub mod document;
pub mod leaderboard;
pub mod period;
pub mod roster;

// Re-export commonly used types
pub use document::{Event, LeagueDocument, PeriodEntry, PlayerEntry, TeamEntry};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use period::{process_period, process_periods, record_event};
pub use roster::Roster;
