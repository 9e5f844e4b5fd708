//! Glicko Ladder - Glicko-2 ratings for ladders, leagues and races
//!
//! This crate provides the Glicko-2 rating engine (per-player state, pending
//! period results, and the batch update), plus league processing that turns
//! a document of players, teams and rating periods into leaderboards.

pub mod config;
pub mod error;
pub mod league;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{LadderError, RatingError, RatingResult, Result};
pub use types::*;

// Re-export key components
pub use league::{Leaderboard, LeagueDocument, Roster};
pub use rating::{RatingEntity, RatingSnapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
