//! Glicko-2 rating engine
//!
//! This module provides the per-competitor rating state and the batch update
//! that applies one rating period of results to it.

pub mod entity;
pub mod glicko2;

// Re-export commonly used types
pub use entity::{PendingResult, RatingEntity, RatingSnapshot};
pub use glicko2::{rate_period, PeriodUpdate};
