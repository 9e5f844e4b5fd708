//! Common types used throughout the rating ladder

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use skillratings::glicko2::Glicko2Rating;
use skillratings::Outcomes;

use crate::error::{LadderError, RatingError, RatingResult};

/// Unique identifier for players
pub type PlayerId = String;

/// Name of a team, resolved into its member players
pub type TeamName = String;

/// Result of a single contest from the recording player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

impl Outcome {
    /// Score used by the rating algorithm
    pub fn score(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Loss => 0.0,
            Outcome::Draw => 0.5,
        }
    }

    /// The same contest seen from the opponent's side
    pub fn inverse(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Loss => Outcome::Win,
            Outcome::Draw => Outcome::Draw,
        }
    }
}

impl TryFrom<f64> for Outcome {
    type Error = RatingError;

    fn try_from(score: f64) -> RatingResult<Self> {
        if score == 1.0 {
            Ok(Outcome::Win)
        } else if score == 0.0 {
            Ok(Outcome::Loss)
        } else if score == 0.5 {
            Ok(Outcome::Draw)
        } else {
            Err(RatingError::InvalidParameter {
                name: "outcome",
                value: score,
                reason: "must be 1.0 (win), 0.0 (loss) or 0.5 (draw)",
            })
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "win"),
            Outcome::Loss => write!(f, "loss"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

impl From<Outcome> for Outcomes {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Outcomes::WIN,
            Outcome::Loss => Outcomes::LOSS,
            Outcome::Draw => Outcomes::DRAW,
        }
    }
}

/// Rating information for a player on the Glicko scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerRating {
    pub rating: f64,
    pub deviation: f64,
    pub volatility: f64,
}

impl Default for PlayerRating {
    fn default() -> Self {
        Self {
            rating: 1500.0,
            deviation: 350.0,
            volatility: 0.06,
        }
    }
}

impl From<Glicko2Rating> for PlayerRating {
    fn from(rating: Glicko2Rating) -> Self {
        Self {
            rating: rating.rating,
            deviation: rating.deviation,
            volatility: rating.volatility,
        }
    }
}

impl From<PlayerRating> for Glicko2Rating {
    fn from(rating: PlayerRating) -> Self {
        Self {
            rating: rating.rating,
            deviation: rating.deviation,
            volatility: rating.volatility,
        }
    }
}

/// Rating change information for a player after one period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub old_rating: PlayerRating,
    pub new_rating: PlayerRating,
    /// Number of results applied in the period
    pub games: usize,
}

impl RatingChange {
    /// Signed rating delta on the Glicko scale
    pub fn rating_delta(&self) -> f64 {
        self.new_rating.rating - self.old_rating.rating
    }
}

/// Player whose update was skipped in a period
#[derive(Debug, Clone)]
pub struct FailedUpdate {
    pub player_id: PlayerId,
    pub error: RatingError,
}

impl FailedUpdate {
    pub fn to_error(&self) -> LadderError {
        LadderError::RatingFailed {
            player: self.player_id.clone(),
            source: self.error.clone(),
        }
    }
}

/// Summary of one processed rating period
#[derive(Debug, Clone)]
pub struct PeriodReport {
    /// 1-based period number
    pub period: usize,
    pub changes: Vec<RatingChange>,
    pub failures: Vec<FailedUpdate>,
    pub processed_at: DateTime<Utc>,
}
