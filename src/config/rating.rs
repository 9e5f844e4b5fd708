//! Rating defaults for new players

use serde::{Deserialize, Serialize};

use crate::error::RatingResult;
use crate::rating::glicko2::{DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_VOLATILITY};
use crate::rating::RatingEntity;

/// Values used for any player whose league entry omits them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    pub default_rating: f64,
    pub default_deviation: f64,
    pub default_volatility: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            default_rating: DEFAULT_RATING,
            default_deviation: DEFAULT_DEVIATION,
            default_volatility: DEFAULT_VOLATILITY,
        }
    }
}

impl RatingConfig {
    /// Build an entity, falling back to the configured defaults
    pub fn new_entity(
        &self,
        rating: Option<f64>,
        deviation: Option<f64>,
        volatility: Option<f64>,
    ) -> RatingResult<RatingEntity> {
        RatingEntity::new(
            rating.unwrap_or(self.default_rating),
            deviation.unwrap_or(self.default_deviation),
            volatility.unwrap_or(self.default_volatility),
        )
    }

    /// Check that the defaults describe a valid entity
    pub fn validate(&self) -> RatingResult<()> {
        self.new_entity(None, None, None).map(|_| ())
    }
}
