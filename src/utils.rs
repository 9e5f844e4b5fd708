//! Scale conversions between Glicko and Glicko-2 units

use crate::rating::glicko2::{BASE_RATING, RATING_SCALE};

/// Convert a Glicko rating (1500-centred) to the internal Glicko-2 scale
pub fn to_glicko2_rating(rating: f64) -> f64 {
    (rating - BASE_RATING) / RATING_SCALE
}

/// Convert an internal Glicko-2 rating back to the Glicko scale
pub fn from_glicko2_rating(mu: f64) -> f64 {
    mu * RATING_SCALE + BASE_RATING
}

/// Convert a Glicko rating deviation to the internal Glicko-2 scale
pub fn to_glicko2_deviation(deviation: f64) -> f64 {
    deviation / RATING_SCALE
}

/// Convert an internal Glicko-2 deviation back to the Glicko scale
pub fn from_glicko2_deviation(phi: f64) -> f64 {
    phi * RATING_SCALE
}
