//! Per-competitor rating state and pending period results
//!
//! A [`RatingEntity`] accumulates results during a rating period and applies
//! them all at once in [`RatingEntity::update`]. Opponents are captured as
//! [`RatingSnapshot`] values when a result is recorded, so later changes to an
//! opponent never leak into a period that is already being accumulated.

use skillratings::glicko2::Glicko2Rating;
use std::cmp::Ordering;
use tracing::debug;

use crate::error::{RatingError, RatingResult};
use crate::rating::glicko2::{self, DEFAULT_DEVIATION, DEFAULT_RATING, DEFAULT_VOLATILITY};
use crate::types::{Outcome, PlayerRating};
use crate::utils::{
    from_glicko2_deviation, from_glicko2_rating, to_glicko2_deviation, to_glicko2_rating,
};

/// Read-only view of a competitor's state at one point in time.
///
/// Values are held on the internal Glicko-2 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSnapshot {
    mu: f64,
    phi: f64,
    sigma: f64,
}

impl RatingSnapshot {
    /// Build a snapshot from Glicko-scale values without validation
    pub(crate) fn from_glicko(rating: f64, deviation: f64, volatility: f64) -> Self {
        Self {
            mu: to_glicko2_rating(rating),
            phi: to_glicko2_deviation(deviation),
            sigma: volatility,
        }
    }

    /// Rating on the Glicko-2 scale
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Rating deviation on the Glicko-2 scale
    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Volatility
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Rating on the Glicko scale
    pub fn rating(&self) -> f64 {
        from_glicko2_rating(self.mu)
    }

    /// Rating deviation on the Glicko scale
    pub fn deviation(&self) -> f64 {
        from_glicko2_deviation(self.phi)
    }
}

/// A recorded result awaiting the next update
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingResult {
    pub opponent: RatingSnapshot,
    pub outcome: Outcome,
}

/// Rating state of one competitor
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntity {
    mu: f64,
    phi: f64,
    sigma: f64,
    pending: Vec<PendingResult>,
}

impl Default for RatingEntity {
    fn default() -> Self {
        Self::from_snapshot(RatingSnapshot::from_glicko(
            DEFAULT_RATING,
            DEFAULT_DEVIATION,
            DEFAULT_VOLATILITY,
        ))
    }
}

impl RatingEntity {
    /// Create an entity from Glicko-scale rating, deviation and volatility
    pub fn new(rating: f64, deviation: f64, volatility: f64) -> RatingResult<Self> {
        validate_rating(rating)?;
        validate_deviation(deviation)?;
        validate_volatility(volatility)?;

        Ok(Self::from_snapshot(RatingSnapshot::from_glicko(
            rating, deviation, volatility,
        )))
    }

    fn from_snapshot(snapshot: RatingSnapshot) -> Self {
        Self {
            mu: snapshot.mu,
            phi: snapshot.phi,
            sigma: snapshot.sigma,
            pending: Vec::new(),
        }
    }

    pub fn rating(&self) -> f64 {
        from_glicko2_rating(self.mu)
    }

    pub fn deviation(&self) -> f64 {
        from_glicko2_deviation(self.phi)
    }

    pub fn volatility(&self) -> f64 {
        self.sigma
    }

    pub fn set_rating(&mut self, rating: f64) -> RatingResult<()> {
        validate_rating(rating)?;
        self.mu = to_glicko2_rating(rating);
        Ok(())
    }

    pub fn set_deviation(&mut self, deviation: f64) -> RatingResult<()> {
        validate_deviation(deviation)?;
        self.phi = to_glicko2_deviation(deviation);
        Ok(())
    }

    pub fn set_volatility(&mut self, volatility: f64) -> RatingResult<()> {
        validate_volatility(volatility)?;
        self.sigma = volatility;
        Ok(())
    }

    /// Current state as an immutable opponent view
    pub fn snapshot(&self) -> RatingSnapshot {
        RatingSnapshot {
            mu: self.mu,
            phi: self.phi,
            sigma: self.sigma,
        }
    }

    /// Current state on the Glicko scale
    pub fn player_rating(&self) -> PlayerRating {
        PlayerRating {
            rating: self.rating(),
            deviation: self.deviation(),
            volatility: self.volatility(),
        }
    }

    /// Results recorded since the last update
    pub fn pending_results(&self) -> &[PendingResult] {
        &self.pending
    }

    /// Record a result given as a score: 1.0 win, 0.0 loss, 0.5 draw.
    ///
    /// No calculation happens until [`RatingEntity::update`].
    pub fn record_result(&mut self, opponent: &RatingEntity, outcome: f64) -> RatingResult<()> {
        let outcome = Outcome::try_from(outcome)?;
        self.record_outcome(opponent, outcome);
        Ok(())
    }

    pub fn record_outcome(&mut self, opponent: &RatingEntity, outcome: Outcome) {
        self.record_snapshot(opponent.snapshot(), outcome);
    }

    /// Record a result against a snapshot taken earlier
    pub fn record_snapshot(&mut self, opponent: RatingSnapshot, outcome: Outcome) {
        self.pending.push(PendingResult { opponent, outcome });
    }

    pub fn record_win(&mut self, opponent: &RatingEntity) {
        self.record_outcome(opponent, Outcome::Win);
    }

    pub fn record_loss(&mut self, opponent: &RatingEntity) {
        self.record_outcome(opponent, Outcome::Loss);
    }

    pub fn record_draw(&mut self, opponent: &RatingEntity) {
        self.record_outcome(opponent, Outcome::Draw);
    }

    /// Drop all pending results without applying them
    pub fn clear_pending_results(&mut self) {
        self.pending.clear();
    }

    /// Apply all pending results and clear them.
    ///
    /// With no pending results this does nothing, and the deviation is not
    /// widened for inactivity. On error the state and the pending results are
    /// left untouched.
    pub fn update(&mut self) -> RatingResult<()> {
        let Some(update) = glicko2::rate_period(&self.snapshot(), &self.pending)? else {
            return Ok(());
        };

        debug!(
            old_rating = self.rating(),
            new_rating = from_glicko2_rating(update.mu),
            games = self.pending.len(),
            "applied rating period"
        );

        self.mu = update.mu;
        self.phi = update.phi;
        self.sigma = update.sigma;
        self.clear_pending_results();
        Ok(())
    }

    /// Probability of beating `opponent` on the Glicko scale
    pub fn win_probability(&self, opponent: &RatingEntity) -> f64 {
        let combined_variance =
            self.deviation() * self.deviation() + opponent.deviation() * opponent.deviation();
        let spread = 400.0 * (1.0 + 0.000_010_072_398_6 * combined_variance).sqrt();
        1.0 / (1.0 + 10f64.powf((opponent.rating() - self.rating()) / spread))
    }
}

/// Entities order by rating. Equal ratings with otherwise different state
/// are unordered.
impl PartialOrd for RatingEntity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.mu.partial_cmp(&other.mu)? {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl std::fmt::Display for RatingEntity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} +/- {:.1} (volatility {:.5})",
            self.rating(),
            self.deviation(),
            self.volatility()
        )
    }
}

impl TryFrom<PlayerRating> for RatingEntity {
    type Error = RatingError;

    fn try_from(rating: PlayerRating) -> RatingResult<Self> {
        Self::new(rating.rating, rating.deviation, rating.volatility)
    }
}

impl TryFrom<Glicko2Rating> for RatingEntity {
    type Error = RatingError;

    fn try_from(rating: Glicko2Rating) -> RatingResult<Self> {
        Self::new(rating.rating, rating.deviation, rating.volatility)
    }
}

impl From<&RatingEntity> for Glicko2Rating {
    fn from(entity: &RatingEntity) -> Self {
        entity.player_rating().into()
    }
}

fn validate_rating(rating: f64) -> RatingResult<()> {
    if !rating.is_finite() {
        return Err(RatingError::InvalidParameter {
            name: "rating",
            value: rating,
            reason: "must be finite",
        });
    }
    Ok(())
}

fn validate_deviation(deviation: f64) -> RatingResult<()> {
    if !deviation.is_finite() || deviation <= 0.0 {
        return Err(RatingError::InvalidParameter {
            name: "deviation",
            value: deviation,
            reason: "must be positive and finite",
        });
    }
    Ok(())
}

fn validate_volatility(volatility: f64) -> RatingResult<()> {
    if !volatility.is_finite() || volatility <= 0.0 {
        return Err(RatingError::InvalidParameter {
            name: "volatility",
            value: volatility,
            reason: "must be positive and finite",
        });
    }
    Ok(())
}
