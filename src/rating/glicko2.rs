//! Glicko-2 batch update
//!
//! Pure functions that turn a player's pre-period state and the results it
//! accumulated during a rating period into its post-period state. Everything
//! here works on the internal Glicko-2 scale; see [`crate::utils`] for the
//! conversions to and from Glicko units.
//!
//! The system is described at <http://www.glicko.net/glicko/glicko2.pdf>.

use std::f64::consts::PI;

use tracing::debug;

use crate::error::{RatingError, RatingResult};
use crate::rating::entity::{PendingResult, RatingSnapshot};

/// Conversion factor between the Glicko and Glicko-2 scales
pub const RATING_SCALE: f64 = 173.7178;

/// Glicko rating that maps to 0 on the Glicko-2 scale
pub const BASE_RATING: f64 = 1500.0;

/// Rating of a new player
pub const DEFAULT_RATING: f64 = 1500.0;

/// Rating deviation of a new player
pub const DEFAULT_DEVIATION: f64 = 350.0;

/// Volatility of a new player
pub const DEFAULT_VOLATILITY: f64 = 0.06;

/// System constant (tau) constraining volatility change between periods.
/// Changing it changes every result and must be treated as a new version.
pub const VOLATILITY_CHANGE: f64 = 0.3;

/// Absolute tolerance on successive Newton iterates
pub const CONVERGENCE_TOLERANCE: f64 = 0.000_000_1;

/// Hard cap on Newton iterations for the volatility solve
pub const MAX_ITERATIONS: u32 = 100;

/// New internal state produced by one rating period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodUpdate {
    pub mu: f64,
    pub phi: f64,
    pub sigma: f64,
    /// Newton iterations spent on the volatility solve
    pub iterations: u32,
}

/// Opponent uncertainty weight
pub fn g(phi: f64) -> f64 {
    1.0 / (1.0 + 3.0 * phi * phi / (PI * PI)).sqrt()
}

/// Expected score against an opponent
pub fn expected_score(mu: f64, mu_opponent: f64, phi_opponent: f64) -> f64 {
    1.0 / (1.0 + (-g(phi_opponent) * (mu - mu_opponent)).exp())
}

/// Rate one period of results for `player`.
///
/// Returns `Ok(None)` when there are no results: the player's state is left
/// exactly as it was, deviation included.
pub fn rate_period(
    player: &RatingSnapshot,
    results: &[PendingResult],
) -> RatingResult<Option<PeriodUpdate>> {
    if results.is_empty() {
        return Ok(None);
    }

    let mu = player.mu();
    let phi = player.phi();

    let mut information = 0.0;
    let mut score_sum = 0.0;
    for result in results {
        let opponent = &result.opponent;
        let g_j = g(opponent.phi());
        let e_j = expected_score(mu, opponent.mu(), opponent.phi());
        information += g_j * g_j * e_j * (1.0 - e_j);
        score_sum += g_j * (result.outcome.score() - e_j);
    }

    if information == 0.0 || !information.is_finite() {
        return Err(RatingError::DegenerateBatch {
            results: results.len(),
        });
    }

    let variance = 1.0 / information;
    let delta = variance * score_sum;

    let (sigma, iterations) = solve_volatility(phi, player.sigma(), variance, delta)?;

    let pre_phi = (phi * phi + sigma * sigma).sqrt();
    let new_phi = 1.0 / (1.0 / (pre_phi * pre_phi) + 1.0 / variance).sqrt();
    let new_mu = mu + new_phi * new_phi * score_sum;

    debug!(
        results = results.len(),
        iterations,
        variance,
        delta,
        "rated period"
    );

    Ok(Some(PeriodUpdate {
        mu: new_mu,
        phi: new_phi,
        sigma,
        iterations,
    }))
}

/// Newton's method on x = ln(sigma^2).
///
/// Returns the new volatility and the number of iterations taken.
fn solve_volatility(phi: f64, sigma: f64, variance: f64, delta: f64) -> RatingResult<(f64, u32)> {
    let tau_squared = VOLATILITY_CHANGE * VOLATILITY_CHANGE;
    let phi_squared = phi * phi;
    let a = (sigma * sigma).ln();

    let mut x = a;
    let mut step = f64::INFINITY;

    for iteration in 1..=MAX_ITERATIONS {
        let ex = x.exp();
        let d = phi_squared + variance + ex;
        let h1 = -(x - a) / tau_squared - 0.5 * ex / d + 0.5 * ex * (delta / d) * (delta / d);
        let h2 = -1.0 / tau_squared - 0.5 * ex * (phi_squared + variance) / (d * d)
            + 0.5 * delta * delta * ex * (phi_squared + variance - ex) / (d * d * d);

        let next = x - h1 / h2;
        if !next.is_finite() {
            debug!(iteration, x, "volatility solve diverged");
            return Err(RatingError::ConvergenceFailure {
                iterations: iteration,
                last_step: f64::NAN,
            });
        }

        step = (next - x).abs();
        x = next;

        if step <= CONVERGENCE_TOLERANCE {
            return Ok(((x / 2.0).exp(), iteration));
        }
    }

    debug!(
        iterations = MAX_ITERATIONS,
        last_step = step,
        "volatility solve hit the iteration cap"
    );
    Err(RatingError::ConvergenceFailure {
        iterations: MAX_ITERATIONS,
        last_step: step,
    })
}
