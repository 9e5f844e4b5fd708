//! Error types for the rating engine and the league runner
//!
//! The rating core reports typed [`RatingError`]s so callers can tell bad input
//! apart from numeric failures. Everything above the core uses anyhow for
//! consistent error handling, with [`LadderError`] for league-level scenarios.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Result type returned by the rating core
pub type RatingResult<T> = std::result::Result<T, RatingError>;

/// Failures raised by a single rating entity
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Invalid {name} {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Volatility solve did not converge after {iterations} iterations (last step {last_step})")]
    ConvergenceFailure { iterations: u32, last_step: f64 },

    #[error("Degenerate batch: variance sum is zero or not finite over {results} results")]
    DegenerateBatch { results: usize },
}

/// Custom error types for league processing
#[derive(Debug, thiserror::Error)]
pub enum LadderError {
    #[error("Unknown competitor: {name}")]
    UnknownCompetitor { name: String },

    #[error("Team has no members: {team}")]
    EmptyTeam { team: String },

    #[error("Duplicate name in league document: {name}")]
    DuplicateName { name: String },

    #[error("Player {name} cannot be paired against itself")]
    SelfPairing { name: String },

    #[error("Invalid league document: {message}")]
    InvalidDocument { message: String },

    #[error("Rating update failed for {player}: {source}")]
    RatingFailed {
        player: String,
        #[source]
        source: RatingError,
    },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
