//! Error types for the planner.

use thiserror::Error;

/// Reasons a coordinate is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// Latitude or longitude is `NaN` or infinite.
    #[error("coordinate must be finite")]
    NonFinite,
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// Input was not of the form `lat,lng`.
    #[error("cannot parse coordinate from {0:?}")]
    Parse(String),
}

/// Errors returned by [`crate::solver::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("invalid depot: {0}")]
    InvalidDepot(#[source] CoordinateError),
    /// The delivery at `position` in the input slice has an unusable coordinate.
    #[error("invalid delivery at position {position}: {source}")]
    InvalidDelivery {
        position: usize,
        #[source]
        source: CoordinateError,
    },
    #[error("invalid planner configuration: {0}")]
    Config(String),
}
