//! trip-planner core
//!
//! Groups deliveries from a single depot into capacity-bounded trips and
//! orders each trip's stops, then shuffles stops between trips to shorten
//! total fleet distance.

pub mod cluster;
pub mod coordinate;
pub mod error;
pub mod haversine;
pub mod improver;
pub mod route;
pub mod schedule;
pub mod solver;
pub mod traits;
pub mod tsp;

pub use coordinate::Coordinate;
pub use error::{CoordinateError, PlanError};
pub use solver::{plan, PlanOptions, PlanResult, Trip};
pub use traits::Delivery;
