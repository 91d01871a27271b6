//! Core domain traits for the trip planner.
//!
//! These are intentionally minimal. Concrete apps should implement them for
//! their own order/customer models.

use std::hash::Hash;

use crate::coordinate::Coordinate;

/// Unique identifier for planner entities.
pub trait Id: Clone + Eq + Hash {}

impl<T> Id for T where T: Clone + Eq + Hash {}

/// A delivery is a single stop to be visited exactly once.
pub trait Delivery {
    type Id: Id;

    fn id(&self) -> &Self::Id;

    /// Drop-off location. Must stay constant for the whole planning run.
    fn location(&self) -> Coordinate;
}

/// A capacity-bounded group of deliveries served by one trip.
pub type Cluster<'a, D> = Vec<&'a D>;
