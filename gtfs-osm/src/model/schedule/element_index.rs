use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// position of a stop in the stop collection of a [`super::Schedule`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
pub struct StopIdx(pub usize);

/// position of a route in the route collection of a [`super::Schedule`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
pub struct RouteIdx(pub usize);

/// position of a trip in the trip collection of a [`super::Schedule`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash)]
pub struct TripIdx(pub usize);

impl Display for StopIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stop#{}", self.0)
    }
}

impl Display for RouteIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "route#{}", self.0)
    }
}

impl Display for TripIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trip#{}", self.0)
    }
}
