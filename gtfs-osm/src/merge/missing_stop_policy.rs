use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates alternative ways to handle a trip
/// serving a stop ref that is not in OSM
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MissingStopPolicy {
    /// fail the trip, and with it the route
    #[default]
    Fail,
    /// create the stop in OSM from the GTFS stop, when it carries a single ref
    CreateFromFeed,
}
