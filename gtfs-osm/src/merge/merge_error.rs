use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("stop ref '{0}' is missing in OSM")]
    RefMissingInOsm(String),
    #[error("stop ref '{stop_ref}' belongs to a GTFS stop aggregating refs [{refs}], it cannot be created on its own")]
    AmbiguousStopSplit { stop_ref: String, refs: String },
    #[error("route '{route}' has OSM trips not found in GTFS: [{trips}]")]
    UnreconciledTrips { route: String, trips: String },
    #[error("trip '{0}' has no stops")]
    EmptyStopSequence(String),
    #[error("GTFS stop '{0}' has no ref")]
    FeedStopWithoutRef(String),
    #[error("OSM trip '{trip}' could not be read: {reason}")]
    MapTripImportError { trip: String, reason: String },
    #[error("trip '{0}' still misses stops after creating one per stop")]
    StopCreationExhausted(String),
}
