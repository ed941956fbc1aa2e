use crate::model::schedule::TripIdx;

/// what a route merge changed in the map schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// route tags written with a new value
    pub route_changed: bool,
    /// existing trips whose tags or stops changed
    pub updated_trips: Vec<TripIdx>,
    /// trips created from the feed
    pub created_trips: Vec<TripIdx>,
}

impl MergeOutcome {
    /// true when this pass changed anything.
    pub fn changed(&self) -> bool {
        self.route_changed || !self.updated_trips.is_empty() || !self.created_trips.is_empty()
    }
}
