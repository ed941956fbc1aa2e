use super::{OsmRoute, OsmStop, OsmTrip};
use crate::model::schedule::{RouteElement, RouteIdx, Schedule};

/// schedule loaded from the map dataset.
pub type OsmSchedule = Schedule<OsmStop, OsmRoute, OsmTrip>;

impl OsmSchedule {
    /// a route needs to be written when its own tags changed, when it is new,
    /// or when any of its trips changed. evaluated on demand since trips can
    /// be replaced after the route tags were merged.
    pub fn route_is_modified(&self, route: RouteIdx) -> bool {
        let r = self.route(route);
        r.element.needs_upload()
            || r
                .trips()
                .iter()
                .any(|t| self.trip(*t).element.needs_upload())
    }
}
