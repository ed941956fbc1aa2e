use super::{osm_tags::tag_accessors, OsmElement, OsmId};
use crate::model::schedule::{RouteElement, TripIdx};
use serde::{Deserialize, Serialize};

/// a `type=route_master` relation grouping the trip relations of one line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmRoute {
    pub element: OsmElement,
    trips: Vec<TripIdx>,
}

impl OsmRoute {
    pub fn new(element: OsmElement) -> Self {
        Self {
            element,
            trips: vec![],
        }
    }

    tag_accessors! {
        name, set_name => "name";
        ref_tag, set_ref_tag => "ref";
        network_tag, set_network => "network";
        operator_tag, set_operator => "operator";
        relation_type, set_relation_type => "type";
        route_master, set_route_master => "route_master";
    }

    /// label used in log messages and prompts.
    pub fn label(&self) -> String {
        let id = self
            .element
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| String::from("new"));
        format!(
            "{} [ref={} network={} operator={} id={}]",
            self.name().unwrap_or("<unnamed>"),
            self.ref_tag().unwrap_or("<none>"),
            self.network_tag().unwrap_or("<none>"),
            self.operator_tag().unwrap_or("<none>"),
            id
        )
    }
}

impl RouteElement for OsmRoute {
    type Id = OsmId;

    fn id(&self) -> Option<&OsmId> {
        self.element.id.as_ref()
    }

    fn ref_code(&self) -> Option<&str> {
        self.ref_tag()
    }

    fn network(&self) -> Option<&str> {
        self.network_tag()
    }

    fn operator(&self) -> Option<&str> {
        self.operator_tag()
    }

    fn trips(&self) -> &[TripIdx] {
        &self.trips
    }

    fn push_trip(&mut self, trip: TripIdx) {
        self.trips.push(trip);
    }

    fn retain_trips(&mut self, keep: &dyn Fn(&TripIdx) -> bool) {
        self.trips.retain(|t| keep(t));
    }
}
