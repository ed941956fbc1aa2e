use super::{osm_tags::tag_accessors, OsmElement, OsmId};
use crate::model::schedule::{RouteIdx, StopIdx, TripElement};
use serde::{Deserialize, Serialize};

/// default role of a platform member in a route relation
pub const PLATFORM_ROLE: &str = "platform";

/// node where the vehicle halts for a platform, with its member role
/// (`stop`, `stop_entry_only`, `stop_exit_only`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StopPosition {
    pub node: OsmId,
    pub role: String,
}

/// one served stop of a trip relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripStop {
    pub stop: StopIdx,
    pub role: String,
    pub stop_position: Option<StopPosition>,
}

impl TripStop {
    pub fn platform(stop: StopIdx) -> Self {
        Self {
            stop,
            role: PLATFORM_ROLE.to_string(),
            stop_position: None,
        }
    }
}

/// way member of a trip relation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TripWay {
    /// a way of the map dataset, referenced by id
    Existing(OsmId),
    /// geometry drawn from a feed shape as (lat, lon) points, to be created
    Drawn(Vec<(f64, f64)>),
}

/// a `type=route` relation: one variant of a bus line, ordered stops
/// followed by the ways it travels on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmTrip {
    pub element: OsmElement,
    route: Option<RouteIdx>,
    stops: Vec<TripStop>,
    ways: Vec<TripWay>,
    import_error: Option<String>,
}

impl OsmTrip {
    pub fn new(element: OsmElement) -> Self {
        Self {
            element,
            route: None,
            stops: vec![],
            ways: vec![],
            import_error: None,
        }
    }

    tag_accessors! {
        ref_tag, set_ref_tag => "ref";
        name, set_name => "name";
        network, set_network => "network";
        operator, set_operator => "operator";
        from, set_from => "from";
        to, set_to => "to";
        relation_type, set_relation_type => "type";
        route_tag, set_route_tag => "route";
    }

    pub fn stops(&self) -> &[TripStop] {
        &self.stops
    }

    pub fn stop_sequence(&self) -> Vec<StopIdx> {
        self.stops.iter().map(|s| s.stop).collect()
    }

    pub fn ways(&self) -> &[TripWay] {
        &self.ways
    }

    pub fn push_stop(&mut self, stop: TripStop) {
        self.stops.push(stop);
    }

    pub fn push_way(&mut self, way: TripWay) {
        self.ways.push(way);
    }

    /// replaces the stop sequence if it differs from the current one,
    /// raising the modified flag. stops present in both sequences keep their
    /// role and stop position. returns true if the sequence was replaced.
    pub fn replace_stops(&mut self, sequence: &[StopIdx]) -> bool {
        if self.stop_sequence() == sequence {
            return false;
        }
        let replaced = sequence
            .iter()
            .map(|idx| {
                self.stops
                    .iter()
                    .find(|s| s.stop == *idx)
                    .cloned()
                    .unwrap_or_else(|| TripStop::platform(*idx))
            })
            .collect();
        self.stops = replaced;
        self.element.mark_modified();
        true
    }

    pub fn import_error(&self) -> Option<&str> {
        self.import_error.as_deref()
    }

    /// records why the relation could not be interpreted. members after the
    /// failing one are not loaded.
    pub fn set_import_error(&mut self, reason: String) {
        self.import_error = Some(reason);
    }

    /// label used in log messages: the reference code, else the identifier.
    pub fn label(&self) -> String {
        match (self.ref_tag(), self.element.id) {
            (Some(r), _) => r.to_string(),
            (None, Some(id)) => format!("relation {id}"),
            (None, None) => String::from("<new trip>"),
        }
    }
}

impl TripElement for OsmTrip {
    type Id = OsmId;

    fn id(&self) -> Option<&OsmId> {
        self.element.id.as_ref()
    }

    fn ref_code(&self) -> Option<&str> {
        self.ref_tag()
    }

    fn route(&self) -> Option<RouteIdx> {
        self.route
    }

    fn set_route(&mut self, route: RouteIdx) {
        self.route = Some(route);
    }
}
