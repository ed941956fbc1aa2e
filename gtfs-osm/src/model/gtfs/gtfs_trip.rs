use super::{GtfsRoute, TripShape};
use crate::model::schedule::{RouteIdx, StopIdx, TripElement};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// a trip read from the feed. its headsign is the reference code used to
/// find the matching trip relation within a map route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtfsTrip {
    pub id: String,
    pub route_id: String,
    pub headsign: String,
    pub network: Option<String>,
    pub operator: Option<String>,
    /// explicit terminal names, when the feed provides them
    pub from_stop: Option<String>,
    pub to_stop: Option<String>,
    pub shape_id: Option<String>,
    route: Option<RouteIdx>,
    stops: BTreeMap<u32, StopIdx>,
    shape: TripShape,
}

impl GtfsTrip {
    pub fn new(id: &str, route_id: &str, headsign: &str, shape_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            route_id: route_id.to_string(),
            headsign: headsign.to_string(),
            network: None,
            operator: None,
            from_stop: None,
            to_stop: None,
            shape_id: shape_id.map(String::from),
            route: None,
            stops: BTreeMap::new(),
            shape: TripShape::default(),
        }
    }

    /// copies network and operator from the route where this trip has none.
    pub fn inherit_from(&mut self, route: &GtfsRoute) {
        if self.network.is_none() {
            self.network = route.network.clone();
        }
        if self.operator.is_none() {
            self.operator = route.operator.clone();
        }
    }

    pub fn add_stop(&mut self, sequence: u32, stop: StopIdx) {
        self.stops.insert(sequence, stop);
    }

    /// stops in sequence order.
    pub fn stops(&self) -> Vec<StopIdx> {
        self.stops.values().copied().collect()
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn shape(&self) -> &TripShape {
        &self.shape
    }

    /// same route, same reference code and the same stops in the same order.
    pub fn is_similar(&self, other: &GtfsTrip) -> bool {
        self.route == other.route
            && self.headsign == other.headsign
            && self.stops.values().eq(other.stops.values())
    }

    /// name given to a map trip created from this one.
    pub fn display_name(&self, route: &GtfsRoute) -> String {
        format!("{} ({})", route.name, self.headsign)
    }
}

impl TripElement for GtfsTrip {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.id)
    }

    fn ref_code(&self) -> Option<&str> {
        Some(&self.headsign)
    }

    fn route(&self) -> Option<RouteIdx> {
        self.route
    }

    fn set_route(&mut self, route: RouteIdx) {
        self.route = Some(route);
    }

    fn shape_id(&self) -> Option<&str> {
        self.shape_id.as_deref()
    }

    fn add_shape_point(&mut self, sequence: u32, lat: f64, lon: f64) {
        self.shape.add_point(sequence, lat, lon);
    }
}
