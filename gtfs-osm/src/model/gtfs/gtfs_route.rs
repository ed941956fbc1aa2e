use crate::model::schedule::{RouteElement, TripIdx};
use serde::{Deserialize, Serialize};

/// a route read from the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtfsRoute {
    pub id: String,
    /// public route code, such as the short name printed on buses
    pub ref_code: String,
    pub long_name: String,
    /// display name written to the map, formatted by the agency profile
    pub name: String,
    pub network: Option<String>,
    pub operator: Option<String>,
    trips: Vec<TripIdx>,
}

impl GtfsRoute {
    pub fn new(
        id: &str,
        ref_code: &str,
        long_name: &str,
        name: &str,
        network: Option<&str>,
        operator: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            ref_code: ref_code.to_string(),
            long_name: long_name.to_string(),
            name: name.to_string(),
            network: network.map(String::from),
            operator: operator.map(String::from),
            trips: vec![],
        }
    }
}

impl RouteElement for GtfsRoute {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.id)
    }

    fn ref_code(&self) -> Option<&str> {
        Some(&self.ref_code)
    }

    fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
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
