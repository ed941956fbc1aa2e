use super::{RouteIdx, RouteKey, TripIdx};
use geo::Point;
use std::{fmt::Debug, fmt::Display, hash::Hash};

/// a stop stored in a [`super::Schedule`], either from the feed or from the map.
pub trait StopElement {
    type Id: Clone + Debug + Display + Eq + Hash;

    /// identifier of this stop. map stops created during a merge have none.
    fn id(&self) -> Option<&Self::Id>;
    fn lat(&self) -> f64;
    fn lon(&self) -> f64;
    fn name(&self) -> Option<&str>;
    /// external reference codes carried by this stop.
    fn refs(&self) -> Vec<&str>;

    fn has_ref(&self, stop_ref: &str) -> bool {
        self.refs().contains(&stop_ref)
    }

    fn point(&self) -> Point<f64> {
        Point::new(self.lon(), self.lat())
    }
}

/// a route stored in a [`super::Schedule`].
pub trait RouteElement {
    type Id: Clone + Debug + Display + Eq + Hash;

    fn id(&self) -> Option<&Self::Id>;
    fn ref_code(&self) -> Option<&str>;
    fn network(&self) -> Option<&str>;
    fn operator(&self) -> Option<&str>;
    /// trips of this route, in order.
    fn trips(&self) -> &[TripIdx];
    fn push_trip(&mut self, trip: TripIdx);
    fn retain_trips(&mut self, keep: &dyn Fn(&TripIdx) -> bool);

    fn route_key(&self) -> RouteKey {
        RouteKey::new(self.ref_code(), self.network(), self.operator())
    }
}

/// a trip stored in a [`super::Schedule`].
pub trait TripElement {
    type Id: Clone + Debug + Display + Eq + Hash;

    fn id(&self) -> Option<&Self::Id>;
    /// reference code, unique within the parent route.
    fn ref_code(&self) -> Option<&str>;
    fn route(&self) -> Option<RouteIdx>;
    fn set_route(&mut self, route: RouteIdx);

    fn shape_id(&self) -> Option<&str> {
        None
    }

    fn add_shape_point(&mut self, _sequence: u32, _lat: f64, _lon: f64) {}
}
