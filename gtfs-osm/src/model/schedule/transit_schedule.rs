use super::{
    BoundingBox, RouteElement, RouteIdx, ScheduleError, StopElement, StopIdx, TripElement,
    TripIdx,
};
use crate::validation::Issue;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// indexed collection of the stops, routes and trips of one source.
///
/// the schedule owns every element. routes refer to their trips and trips to
/// their stops by index into this schedule. lookup by identifier is constant
/// time, lookup by reference code is a linear scan since reference sets are
/// small and change during a merge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "S: Serialize, S::Id: Serialize, R: Serialize, R::Id: Serialize, T: Serialize, T::Id: Serialize",
    deserialize = "S: Deserialize<'de>, S::Id: Deserialize<'de>, R: Deserialize<'de>, R::Id: Deserialize<'de>, T: Deserialize<'de>, T::Id: Deserialize<'de>"
))]
pub struct Schedule<S, R, T>
where
    S: StopElement,
    R: RouteElement,
    T: TripElement,
{
    stops: Vec<S>,
    stops_by_id: HashMap<S::Id, StopIdx>,
    routes: Vec<R>,
    routes_by_id: HashMap<R::Id, RouteIdx>,
    trips: Vec<T>,
    trips_by_id: HashMap<T::Id, TripIdx>,
    shapes: HashMap<String, Vec<TripIdx>>,
    /// data problems found while loading this schedule
    pub issues: Vec<Issue>,
}

impl<S, R, T> Default for Schedule<S, R, T>
where
    S: StopElement,
    R: RouteElement,
    T: TripElement,
{
    fn default() -> Self {
        Self {
            stops: vec![],
            stops_by_id: HashMap::new(),
            routes: vec![],
            routes_by_id: HashMap::new(),
            trips: vec![],
            trips_by_id: HashMap::new(),
            shapes: HashMap::new(),
            issues: vec![],
        }
    }
}

impl<S, R, T> Schedule<S, R, T>
where
    S: StopElement,
    R: RouteElement,
    T: TripElement,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stop(&mut self, stop: S) -> StopIdx {
        let idx = StopIdx(self.stops.len());
        if let Some(id) = stop.id() {
            self.stops_by_id.insert(id.clone(), idx);
        }
        self.stops.push(stop);
        idx
    }

    /// registers an additional identifier for an existing stop.
    pub(crate) fn alias_stop(&mut self, id: S::Id, idx: StopIdx) {
        self.stops_by_id.insert(id, idx);
    }

    pub fn add_route(&mut self, route: R) -> RouteIdx {
        let idx = RouteIdx(self.routes.len());
        if let Some(id) = route.id() {
            self.routes_by_id.insert(id.clone(), idx);
        }
        self.routes.push(route);
        idx
    }

    /// attaches a trip to a route of this schedule, appending it to the
    /// route's trip list.
    pub fn add_trip(&mut self, route: RouteIdx, mut trip: T) -> TripIdx {
        let idx = TripIdx(self.trips.len());
        trip.set_route(route);
        if let Some(id) = trip.id() {
            self.trips_by_id.insert(id.clone(), idx);
        }
        if let Some(shape_id) = trip.shape_id() {
            self.shapes
                .entry(shape_id.to_string())
                .or_default()
                .push(idx);
        }
        self.trips.push(trip);
        self.routes[route.0].push_trip(idx);
        idx
    }

    pub fn get_stop(&self, id: &S::Id) -> Option<&S> {
        self.stop_idx(id).map(|idx| self.stop(idx))
    }

    pub fn get_route(&self, id: &R::Id) -> Option<&R> {
        self.route_idx(id).map(|idx| self.route(idx))
    }

    pub fn get_trip(&self, id: &T::Id) -> Option<&T> {
        self.trip_idx(id).map(|idx| self.trip(idx))
    }

    pub fn stop_idx(&self, id: &S::Id) -> Option<StopIdx> {
        self.stops_by_id.get(id).copied()
    }

    pub fn route_idx(&self, id: &R::Id) -> Option<RouteIdx> {
        self.routes_by_id.get(id).copied()
    }

    pub fn trip_idx(&self, id: &T::Id) -> Option<TripIdx> {
        self.trips_by_id.get(id).copied()
    }

    /// first stop whose reference set contains `stop_ref`.
    pub fn get_stop_by_ref(&self, stop_ref: &str) -> Option<&S> {
        self.stop_idx_by_ref(stop_ref).map(|idx| self.stop(idx))
    }

    pub fn stop_idx_by_ref(&self, stop_ref: &str) -> Option<StopIdx> {
        self.stops
            .iter()
            .position(|s| s.has_ref(stop_ref))
            .map(StopIdx)
    }

    /// trip of a route with the given reference code.
    pub fn route_trip_by_ref(&self, route: RouteIdx, trip_ref: &str) -> Option<TripIdx> {
        self.route(route)
            .trips()
            .iter()
            .find(|t| self.trip(**t).ref_code() == Some(trip_ref))
            .copied()
    }

    pub fn stop(&self, idx: StopIdx) -> &S {
        &self.stops[idx.0]
    }

    pub fn stop_mut(&mut self, idx: StopIdx) -> &mut S {
        &mut self.stops[idx.0]
    }

    pub fn route(&self, idx: RouteIdx) -> &R {
        &self.routes[idx.0]
    }

    pub fn route_mut(&mut self, idx: RouteIdx) -> &mut R {
        &mut self.routes[idx.0]
    }

    pub fn trip(&self, idx: TripIdx) -> &T {
        &self.trips[idx.0]
    }

    pub fn trip_mut(&mut self, idx: TripIdx) -> &mut T {
        &mut self.trips[idx.0]
    }

    pub fn stops(&self) -> &[S] {
        &self.stops
    }

    pub fn stop_indices(&self) -> impl Iterator<Item = StopIdx> {
        (0..self.stops.len()).map(StopIdx)
    }

    pub fn routes(&self) -> impl Iterator<Item = (RouteIdx, &R)> {
        self.routes.iter().enumerate().map(|(i, r)| (RouteIdx(i), r))
    }

    /// trips reachable from a route, in route order.
    pub fn trips(&self) -> impl Iterator<Item = (TripIdx, &T)> {
        self.routes
            .iter()
            .flat_map(|r| r.trips().iter())
            .map(|t| (*t, self.trip(*t)))
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// detaches trips from their routes and from the identifier index.
    pub fn drop_trips(&mut self, dropped: &[TripIdx]) {
        if dropped.is_empty() {
            return;
        }
        let dropped: HashSet<TripIdx> = dropped.iter().copied().collect();
        for route in self.routes.iter_mut() {
            route.retain_trips(&|t| !dropped.contains(t));
        }
        self.trips_by_id.retain(|_, t| !dropped.contains(t));
        for trips in self.shapes.values_mut() {
            trips.retain(|t| !dropped.contains(t));
        }
    }

    /// adds a point to the geometry of every trip following this shape.
    pub fn add_shape_point(&mut self, shape_id: &str, lat: f64, lon: f64, sequence: u32) {
        if let Some(trips) = self.shapes.get(shape_id) {
            for t in trips.iter() {
                self.trips[t.0].add_shape_point(sequence, lat, lon);
            }
        }
    }

    /// extent of all stops, grown by `margin_meters` when given.
    pub fn bounding_box(&self, margin_meters: Option<f64>) -> Result<BoundingBox, ScheduleError> {
        let bbox = BoundingBox::from_coordinates(self.stops.iter().map(|s| (s.lat(), s.lon())))
            .ok_or(ScheduleError::EmptySchedule)?;
        match margin_meters {
            Some(margin) => Ok(bbox.with_margin(margin)),
            None => Ok(bbox),
        }
    }
}
