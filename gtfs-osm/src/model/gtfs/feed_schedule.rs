use super::{GtfsRoute, GtfsStop, GtfsTrip};
use crate::model::schedule::{
    DuplicateStopPolicy, RouteElement, Schedule, ScheduleError, StopIdx, TripIdx,
};
use itertools::Itertools;
use std::cmp::Reverse;

/// schedule loaded from a GTFS feed.
pub type FeedSchedule = Schedule<GtfsStop, GtfsRoute, GtfsTrip>;

impl FeedSchedule {
    /// inserts a feed stop unless another stop sits at exactly the same
    /// coordinates, in which case the new stop's references are appended to
    /// that stop and its identifier resolves to it.
    pub fn add_stop_deduplicated(&mut self, stop: GtfsStop, policy: DuplicateStopPolicy) -> StopIdx {
        let existing = self
            .stops()
            .iter()
            .position(|s| {
                s.same_location(&stop)
                    && (policy == DuplicateStopPolicy::CoordinatesOnly || s.name == stop.name)
            })
            .map(StopIdx);
        let idx = match existing {
            None => return self.add_stop(stop),
            Some(idx) => idx,
        };
        let canonical = self.stop_mut(idx);
        if canonical.name != stop.name {
            log::warn!(
                "stop '{}' ({}) shares its location with stop '{}' ({}), keeping name '{}'",
                stop.id,
                stop.name,
                canonical.id,
                canonical.name,
                canonical.name
            );
        }
        for stop_ref in stop.ref_codes() {
            canonical.add_ref(stop_ref);
        }
        self.alias_stop(stop.id, idx);
        idx
    }

    /// attaches a trip to the route named by its `route_id`, inheriting the
    /// route's network and operator. returns None when the route was not
    /// loaded.
    pub fn attach_trip(&mut self, mut trip: GtfsTrip) -> Option<TripIdx> {
        let route_idx = self.route_idx(&trip.route_id)?;
        trip.inherit_from(self.route(route_idx));
        Some(self.add_trip(route_idx, trip))
    }

    /// places a stop in a trip. returns false when the trip was not loaded.
    pub fn add_stop_time(
        &mut self,
        trip_id: &str,
        sequence: u32,
        stop_id: &str,
    ) -> Result<bool, ScheduleError> {
        let trip_idx = match self.trip_idx(&trip_id.to_string()) {
            Some(idx) => idx,
            None => return Ok(false),
        };
        let stop_idx =
            self.stop_idx(&stop_id.to_string())
                .ok_or_else(|| ScheduleError::UnknownStop {
                    trip: trip_id.to_string(),
                    stop: stop_id.to_string(),
                })?;
        self.trip_mut(trip_idx).add_stop(sequence, stop_idx);
        Ok(true)
    }

    /// drops trips repeating an earlier trip of the same route with the same
    /// reference code and stop sequence. returns the number of trips dropped.
    pub fn remove_duplicated_trips(&mut self) -> usize {
        let mut dropped: Vec<TripIdx> = vec![];
        for (_, route) in self.routes() {
            let trips = route.trips();
            for (i, trip) in trips.iter().enumerate() {
                let current = self.trip(*trip);
                if trips[..i].iter().any(|prev| self.trip(*prev).is_similar(current)) {
                    dropped.push(*trip);
                }
            }
        }
        self.drop_trips(&dropped);
        if !dropped.is_empty() {
            log::info!("removed {} duplicated trips", dropped.len());
        }
        dropped.len()
    }

    /// keeps, per route and reference code, only the trip serving the most
    /// stops. on a tie the first trip wins. returns the number of trips dropped.
    pub fn remove_truncated_trips(&mut self) -> usize {
        let mut dropped: Vec<TripIdx> = vec![];
        for (_, route) in self.routes() {
            let by_ref = route
                .trips()
                .iter()
                .copied()
                .into_group_map_by(|t| self.trip(*t).headsign.clone());
            for trips in by_ref.into_values() {
                let longest = trips
                    .iter()
                    .min_by_key(|t| Reverse(self.trip(**t).stop_count()))
                    .copied();
                dropped.extend(trips.into_iter().filter(|t| Some(*t) != longest));
            }
        }
        self.drop_trips(&dropped);
        if !dropped.is_empty() {
            log::info!("removed {} truncated trips", dropped.len());
        }
        dropped.len()
    }
}
