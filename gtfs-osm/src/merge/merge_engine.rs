use super::{
    transit_tags::{ROUTE_MASTER_TAGS, ROUTE_TAGS},
    MergeError, MergeOutcome, MissingStopPolicy,
};
use crate::model::{
    gtfs::{FeedSchedule, GtfsRoute, GtfsTrip},
    osm::{OsmElement, OsmRoute, OsmSchedule, OsmStop, OsmTrip, TripWay},
    schedule::{RouteElement, RouteIdx, StopIdx, TripElement, TripIdx},
};
use itertools::Itertools;
use std::collections::HashSet;

/// creates and updates map stops, trips and routes from their feed
/// counterparts.
///
/// all writes to map tags go through the element tag setter, so the
/// modified flags of the map schedule reflect exactly what changed. map
/// state the feed does not describe (identifiers, other tags, stop
/// positions, ways) is preserved.
pub struct MergeEngine<'a> {
    feed: &'a FeedSchedule,
    map: &'a mut OsmSchedule,
    missing_stop_policy: MissingStopPolicy,
    include_shapes: bool,
}

impl<'a> MergeEngine<'a> {
    pub fn new(
        feed: &'a FeedSchedule,
        map: &'a mut OsmSchedule,
        missing_stop_policy: MissingStopPolicy,
    ) -> Self {
        Self {
            feed,
            map,
            missing_stop_policy,
            include_shapes: false,
        }
    }

    /// draw the feed shape as the geometry of created trips.
    pub fn with_shapes(mut self, include_shapes: bool) -> Self {
        self.include_shapes = include_shapes;
        self
    }

    pub fn map(&self) -> &OsmSchedule {
        &*self.map
    }

    /// adds a map platform built from a feed stop.
    pub fn create_stop(&mut self, feed_stop: StopIdx) -> StopIdx {
        let stop = OsmStop::from_feed(self.feed.stop(feed_stop));
        self.map.add_stop(stop)
    }

    /// updates a map trip from a feed trip. returns true if anything changed.
    pub fn merge_trip(&mut self, map_trip: TripIdx, feed_trip: TripIdx) -> Result<bool, MergeError> {
        self.check_readable(map_trip)?;
        let stops = self.resolve_stops(feed_trip)?;
        Ok(self.write_trip(map_trip, feed_trip, &stops))
    }

    /// adds a new trip to a map route, built from a feed trip.
    pub fn create_trip(
        &mut self,
        map_route: RouteIdx,
        feed_trip: TripIdx,
    ) -> Result<TripIdx, MergeError> {
        let stops = self.resolve_stops(feed_trip)?;
        Ok(self.add_trip(map_route, feed_trip, &stops))
    }

    /// updates a map route and its trips from a feed route.
    ///
    /// the stops of every trip are resolved before the route is touched, so
    /// a trip with an unresolvable stop leaves the route as it was. once all
    /// feed trips are merged, map trips that no feed trip matched are
    /// reported as [`MergeError::UnreconciledTrips`]; the merge itself is
    /// kept.
    pub fn merge_route(
        &mut self,
        map_route: RouteIdx,
        feed_route: RouteIdx,
    ) -> Result<MergeOutcome, MergeError> {
        let feed = self.feed;
        let route = feed.route(feed_route);
        let mut plan = Vec::with_capacity(route.trips().len());
        for feed_trip in route.trips() {
            let existing = self
                .map
                .route_trip_by_ref(map_route, &feed.trip(*feed_trip).headsign);
            if let Some(map_trip) = existing {
                self.check_readable(map_trip)?;
            }
            let stops = self.resolve_stops(*feed_trip)?;
            plan.push((*feed_trip, existing, stops));
        }

        let mut outcome = MergeOutcome {
            route_changed: write_route_tags(self.map.route_mut(map_route), route),
            ..Default::default()
        };
        let mut touched = HashSet::new();
        for (feed_trip, existing, stops) in plan {
            match existing {
                Some(map_trip) => {
                    if self.write_trip(map_trip, feed_trip, &stops) {
                        outcome.updated_trips.push(map_trip);
                    }
                    touched.insert(map_trip);
                }
                None => {
                    let map_trip = self.add_trip(map_route, feed_trip, &stops);
                    outcome.created_trips.push(map_trip);
                    touched.insert(map_trip);
                }
            }
        }

        let unreconciled = self
            .map
            .route(map_route)
            .trips()
            .iter()
            .filter(|t| !touched.contains(*t))
            .map(|t| self.map.trip(*t).label())
            .collect_vec();
        if !unreconciled.is_empty() {
            return Err(MergeError::UnreconciledTrips {
                route: route.ref_code.clone(),
                trips: unreconciled.join(", "),
            });
        }
        Ok(outcome)
    }

    /// adds a new map route with one trip per feed trip. nothing is added
    /// unless every trip can be built.
    pub fn create_route(&mut self, feed_route: RouteIdx) -> Result<RouteIdx, MergeError> {
        let feed = self.feed;
        let route = feed.route(feed_route);
        let mut plan = Vec::with_capacity(route.trips().len());
        for feed_trip in route.trips() {
            plan.push((*feed_trip, self.resolve_stops(*feed_trip)?));
        }
        let mut map_route = OsmRoute::new(OsmElement::created());
        write_route_tags(&mut map_route, route);
        let idx = self.map.add_route(map_route);
        for (feed_trip, stops) in plan {
            self.add_trip(idx, feed_trip, &stops);
        }
        Ok(idx)
    }

    fn check_readable(&self, map_trip: TripIdx) -> Result<(), MergeError> {
        let trip = self.map.trip(map_trip);
        match trip.import_error() {
            None => Ok(()),
            Some(reason) => Err(MergeError::MapTripImportError {
                trip: trip.label(),
                reason: reason.to_string(),
            }),
        }
    }

    /// map stops serving a feed trip, in order. with
    /// [`MissingStopPolicy::CreateFromFeed`] each missing ref is created and
    /// the lookup retried, so the loop runs at most once per stop.
    fn resolve_stops(&mut self, feed_trip: TripIdx) -> Result<Vec<StopIdx>, MergeError> {
        let feed = self.feed;
        let trip = feed.trip(feed_trip);
        if trip.stop_count() == 0 {
            return Err(MergeError::EmptyStopSequence(trip.headsign.clone()));
        }
        for _ in 0..=trip.stop_count() {
            match self.lookup_stops(trip) {
                Err(MergeError::RefMissingInOsm(stop_ref))
                    if self.missing_stop_policy == MissingStopPolicy::CreateFromFeed =>
                {
                    self.create_stop_for_ref(&stop_ref)?;
                }
                resolved => return resolved,
            }
        }
        Err(MergeError::StopCreationExhausted(trip.headsign.clone()))
    }

    fn lookup_stops(&self, trip: &GtfsTrip) -> Result<Vec<StopIdx>, MergeError> {
        trip.stops()
            .into_iter()
            .map(|s| {
                let feed_stop = self.feed.stop(s);
                let refs = feed_stop.ref_codes();
                let first = refs
                    .first()
                    .ok_or_else(|| MergeError::FeedStopWithoutRef(feed_stop.id.clone()))?;
                refs.iter()
                    .find_map(|r| self.map.stop_idx_by_ref(r))
                    .ok_or_else(|| MergeError::RefMissingInOsm(first.clone()))
            })
            .collect()
    }

    fn create_stop_for_ref(&mut self, stop_ref: &str) -> Result<StopIdx, MergeError> {
        let feed = self.feed;
        let feed_stop_idx = feed
            .stop_idx_by_ref(stop_ref)
            .ok_or_else(|| MergeError::RefMissingInOsm(stop_ref.to_string()))?;
        let feed_stop = feed.stop(feed_stop_idx);
        if feed_stop.ref_codes().len() != 1 {
            return Err(MergeError::AmbiguousStopSplit {
                stop_ref: stop_ref.to_string(),
                refs: feed_stop.ref_codes().join(", "),
            });
        }
        log::info!("creating OSM stop for ref {stop_ref} ({})", feed_stop.name);
        Ok(self.create_stop(feed_stop_idx))
    }

    /// terminal names: explicit feed names, else the names of the first and
    /// last stop.
    fn terminals(&self, trip: &GtfsTrip, stops: &[StopIdx]) -> (Option<String>, Option<String>) {
        let stop_name = |s: Option<&StopIdx>| {
            s.and_then(|s| self.map.stop(*s).name().map(String::from))
        };
        let from = trip.from_stop.clone().or_else(|| stop_name(stops.first()));
        let to = trip.to_stop.clone().or_else(|| stop_name(stops.last()));
        (from, to)
    }

    fn write_trip(&mut self, map_trip: TripIdx, feed_trip: TripIdx, stops: &[StopIdx]) -> bool {
        let feed = self.feed;
        let source = feed.trip(feed_trip);
        let (from, to) = self.terminals(source, stops);
        let trip = self.map.trip_mut(map_trip);
        let mut changed = trip.set_ref_tag(&source.headsign);
        if let Some(network) = &source.network {
            changed |= trip.set_network(network);
        }
        if let Some(operator) = &source.operator {
            changed |= trip.set_operator(operator);
        }
        for (key, value) in ROUTE_TAGS {
            changed |= trip.element.set_tag(key, value);
        }
        changed |= trip.replace_stops(stops);
        if let Some(from) = from {
            changed |= trip.set_from(&from);
        }
        if let Some(to) = to {
            changed |= trip.set_to(&to);
        }
        changed
    }

    fn add_trip(&mut self, map_route: RouteIdx, feed_trip: TripIdx, stops: &[StopIdx]) -> TripIdx {
        let feed = self.feed;
        let source = feed.trip(feed_trip);
        let mut trip = OsmTrip::new(OsmElement::created());
        if let Some(route) = source.route() {
            trip.set_name(&source.display_name(feed.route(route)));
        }
        if self.include_shapes && !source.shape().is_empty() {
            trip.push_way(TripWay::Drawn(source.shape().points()));
        }
        let idx = self.map.add_trip(map_route, trip);
        self.write_trip(idx, feed_trip, stops);
        idx
    }
}

fn write_route_tags(route: &mut OsmRoute, source: &GtfsRoute) -> bool {
    let mut changed = route.set_name(&source.name);
    changed |= route.set_ref_tag(&source.ref_code);
    if let Some(network) = &source.network {
        changed |= route.set_network(network);
    }
    if let Some(operator) = &source.operator {
        changed |= route.set_operator(operator);
    }
    for (key, value) in ROUTE_MASTER_TAGS {
        changed |= route.element.set_tag(key, value);
    }
    changed
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{
        gtfs::{GtfsRoute, GtfsStop},
        osm::{OsmAttributes, OsmId, OsmTags, TripStop},
        schedule::StopElement,
    };

    const ROUTE: RouteIdx = RouteIdx(0);

    /// feed route 12 (network N, operator X) with one trip over S1, S2, S3.
    fn feed(extra_stops: &[&str]) -> FeedSchedule {
        let mut feed = FeedSchedule::new();
        let all = ["S1", "S2", "S3"].iter().chain(extra_stops.iter());
        for (i, stop_ref) in all.clone().enumerate() {
            feed.add_stop(GtfsStop::new(
                &stop_ref.to_lowercase(),
                45.0 + i as f64 * 0.01,
                -73.0,
                &format!("Stop {stop_ref}"),
                stop_ref,
            ));
        }
        feed.add_route(GtfsRoute::new(
            "r12",
            "12",
            "Saint-Laurent",
            "Bus 12 : Saint-Laurent",
            Some("N"),
            Some("X"),
        ));
        feed.attach_trip(GtfsTrip::new("t1", "r12", "12-N", None))
            .expect("route r12 should be loaded");
        for (seq, stop_ref) in all.enumerate() {
            let _ = feed.add_stop_time("t1", seq as u32, &stop_ref.to_lowercase());
        }
        feed
    }

    fn map_stop(map: &mut OsmSchedule, id: i64, stop_ref: &str) -> StopIdx {
        map.add_stop(OsmStop::new(
            OsmElement::existing(
                OsmId(id),
                OsmTags::from_iter([
                    ("name", format!("Stop {stop_ref}")),
                    ("ref", stop_ref.to_string()),
                    ("highway", "bus_stop".to_string()),
                    ("bus", "yes".to_string()),
                    ("public_transport", "platform".to_string()),
                ]),
                OsmAttributes::default(),
            ),
            45.0,
            -73.0,
        ))
    }

    /// map route 12 whose single trip 12-N is missing S3.
    fn map() -> OsmSchedule {
        let mut map = OsmSchedule::new();
        let s1 = map_stop(&mut map, 101, "S1");
        let s2 = map_stop(&mut map, 102, "S2");
        map_stop(&mut map, 103, "S3");
        let route = map.add_route(OsmRoute::new(OsmElement::existing(
            OsmId(1000),
            OsmTags::from_iter([
                ("name", "Bus 12 : Saint-Laurent"),
                ("ref", "12"),
                ("network", "N"),
                ("operator", "X"),
                ("type", "route_master"),
                ("route_master", "bus"),
            ]),
            OsmAttributes::default(),
        )));
        let mut trip = OsmTrip::new(OsmElement::existing(
            OsmId(2000),
            OsmTags::from_iter([
                ("ref", "12-N"),
                ("network", "N"),
                ("operator", "X"),
                ("type", "route"),
                ("route", "bus"),
                ("from", "Stop S1"),
                ("to", "Stop S2"),
                ("public_transport:version", "2"),
            ]),
            OsmAttributes::default(),
        ));
        trip.push_stop(TripStop::platform(s1));
        trip.push_stop(TripStop::platform(s2));
        trip.push_way(TripWay::Existing(OsmId(5000)));
        map.add_trip(route, trip);
        map
    }

    #[test]
    fn test_missing_stop_replaces_sequence() {
        let feed = feed(&[]);
        let mut map = map();
        let outcome = {
            let mut engine = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail);
            match engine.merge_route(ROUTE, ROUTE) {
                Ok(outcome) => outcome,
                Err(e) => panic!("{e}"),
            }
        };
        let trip_idx = TripIdx(0);
        assert!(!outcome.route_changed, "route tags were already in sync");
        assert_eq!(outcome.updated_trips, vec![trip_idx]);
        let trip = map.trip(trip_idx);
        assert!(trip.element.is_modified());
        assert_eq!(trip.stop_sequence(), vec![StopIdx(0), StopIdx(1), StopIdx(2)]);
        assert_eq!(trip.to(), Some("Stop S3"));
        assert_eq!(trip.ways(), &[TripWay::Existing(OsmId(5000))]);
        assert_eq!(trip.element.tags.get("public_transport:version"), Some("2"));
        assert!(map.route_is_modified(ROUTE));
        assert!(!map.route(ROUTE).element.is_modified());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let feed = feed(&[]);
        let mut map = map();
        let mut engine = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail);
        let first = match engine.merge_route(ROUTE, ROUTE) {
            Ok(outcome) => outcome,
            Err(e) => panic!("{e}"),
        };
        assert!(first.changed());
        let snapshot = engine.map().clone();
        let second = match engine.merge_route(ROUTE, ROUTE) {
            Ok(outcome) => outcome,
            Err(e) => panic!("{e}"),
        };
        assert!(!second.changed(), "second merge should not change anything");
        assert_eq!(engine.map().route(ROUTE), snapshot.route(ROUTE));
        assert_eq!(engine.map().trip(TripIdx(0)), snapshot.trip(TripIdx(0)));
    }

    #[test]
    fn test_ref_missing_in_osm() {
        let feed = feed(&["S9"]);
        let mut map = map();
        let before = map.clone();
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).merge_route(ROUTE, ROUTE);
        match result {
            Err(MergeError::RefMissingInOsm(stop_ref)) => assert_eq!(stop_ref, "S9"),
            other => panic!("expected missing ref S9, found {other:?}"),
        }
        assert!(!map.route_is_modified(ROUTE), "failed route must be left untouched");
        assert_eq!(map.trip(TripIdx(0)), before.trip(TripIdx(0)));
    }

    #[test]
    fn test_create_missing_stop() {
        let feed = feed(&["S9"]);
        let mut map = map();
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::CreateFromFeed)
            .merge_route(ROUTE, ROUTE);
        if let Err(e) = result {
            panic!("{e}")
        }
        let created = map
            .stop_idx_by_ref("S9")
            .expect("stop S9 should have been created");
        assert!(map.stop(created).element.is_new());
        assert_eq!(map.stop(created).name(), Some("Stop S9"));
        assert_eq!(map.trip(TripIdx(0)).stop_sequence().last(), Some(&created));
        assert_eq!(map.trip(TripIdx(0)).to(), Some("Stop S9"));
    }

    #[test]
    fn test_ambiguous_stop_split() {
        let mut feed = feed(&["S9"]);
        let s9 = feed
            .stop_idx(&"s9".to_string())
            .expect("stop s9 should be loaded");
        feed.stop_mut(s9).add_ref("S10");
        let mut map = map();
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::CreateFromFeed)
            .merge_route(ROUTE, ROUTE);
        match result {
            Err(MergeError::AmbiguousStopSplit { stop_ref, refs }) => {
                assert_eq!(stop_ref, "S9");
                assert_eq!(refs, "S9, S10");
            }
            other => panic!("expected ambiguous split, found {other:?}"),
        }
        assert!(map.get_stop_by_ref("S9").is_none());
    }

    #[test]
    fn test_unreconciled_trips() {
        let feed = feed(&[]);
        let mut map = map();
        let s1 = StopIdx(0);
        let mut extra = OsmTrip::new(OsmElement::existing(
            OsmId(2001),
            OsmTags::from_iter([("ref", "12-S")]),
            OsmAttributes::default(),
        ));
        extra.push_stop(TripStop::platform(s1));
        map.add_trip(ROUTE, extra);
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).merge_route(ROUTE, ROUTE);
        match result {
            Err(MergeError::UnreconciledTrips { route, trips }) => {
                assert_eq!(route, "12");
                assert_eq!(trips, "12-S");
            }
            other => panic!("expected unreconciled trips, found {other:?}"),
        }
        assert_eq!(map.trip(TripIdx(0)).stop_sequence().len(), 3, "merge is kept");
    }

    #[test]
    fn test_create_route() {
        let feed = feed(&[]);
        let mut map = OsmSchedule::new();
        for (i, stop_ref) in ["S1", "S2", "S3"].iter().enumerate() {
            map_stop(&mut map, 101 + i as i64, stop_ref);
        }
        let route = match MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).create_route(ROUTE) {
            Ok(route) => route,
            Err(e) => panic!("{e}"),
        };
        let created = map.route(route);
        assert!(created.element.is_new());
        assert_eq!(created.relation_type(), Some("route_master"));
        assert_eq!(created.route_master(), Some("bus"));
        assert_eq!(created.ref_tag(), Some("12"));
        assert_eq!(created.trips().len(), 1);
        let trip = map.trip(created.trips()[0]);
        assert_eq!(trip.name(), Some("Bus 12 : Saint-Laurent (12-N)"));
        assert_eq!(trip.from(), Some("Stop S1"));
        assert_eq!(trip.to(), Some("Stop S3"));
        assert_eq!(trip.relation_type(), Some("route"));
        assert_eq!(trip.route_tag(), Some("bus"));
        assert_eq!(trip.network(), Some("N"));
        assert!(map.route_is_modified(route));
    }

    #[test]
    fn test_explicit_terminals_and_shape() {
        let mut feed = feed(&[]);
        let t1 = feed
            .trip_idx(&"t1".to_string())
            .expect("trip t1 should be loaded");
        feed.trip_mut(t1).from_stop = Some(String::from("Terminus Nord"));
        feed.trip_mut(t1).add_shape_point(1, 45.0, -73.0);
        feed.trip_mut(t1).add_shape_point(2, 45.02, -73.0);
        let mut map = map();
        let mut engine = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).with_shapes(true);
        let created = match engine.create_trip(ROUTE, t1) {
            Ok(t) => t,
            Err(e) => panic!("{e}"),
        };
        let trip = engine.map().trip(created);
        assert_eq!(trip.from(), Some("Terminus Nord"));
        assert_eq!(trip.to(), Some("Stop S3"));
        assert_eq!(
            trip.ways(),
            &[TripWay::Drawn(vec![(45.0, -73.0), (45.02, -73.0)])]
        );
    }

    #[test]
    fn test_empty_trip() {
        let mut feed = feed(&[]);
        feed.attach_trip(GtfsTrip::new("t2", "r12", "12-S", None));
        let mut map = map();
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).merge_route(ROUTE, ROUTE);
        match result {
            Err(MergeError::EmptyStopSequence(trip)) => assert_eq!(trip, "12-S"),
            other => panic!("expected empty trip error, found {other:?}"),
        }
    }

    #[test]
    fn test_unreadable_map_trip() {
        let feed = feed(&[]);
        let mut map = map();
        map.trip_mut(TripIdx(0))
            .set_import_error(String::from("unexpected role 'foo'"));
        let result = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail).merge_trip(TripIdx(0), TripIdx(0));
        assert!(matches!(result, Err(MergeError::MapTripImportError { .. })));
    }

    #[test]
    fn test_create_stop() {
        let feed = feed(&[]);
        let mut map = OsmSchedule::new();
        let mut engine = MergeEngine::new(&feed, &mut map, MissingStopPolicy::Fail);
        let created = engine.create_stop(StopIdx(1));
        assert_eq!(engine.map().stop(created).refs(), vec!["S2"]);
    }
}
