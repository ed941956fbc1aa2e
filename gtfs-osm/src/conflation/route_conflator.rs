use super::{ConflationError, RouteCandidate, RouteMatch, RouteResolver};
use crate::model::{
    gtfs::{FeedSchedule, GtfsRoute},
    osm::OsmSchedule,
    schedule::{RouteElement, RouteIdx, RouteKey},
};
use std::collections::HashSet;

/// matches feed routes to map routes by (reference code, network, operator).
pub struct RouteConflator<'a> {
    feed: &'a FeedSchedule,
    map: &'a OsmSchedule,
}

impl<'a> RouteConflator<'a> {
    pub fn new(feed: &'a FeedSchedule, map: &'a OsmSchedule) -> Self {
        Self { feed, map }
    }

    /// map routes with the reference code of `feed_route` and, when
    /// requested, the same network and operator.
    pub fn find_matching_routes(
        &self,
        feed_route: &GtfsRoute,
        match_network: bool,
        match_operator: bool,
    ) -> Vec<RouteIdx> {
        self.map
            .routes()
            .filter(|(_, r)| {
                r.ref_code() == Some(feed_route.ref_code.as_str())
                    && (!match_network || r.network() == feed_route.network())
                    && (!match_operator || r.operator() == feed_route.operator())
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// two phase matching. a single strict match is authoritative and several
    /// strict matches are an error in the map data. without a strict match,
    /// routes sharing only the reference code are returned as candidates.
    pub fn match_route(&self, feed_route: &GtfsRoute) -> Result<RouteMatch, ConflationError> {
        let strict = self.find_matching_routes(feed_route, true, true);
        match strict.as_slice() {
            [single] => return Ok(RouteMatch::Exact(*single)),
            [] => {}
            _ => {
                return Err(ConflationError::DuplicateMapRoutes {
                    key: feed_route.route_key(),
                    count: strict.len(),
                })
            }
        }
        let relaxed = self.find_matching_routes(feed_route, false, false);
        if relaxed.is_empty() {
            Ok(RouteMatch::NotFound)
        } else {
            Ok(RouteMatch::Candidates(relaxed))
        }
    }

    /// map route to merge `feed_route` into, asking the resolver when only
    /// candidates were found. None means the route is not in the map.
    pub fn resolve_route(
        &self,
        feed_route: &GtfsRoute,
        resolver: &mut dyn RouteResolver,
    ) -> Result<Option<RouteIdx>, ConflationError> {
        match self.match_route(feed_route)? {
            RouteMatch::Exact(idx) => Ok(Some(idx)),
            RouteMatch::NotFound => Ok(None),
            RouteMatch::Candidates(candidates) => {
                let candidates = candidates
                    .into_iter()
                    .map(|idx| RouteCandidate {
                        idx,
                        route: self.map.route(idx),
                    })
                    .collect::<Vec<_>>();
                resolver.choose(feed_route, &candidates)
            }
        }
    }

    /// feed routes whose (reference, network, operator) key is not in the map,
    /// in feed order.
    pub fn routes_only_in_feed(&self) -> Vec<RouteIdx> {
        let map_keys: HashSet<RouteKey> = self.map.routes().map(|(_, r)| r.route_key()).collect();
        self.feed
            .routes()
            .filter(|(_, r)| !map_keys.contains(&r.route_key()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// feed routes with a reference code.
    pub fn feed_routes_by_ref(&self, route_ref: &str) -> Vec<RouteIdx> {
        self.feed
            .routes()
            .filter(|(_, r)| r.ref_code == route_ref)
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conflation::{ScriptedAnswer, ScriptedResolver, SkipAmbiguous};
    use crate::model::osm::{OsmAttributes, OsmElement, OsmId, OsmRoute, OsmTags};

    fn map_route(id: i64, route_ref: &str, network: &str, operator: &str) -> OsmRoute {
        OsmRoute::new(OsmElement::existing(
            OsmId(id),
            OsmTags::from_iter([
                ("ref", route_ref),
                ("network", network),
                ("operator", operator),
                ("type", "route_master"),
            ]),
            OsmAttributes::default(),
        ))
    }

    fn feed() -> FeedSchedule {
        let mut feed = FeedSchedule::new();
        feed.add_route(GtfsRoute::new("r12", "12", "", "Bus 12", Some("N"), Some("X")));
        feed.add_route(GtfsRoute::new("r13", "13", "", "Bus 13", Some("N"), Some("X")));
        feed
    }

    #[test]
    fn test_matching_precedence() {
        let feed = feed();
        let mut map = OsmSchedule::new();
        let exact = map.add_route(map_route(1, "12", "N", "X"));
        let other = map.add_route(map_route(2, "12", "M", "Y"));
        let conflator = RouteConflator::new(&feed, &map);
        let route = feed.route(RouteIdx(0));
        assert_eq!(conflator.find_matching_routes(route, true, true), vec![exact]);
        assert_eq!(
            conflator.find_matching_routes(route, false, false),
            vec![exact, other]
        );
        match conflator.match_route(route) {
            Ok(m) => assert_eq!(m, RouteMatch::Exact(exact)),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_duplicate_strict_matches() {
        let feed = feed();
        let mut map = OsmSchedule::new();
        map.add_route(map_route(1, "12", "N", "X"));
        map.add_route(map_route(2, "12", "N", "X"));
        let conflator = RouteConflator::new(&feed, &map);
        match conflator.match_route(feed.route(RouteIdx(0))) {
            Err(ConflationError::DuplicateMapRoutes { count, .. }) => assert_eq!(count, 2),
            other => panic!("expected duplicate route error, found {other:?}"),
        }
    }

    #[test]
    fn test_candidates_and_resolvers() {
        let feed = feed();
        let mut map = OsmSchedule::new();
        let a = map.add_route(map_route(1, "12", "M", "X"));
        let b = map.add_route(map_route(2, "12", "N", "Y"));
        let conflator = RouteConflator::new(&feed, &map);
        let route = feed.route(RouteIdx(0));
        match conflator.match_route(route) {
            Ok(m) => assert_eq!(m, RouteMatch::Candidates(vec![a, b])),
            Err(e) => panic!("{e}"),
        }
        let mut scripted = ScriptedResolver::new([
            ScriptedAnswer::Pick(1),
            ScriptedAnswer::NoneOfThese,
            ScriptedAnswer::Cancel,
        ]);
        match conflator.resolve_route(route, &mut scripted) {
            Ok(chosen) => assert_eq!(chosen, Some(b)),
            Err(e) => panic!("{e}"),
        }
        match conflator.resolve_route(route, &mut scripted) {
            Ok(chosen) => assert_eq!(chosen, None),
            Err(e) => panic!("{e}"),
        }
        assert!(matches!(
            conflator.resolve_route(route, &mut scripted),
            Err(ConflationError::Cancelled)
        ));
        match conflator.resolve_route(route, &mut SkipAmbiguous) {
            Ok(chosen) => assert_eq!(chosen, None),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_not_found() {
        let feed = feed();
        let map = OsmSchedule::new();
        let conflator = RouteConflator::new(&feed, &map);
        match conflator.resolve_route(feed.route(RouteIdx(1)), &mut SkipAmbiguous) {
            Ok(chosen) => assert_eq!(chosen, None),
            Err(e) => panic!("{e}"),
        }
    }

    #[test]
    fn test_routes_only_in_feed() {
        let feed = feed();
        let mut map = OsmSchedule::new();
        map.add_route(map_route(1, "12", "N", "X"));
        map.add_route(map_route(2, "13", "N", "Z"));
        let conflator = RouteConflator::new(&feed, &map);
        assert_eq!(conflator.routes_only_in_feed(), vec![RouteIdx(1)]);
        assert_eq!(conflator.feed_routes_by_ref("13"), vec![RouteIdx(1)]);
    }
}
