use crate::model::schedule::StopElement;
use crate::validation::{Issue, IssueList};
use geo::{Distance, Haversine};
use itertools::Itertools;
use std::collections::{HashMap, HashSet};

pub const DEFAULT_MAX_STOP_DISTANCE_METERS: f64 = 50.0;

/// matches feed stops to map stops by their reference codes.
pub struct StopConflator<'a, F: StopElement, M: StopElement> {
    feed: &'a [F],
    map: &'a [M],
}

impl<'a, F: StopElement, M: StopElement> StopConflator<'a, F, M> {
    pub fn new(feed: &'a [F], map: &'a [M]) -> Self {
        Self { feed, map }
    }

    fn map_refs(&self) -> HashSet<&'a str> {
        self.map.iter().flat_map(|s| s.refs()).collect()
    }

    /// first map stop carrying each reference code
    fn map_stops_by_ref(&self) -> HashMap<&'a str, &'a M> {
        let mut by_ref = HashMap::new();
        for stop in self.map.iter() {
            for stop_ref in stop.refs() {
                by_ref.entry(stop_ref).or_insert(stop);
            }
        }
        by_ref
    }

    /// feed stops none of whose reference codes appear on the map.
    pub fn stops_only_in_feed(&self) -> Vec<&'a F> {
        let map_refs = self.map_refs();
        self.feed
            .iter()
            .filter(|s| s.refs().iter().all(|r| !map_refs.contains(r)))
            .collect()
    }

    /// for a feed stop whose references are only partly on the map, the map
    /// stops carrying any of them. empty when all or none of the references
    /// are mapped.
    pub fn find_ambiguous_partial_matches(&self, feed_stop: &F) -> Vec<&'a M> {
        let map_refs = self.map_refs();
        let refs = feed_stop.refs();
        let mapped = refs.iter().filter(|r| map_refs.contains(*r)).count();
        if mapped == 0 || mapped == refs.len() {
            return vec![];
        }
        self.map
            .iter()
            .filter(|m| refs.iter().any(|r| m.has_ref(r)))
            .collect()
    }

    /// every feed stop with a partial match, with the map stops involved.
    pub fn ambiguous_partial_matches(&self) -> Vec<(&'a F, Vec<&'a M>)> {
        self.feed
            .iter()
            .map(|f| (f, self.find_ambiguous_partial_matches(f)))
            .filter(|(_, matches)| !matches.is_empty())
            .collect()
    }

    /// great-circle distance between the feed and map stop sharing each
    /// reference code. pairs at least `max_meters` apart are reported.
    pub fn validate_distance(&self, max_meters: f64) -> Vec<Issue> {
        let by_ref = self.map_stops_by_ref();
        let mut issues = vec![];
        for feed_stop in self.feed.iter() {
            for stop_ref in feed_stop.refs() {
                let map_stop = match by_ref.get(stop_ref) {
                    Some(m) => m,
                    None => continue,
                };
                let distance = Haversine.distance(feed_stop.point(), map_stop.point());
                if distance >= max_meters {
                    issues.push(Issue::NodesTooFar {
                        osm_id: label(map_stop.id()),
                        gtfs_id: label(feed_stop.id()),
                        stop_ref: stop_ref.to_string(),
                        distance_meters: distance,
                    });
                }
            }
        }
        issues
    }

    /// one issue per feed reference code absent from the map.
    pub fn missing_in_map(&self) -> Vec<Issue> {
        let mapped = self.map_refs();
        let map_refs = &mapped;
        self.feed
            .iter()
            .flat_map(move |s| {
                s.refs()
                    .into_iter()
                    .filter(move |r| !map_refs.contains(r))
                    .map(move |r| Issue::OsmStopMissing {
                        stop_ref: r.to_string(),
                        name: s.name().unwrap_or_default().to_string(),
                        lat: s.lat(),
                        lon: s.lon(),
                    })
            })
            .collect()
    }

    /// one issue per map reference code unknown to the feed.
    pub fn unknown_refs(&self) -> Vec<Issue> {
        let known: HashSet<&str> = self.feed.iter().flat_map(|s| s.refs()).collect();
        let feed_refs = &known;
        self.map
            .iter()
            .flat_map(move |s| {
                s.refs()
                    .into_iter()
                    .filter(move |r| !feed_refs.contains(r))
                    .map(move |r| Issue::OsmStopWithUnknownRef {
                        osm_id: label(s.id()),
                        stop_ref: r.to_string(),
                    })
            })
            .collect()
    }

    /// one issue per feed stop with a partial match, naming the map stops
    /// involved.
    pub fn partial_matches(&self) -> Vec<Issue> {
        self.ambiguous_partial_matches()
            .into_iter()
            .map(|(feed_stop, matches)| Issue::AmbiguousPartialMatch {
                gtfs_id: label(feed_stop.id()),
                stop_refs: feed_stop.refs().join(";"),
                osm_ids: matches.iter().map(|m| label(m.id())).join(";"),
            })
            .collect()
    }

    pub fn validate(&self, max_meters: f64) -> IssueList {
        let mut issues = IssueList::default();
        issues.extend(self.missing_in_map());
        issues.extend(self.unknown_refs());
        issues.extend(self.partial_matches());
        issues.extend(self.validate_distance(max_meters));
        issues
    }
}

fn label<T: std::fmt::Display>(id: Option<T>) -> String {
    id.map(|i| i.to_string())
        .unwrap_or_else(|| String::from("new"))
}
