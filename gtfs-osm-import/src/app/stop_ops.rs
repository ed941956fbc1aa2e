use gtfs_osm::{
    conflation::StopConflator,
    josm::JosmDocument,
    model::{
        gtfs::FeedSchedule,
        osm::{OsmSchedule, OsmStop},
        schedule::StopElement,
    },
    validation::{Issue, IssueList},
};
use itertools::Itertools;

/// platforms written for a stop export.
#[derive(Debug)]
pub struct StopExport {
    pub document: JosmDocument,
    /// feed stops left out because only some of their refs are on the map
    pub unresolved: Vec<Issue>,
}

/// new map platforms for feed stops. `stop_refs` keeps the stops carrying
/// one of these references, `only_missing` the stops none of whose
/// references are on the map. partially mapped stops are never exported
/// as missing, they are returned as unresolved.
pub fn export_stops(
    feed: &FeedSchedule,
    map: &OsmSchedule,
    stop_refs: Option<&[String]>,
    only_missing: bool,
) -> StopExport {
    let (candidates, unresolved) = if only_missing {
        let conflator = StopConflator::new(feed.stops(), map.stops());
        let unresolved = conflator.partial_matches();
        for issue in unresolved.iter() {
            if let Issue::AmbiguousPartialMatch {
                gtfs_id,
                stop_refs,
                osm_ids,
            } = issue
            {
                log::warn!(
                    "GTFS stop {gtfs_id} [{stop_refs}] is only partly in OSM ({osm_ids}), resolve it manually"
                );
            }
        }
        (conflator.stops_only_in_feed(), unresolved)
    } else {
        (feed.stops().iter().collect_vec(), vec![])
    };
    let stops = candidates
        .into_iter()
        .filter(|stop| match stop_refs {
            None => true,
            Some(refs) => stop.refs().iter().any(|r| refs.iter().any(|s| s == r)),
        })
        .map(OsmStop::from_feed)
        .collect_vec();
    log::info!("exporting {} stops", stops.len());
    StopExport {
        document: JosmDocument::from_stops(stops.iter()),
        unresolved,
    }
}

/// data problems of both schedules and of the way their stops match.
pub fn inspect_stops(feed: &FeedSchedule, map: &OsmSchedule, max_distance_meters: f64) -> IssueList {
    let mut issues = StopConflator::new(feed.stops(), map.stops()).validate(max_distance_meters);
    issues.extend(feed.issues.iter().cloned());
    issues.extend(map.issues.iter().cloned());
    issues
}

#[cfg(test)]
mod test {
    use super::*;
    use gtfs_osm::{
        model::{
            gtfs::GtfsStop,
            osm::{OsmAttributes, OsmElement, OsmId, OsmTags},
        },
        validation::IssueKind,
    };

    fn schedules() -> (FeedSchedule, OsmSchedule) {
        let mut feed = FeedSchedule::new();
        feed.add_stop(GtfsStop::new("s1", 45.5, -73.56, "Berri", "52"));
        feed.add_stop(GtfsStop::new("s2", 45.51, -73.57, "Sherbrooke", "53"));
        feed.add_stop(GtfsStop::new("s3", 45.52, -73.58, "Rachel", "54"));
        let mut map = OsmSchedule::new();
        map.add_stop(OsmStop::new(
            OsmElement::existing(
                OsmId(10),
                OsmTags::from_iter([("ref", "52"), ("name", "Berri")]),
                OsmAttributes::default(),
            ),
            45.5,
            -73.56,
        ));
        (feed, map)
    }

    #[test]
    fn test_export_missing_stops() {
        let (feed, map) = schedules();
        let export = export_stops(&feed, &map, None, true);
        assert!(export.unresolved.is_empty());
        let document = export.document;
        assert_eq!(document.nodes().len(), 2);
        assert!(document.nodes().iter().all(|n| n.id < 0));
        assert_eq!(document.nodes()[0].tag("ref"), Some("53"));
    }

    #[test]
    fn test_export_stops_by_ref() {
        let (feed, map) = schedules();
        let refs = vec![String::from("52"), String::from("54")];
        let export = export_stops(&feed, &map, Some(refs.as_slice()), false);
        let exported = export
            .document
            .nodes()
            .iter()
            .filter_map(|n| n.tag("ref"))
            .collect_vec();
        assert_eq!(exported, vec!["52", "54"]);
    }

    #[test]
    fn test_inspect_stops() {
        let (feed, map) = schedules();
        let issues = inspect_stops(&feed, &map, 50.0);
        assert_eq!(issues.of_kind(IssueKind::OsmStopMissing).len(), 2);
        assert!(issues.of_kind(IssueKind::AmbiguousPartialMatch).is_empty());
        assert!(issues.report().contains("53"));
    }

    fn partly_mapped() -> (FeedSchedule, OsmSchedule) {
        let (mut feed, map) = schedules();
        let mut stop = GtfsStop::new("s4", 45.53, -73.59, "Mont-Royal", "55");
        stop.add_ref("52");
        feed.add_stop(stop);
        (feed, map)
    }

    #[test]
    fn test_export_missing_stops_leaves_partial_matches_out() {
        let (feed, map) = partly_mapped();
        let export = export_stops(&feed, &map, None, true);
        let exported = export
            .document
            .nodes()
            .iter()
            .filter_map(|n| n.tag("ref"))
            .collect_vec();
        assert_eq!(exported, vec!["53", "54"]);
        assert_eq!(export.unresolved.len(), 1);
        assert_eq!(export.unresolved[0].cells()[0], "s4");
    }

    #[test]
    fn test_inspect_reports_partial_matches() {
        let (feed, map) = partly_mapped();
        let issues = inspect_stops(&feed, &map, 50.0);
        let partial = issues.of_kind(IssueKind::AmbiguousPartialMatch);
        assert_eq!(partial.len(), 1);
        assert_eq!(
            partial[0].cells(),
            vec![String::from("s4"), String::from("55;52"), String::from("10")]
        );
        assert!(issues.report().contains("GTFS stops with refs only partly in OSM"));
    }
}
