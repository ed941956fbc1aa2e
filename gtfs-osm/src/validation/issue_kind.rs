use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// category of a data [`super::Issue`], with the layout of its report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    OsmStopMissing,
    OsmStopWithUnknownRef,
    AttributeMissing,
    InvalidAttributeValue,
    NodesTooFar,
    AmbiguousPartialMatch,
}

impl IssueKind {
    pub fn description(&self) -> &'static str {
        match self {
            IssueKind::OsmStopMissing => "GTFS stops missing from OSM",
            IssueKind::OsmStopWithUnknownRef => "OSM stops with a ref unknown to the GTFS feed",
            IssueKind::AttributeMissing => "OSM elements missing a tag",
            IssueKind::InvalidAttributeValue => "OSM elements with an unexpected tag value",
            IssueKind::NodesTooFar => "OSM stops too far from their GTFS stop",
            IssueKind::AmbiguousPartialMatch => "GTFS stops with refs only partly in OSM",
        }
    }

    /// report columns as (header, width)
    pub fn columns(&self) -> &'static [(&'static str, usize)] {
        match self {
            IssueKind::OsmStopMissing => &[("ref", 10), ("name", 40), ("lat", 12), ("lon", 12)],
            IssueKind::OsmStopWithUnknownRef => &[("osm id", 14), ("ref", 10)],
            IssueKind::AttributeMissing => &[("osm id", 14), ("tag", 20), ("expected", 20)],
            IssueKind::InvalidAttributeValue => &[
                ("osm id", 14),
                ("tag", 20),
                ("current", 20),
                ("expected", 20),
            ],
            IssueKind::NodesTooFar => &[
                ("osm id", 14),
                ("gtfs id", 14),
                ("ref", 10),
                ("distance (m)", 14),
            ],
            IssueKind::AmbiguousPartialMatch => {
                &[("gtfs id", 14), ("refs", 24), ("osm ids", 30)]
            }
        }
    }
}

impl Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
