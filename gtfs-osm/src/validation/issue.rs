use super::IssueKind;
use serde::{Deserialize, Serialize};

/// a data problem found while loading or validating a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Issue {
    OsmStopMissing {
        stop_ref: String,
        name: String,
        lat: f64,
        lon: f64,
    },
    OsmStopWithUnknownRef {
        osm_id: String,
        stop_ref: String,
    },
    AttributeMissing {
        osm_id: String,
        tag: String,
        expected: Option<String>,
    },
    InvalidAttributeValue {
        osm_id: String,
        tag: String,
        current: String,
        expected: String,
    },
    NodesTooFar {
        osm_id: String,
        gtfs_id: String,
        stop_ref: String,
        distance_meters: f64,
    },
    /// a feed stop with several refs, only some of them on the map. needs a
    /// manual decision before any stop is created.
    AmbiguousPartialMatch {
        gtfs_id: String,
        stop_refs: String,
        osm_ids: String,
    },
}

impl Issue {
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::OsmStopMissing { .. } => IssueKind::OsmStopMissing,
            Issue::OsmStopWithUnknownRef { .. } => IssueKind::OsmStopWithUnknownRef,
            Issue::AttributeMissing { .. } => IssueKind::AttributeMissing,
            Issue::InvalidAttributeValue { .. } => IssueKind::InvalidAttributeValue,
            Issue::NodesTooFar { .. } => IssueKind::NodesTooFar,
            Issue::AmbiguousPartialMatch { .. } => IssueKind::AmbiguousPartialMatch,
        }
    }

    /// values of this issue in the order of [`IssueKind::columns`]
    pub fn cells(&self) -> Vec<String> {
        match self {
            Issue::OsmStopMissing {
                stop_ref,
                name,
                lat,
                lon,
            } => vec![
                stop_ref.clone(),
                name.clone(),
                format!("{lat:.6}"),
                format!("{lon:.6}"),
            ],
            Issue::OsmStopWithUnknownRef { osm_id, stop_ref } => {
                vec![osm_id.clone(), stop_ref.clone()]
            }
            Issue::AttributeMissing {
                osm_id,
                tag,
                expected,
            } => vec![
                osm_id.clone(),
                tag.clone(),
                expected.clone().unwrap_or_default(),
            ],
            Issue::InvalidAttributeValue {
                osm_id,
                tag,
                current,
                expected,
            } => vec![
                osm_id.clone(),
                tag.clone(),
                current.clone(),
                expected.clone(),
            ],
            Issue::NodesTooFar {
                osm_id,
                gtfs_id,
                stop_ref,
                distance_meters,
            } => vec![
                osm_id.clone(),
                gtfs_id.clone(),
                stop_ref.clone(),
                format!("{distance_meters:.1}"),
            ],
            Issue::AmbiguousPartialMatch {
                gtfs_id,
                stop_refs,
                osm_ids,
            } => vec![gtfs_id.clone(), stop_refs.clone(), osm_ids.clone()],
        }
    }
}
