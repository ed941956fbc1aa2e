use crate::{app::AppError, gtfs::LoadOptions, overpass::FilterQuery};
use gtfs_osm::{
    conflation::DEFAULT_MAX_STOP_DISTANCE_METERS, merge::MissingStopPolicy,
    model::schedule::DuplicateStopPolicy,
};
use serde::{Deserialize, Serialize};

/// defines behaviors for a GTFS to OSM import run
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct ImportConfiguration {
    pub overpass_endpoint: String,
    pub overpass_timeout_seconds: u64,
    /// grows the feed bounding box before querying the map
    pub bbox_margin_meters: f64,
    /// feed and map stops sharing a ref further apart than this are reported
    pub max_stop_distance_meters: f64,
    pub duplicate_stop_policy: DuplicateStopPolicy,
    /// tag filters selecting platform nodes
    pub platform_filters: Vec<FilterQuery>,
    pub unique_trips: bool,
    pub remove_truncated_trips: bool,
    pub include_shapes: bool,
    pub missing_stop_policy: MissingStopPolicy,
    /// report map trips missing from the feed as a warning instead of a
    /// route failure
    pub ignore_unreconciled_trips: bool,
}

impl Default for ImportConfiguration {
    fn default() -> Self {
        Self {
            overpass_endpoint: String::from("https://overpass-api.de/api/interpreter"),
            overpass_timeout_seconds: 30,
            bbox_margin_meters: 1000.0,
            max_stop_distance_meters: DEFAULT_MAX_STOP_DISTANCE_METERS,
            duplicate_stop_policy: DuplicateStopPolicy::default(),
            platform_filters: vec![FilterQuery::equals("public_transport", "platform")],
            unique_trips: true,
            remove_truncated_trips: true,
            include_shapes: false,
            missing_stop_policy: MissingStopPolicy::default(),
            ignore_unreconciled_trips: false,
        }
    }
}

impl ImportConfiguration {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            unique_trips: self.unique_trips,
            remove_truncated_trips: self.remove_truncated_trips,
            include_shapes: self.include_shapes,
        }
    }
}

impl TryFrom<&String> for ImportConfiguration {
    type Error = AppError;

    fn try_from(f: &String) -> Result<Self, Self::Error> {
        if f.ends_with(".toml") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| AppError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            toml::from_str(&s)
                .map_err(|e| AppError::ConfigurationError(format!("failure decoding {f}: {e}")))
        } else if f.ends_with(".json") {
            let s = std::fs::read_to_string(f)
                .map_err(|e| AppError::ConfigurationError(format!("failure reading {f}: {e}")))?;
            serde_json::from_str(&s)
                .map_err(|e| AppError::ConfigurationError(format!("failure decoding {f}: {e}")))
        } else {
            Err(AppError::ConfigurationError(format!(
                "unsupported file type: {f}"
            )))
        }
    }
}
