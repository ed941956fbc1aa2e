use super::agency_profile::{
    standard_stop, unsupported_route, unsupported_stop_time, unsupported_trip,
};
use super::{AgencyProfile, GtfsRow, RowError};
use gtfs_osm::model::gtfs::GtfsStop;
use once_cell::sync::Lazy;
use regex::Regex;

/// only stops are read from this feed.
pub(super) const PROFILE: AgencyProfile = AgencyProfile {
    agency_id: "STL",
    agency_name: "Societe de transport de Laval",
    make_stop: stop,
    make_route: unsupported_route,
    make_trip: unsupported_trip,
    make_stop_time: unsupported_stop_time,
};

/// the stop code repeated at the end of stop names, as in `Cartier [40123]`
static REF_SUFFIX: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r" \[[^\[]*$"));
static SPACES: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r" {2,}"));

fn stop(row: &GtfsRow) -> Result<GtfsStop, RowError> {
    let mut stop = standard_stop(row)?;
    stop.name = clean_name(&stop.name)?;
    Ok(stop)
}

fn clean_name(name: &str) -> Result<String, RowError> {
    let invalid = |e: &regex::Error| RowError::InvalidValue {
        column: String::from("stop_name"),
        value: name.to_string(),
        message: e.to_string(),
    };
    let suffix = REF_SUFFIX.as_ref().map_err(invalid)?;
    let spaces = SPACES.as_ref().map_err(invalid)?;
    let trimmed = suffix.replace(name, "");
    Ok(spaces.replace_all(&trimmed, " ").into_owned())
}
