use super::{exo, stl, stm, GtfsRow, RowError, StopTimeRow};
use gtfs_osm::model::gtfs::{GtfsRoute, GtfsStop, GtfsTrip};

/// the row interpretation of one agency's feed.
pub struct AgencyProfile {
    /// `agency_id` of the first row of agency.txt
    pub agency_id: &'static str,
    /// `agency_name` of the first row of agency.txt
    pub agency_name: &'static str,
    pub make_stop: fn(&GtfsRow) -> Result<GtfsStop, RowError>,
    pub make_route: fn(&GtfsRow) -> Result<GtfsRoute, RowError>,
    pub make_trip: fn(&GtfsRow) -> Result<GtfsTrip, RowError>,
    pub make_stop_time: fn(&GtfsRow) -> Result<StopTimeRow, RowError>,
}

impl std::fmt::Debug for AgencyProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AgencyProfile({}, {})", self.agency_id, self.agency_name)
    }
}

pub static PROFILES: [AgencyProfile; 14] = [
    exo::profile("CITCRC", "exo-Chambly-Richelieu-Carignan"),
    exo::profile("CITHSL", "exo-Haut-Saint-Laurent"),
    exo::profile("CITLA", "exo-Laurentides"),
    exo::profile("CITPI", "exo-La Presqu'île"),
    exo::profile("CITLR", "exo-Le Richelain"),
    exo::profile("CITROUS", "exo-Roussillon"),
    exo::profile("CITSV", "exo-Sorel-Varennes"),
    exo::profile("CITSO", "exo-Sud-Ouest"),
    exo::profile("CITVR", "exo-Vallée du Richelieu"),
    exo::profile("MRCLASSO", "exo-L'Assomption"),
    exo::profile("MRCLM", "exo-Terrebonne-Mascouche"),
    exo::profile("OMITSJU", "exo-Sainte-Julie"),
    stl::PROFILE,
    stm::PROFILE,
];

/// profile handling the agency identified by the first row of agency.txt.
pub fn find_profile(agency_id: &str, agency_name: &str) -> Option<&'static AgencyProfile> {
    PROFILES
        .iter()
        .find(|p| p.agency_id == agency_id && p.agency_name == agency_name)
}

pub(super) fn standard_stop(row: &GtfsRow) -> Result<GtfsStop, RowError> {
    Ok(GtfsStop::new(
        row.get("stop_id")?,
        row.parse("stop_lat")?,
        row.parse("stop_lon")?,
        row.get_optional("stop_name").unwrap_or_default(),
        row.get("stop_code")?,
    ))
}

/// routes are published as `Bus <short name> : <long name>`, under the
/// agency as both network and operator.
pub(super) fn standard_route(row: &GtfsRow) -> Result<GtfsRoute, RowError> {
    let code = row.get("route_short_name")?;
    let long_name = row.get_optional("route_long_name").unwrap_or_default();
    let agency = row.get("agency_id")?;
    Ok(GtfsRoute::new(
        row.get("route_id")?,
        code,
        long_name,
        &format!("Bus {code} : {long_name}"),
        Some(agency),
        Some(agency),
    ))
}

pub(super) fn standard_trip(row: &GtfsRow) -> Result<GtfsTrip, RowError> {
    Ok(GtfsTrip::new(
        row.get("trip_id")?,
        row.get("route_id")?,
        row.get_optional("trip_headsign").unwrap_or_default(),
        row.get_optional("shape_id"),
    ))
}

pub(super) fn standard_stop_time(row: &GtfsRow) -> Result<StopTimeRow, RowError> {
    Ok(StopTimeRow {
        trip_id: row.get("trip_id")?.to_string(),
        stop_id: row.get("stop_id")?.to_string(),
        sequence: row.parse("stop_sequence")?,
    })
}

pub(super) fn unsupported_route(_row: &GtfsRow) -> Result<GtfsRoute, RowError> {
    Err(RowError::Unsupported(String::from("routes")))
}

pub(super) fn unsupported_trip(_row: &GtfsRow) -> Result<GtfsTrip, RowError> {
    Err(RowError::Unsupported(String::from("trips")))
}

pub(super) fn unsupported_stop_time(_row: &GtfsRow) -> Result<StopTimeRow, RowError> {
    Err(RowError::Unsupported(String::from("stop times")))
}
