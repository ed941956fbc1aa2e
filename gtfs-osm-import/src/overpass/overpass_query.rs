use super::FilterQuery;
use gtfs_osm::model::schedule::BoundingBox;
use itertools::Itertools;
use std::fmt::Display;

/// the queries sent to the Overpass API, rendered in the Overpass QL
/// language described at <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide>.
#[derive(Debug, Clone)]
pub enum OverpassQuery {
    /// platforms carrying a reference, with every node of the bus routes
    /// serving them
    Platforms {
        bbox: BoundingBox,
        timeout_seconds: u64,
        platform_filters: Vec<FilterQuery>,
    },
    /// platforms, the bus routes serving them and their route masters
    Routes {
        bbox: BoundingBox,
        timeout_seconds: u64,
        platform_filters: Vec<FilterQuery>,
    },
}

impl Display for OverpassQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverpassQuery::Platforms {
                bbox,
                timeout_seconds,
                platform_filters,
            } => {
                writeln!(f, "[out:xml][timeout:{timeout_seconds}][bbox:{bbox}];")?;
                writeln!(
                    f,
                    "node{}{}->.all_ref_platforms;",
                    platform_filters.iter().join(""),
                    FilterQuery::exists("ref")
                )?;
                writeln!(
                    f,
                    "rel{}(bn.all_ref_platforms)->.containing_routes;",
                    FilterQuery::equals("route", "bus")
                )?;
                writeln!(
                    f,
                    "rel{}(br.containing_routes)->.master_routes;",
                    FilterQuery::equals("route_master", "bus")
                )?;
                writeln!(f, "rel(r.master_routes)->.bus_routes;")?;
                writeln!(f, "node(r.bus_routes)->.stops_within_routes;")?;
                writeln!(f, "(.stops_within_routes; .all_ref_platforms;)->._;")?;
                writeln!(f, "out meta;")
            }
            OverpassQuery::Routes {
                bbox,
                timeout_seconds,
                platform_filters,
            } => {
                writeln!(f, "[out:xml][timeout:{timeout_seconds}][bbox:{bbox}];")?;
                writeln!(f, "node{}->.all_platforms;", platform_filters.iter().join(""))?;
                writeln!(
                    f,
                    "rel{}(bn.all_platforms)->.containing_routes;",
                    FilterQuery::equals("route", "bus")
                )?;
                writeln!(f, "rel(br.containing_routes)->.master_routes;")?;
                writeln!(f, "rel(r.master_routes)->.bus_routes;")?;
                writeln!(f, "node(r.bus_routes)->.stops_within_routes;")?;
                writeln!(
                    f,
                    "(.all_platforms; .stops_within_routes; .bus_routes; .master_routes;)->._;"
                )?;
                writeln!(f, "out meta;")
            }
        }
    }
}
