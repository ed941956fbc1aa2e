use super::agency_profile::{standard_route, standard_stop, standard_stop_time, standard_trip};
use super::{AgencyProfile, GtfsRow, RowError};
use gtfs_osm::model::gtfs::{GtfsRoute, GtfsStop};

pub(super) const PROFILE: AgencyProfile = AgencyProfile {
    agency_id: "STM",
    agency_name: "Société de transport de Montréal",
    make_stop: stop,
    make_route: route,
    make_trip: standard_trip,
    make_stop_time: standard_stop_time,
};

/// metro stations and lines share the feed with the bus network. they are
/// recognized by their web page.
fn is_metro(row: &GtfsRow, url_column: &str) -> bool {
    row.get_optional(url_column)
        .map(|url| url.contains("metro"))
        .unwrap_or(false)
}

fn stop(row: &GtfsRow) -> Result<GtfsStop, RowError> {
    if is_metro(row, "stop_url") {
        return Err(RowError::Skip(String::from("metro station")));
    }
    standard_stop(row)
}

fn route(row: &GtfsRow) -> Result<GtfsRoute, RowError> {
    if is_metro(row, "route_url") {
        return Err(RowError::Skip(String::from("metro line")));
    }
    standard_route(row)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_metro_rows_are_skipped() {
        let row = GtfsRow::from_iter([
            ("route_id", "1"),
            ("route_short_name", "1"),
            ("agency_id", "STM"),
            ("route_url", "http://www.stm.info/fr/infos/reseaux/metro/verte"),
        ]);
        assert!(matches!((PROFILE.make_route)(&row), Err(RowError::Skip(_))));
        let row = GtfsRow::from_iter([
            ("route_id", "24"),
            ("route_short_name", "24"),
            ("route_long_name", "Sherbrooke"),
            ("agency_id", "STM"),
            ("route_url", "http://www.stm.info/fr/infos/reseaux/bus"),
        ]);
        match (PROFILE.make_route)(&row) {
            Ok(route) => assert_eq!(route.name, "Bus 24 : Sherbrooke"),
            Err(e) => panic!("{e}"),
        }
    }
}
