//! the regional organisations operating under the exo brand share a
//! single feed layout.
use super::agency_profile::{
    standard_route, standard_stop, standard_stop_time, standard_trip, AgencyProfile,
};

pub(super) const fn profile(agency_id: &'static str, agency_name: &'static str) -> AgencyProfile {
    AgencyProfile {
        agency_id,
        agency_name,
        make_stop: standard_stop,
        make_route: standard_route,
        make_trip: standard_trip,
        make_stop_time: standard_stop_time,
    }
}
