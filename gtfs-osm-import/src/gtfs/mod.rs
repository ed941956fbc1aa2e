//! GTFS feed loading. each supported agency publishes its feed with its own
//! conventions, captured by an [`AgencyProfile`].
mod agency_profile;
mod exo;
mod feed_error;
mod gtfs_loader;
mod gtfs_row;
mod load_options;
mod row_error;
mod stl;
mod stm;
mod stop_time_row;

pub use agency_profile::{find_profile, AgencyProfile, PROFILES};
pub use feed_error::FeedError;
pub use gtfs_loader::GtfsLoader;
pub use gtfs_row::GtfsRow;
pub use load_options::LoadOptions;
pub use row_error::RowError;
pub use stop_time_row::StopTimeRow;
