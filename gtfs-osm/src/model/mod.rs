pub mod gtfs;
pub mod osm;
pub mod schedule;
