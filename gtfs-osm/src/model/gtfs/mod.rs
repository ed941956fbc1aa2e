mod feed_schedule;
mod gtfs_route;
mod gtfs_stop;
mod gtfs_trip;
mod trip_shape;

pub use feed_schedule::FeedSchedule;
pub use gtfs_route::GtfsRoute;
pub use gtfs_stop::GtfsStop;
pub use gtfs_trip::GtfsTrip;
pub use trip_shape::TripShape;
