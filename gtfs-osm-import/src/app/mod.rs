//! command line workflows: exporting stops, creating and updating routes,
//! and caching loaded schedules.
mod app_error;
mod console_resolver;
mod gtfs_osm_app;
mod operation;
pub mod route_ops;
mod schedule_sources;
pub mod stop_ops;

pub use app_error::AppError;
pub use console_resolver::ConsoleResolver;
pub use gtfs_osm_app::GtfsOsmApp;
pub use operation::{CacheOperation, Operation, RouteOperation, StopOperation};
pub use schedule_sources::ScheduleSources;
