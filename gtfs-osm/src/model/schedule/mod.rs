mod bounding_box;
mod duplicate_stop_policy;
mod element_index;
mod route_key;
mod schedule_element;
mod schedule_error;
mod transit_schedule;

pub use bounding_box::BoundingBox;
pub use duplicate_stop_policy::DuplicateStopPolicy;
pub use element_index::{RouteIdx, StopIdx, TripIdx};
pub use route_key::RouteKey;
pub use schedule_element::{RouteElement, StopElement, TripElement};
pub use schedule_error::ScheduleError;
pub use transit_schedule::Schedule;
