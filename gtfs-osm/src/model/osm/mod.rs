mod osm_attributes;
mod osm_element;
mod osm_id;
mod osm_route;
mod osm_schedule;
mod osm_stop;
mod osm_tags;
mod osm_trip;

pub use osm_attributes::OsmAttributes;
pub use osm_element::OsmElement;
pub use osm_id::OsmId;
pub use osm_route::OsmRoute;
pub use osm_schedule::OsmSchedule;
pub use osm_stop::OsmStop;
pub use osm_tags::OsmTags;
pub use osm_trip::{OsmTrip, StopPosition, TripStop, TripWay};
