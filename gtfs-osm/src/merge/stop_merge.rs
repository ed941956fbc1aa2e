use super::transit_tags::PLATFORM_TAGS;
use crate::model::{
    gtfs::GtfsStop,
    osm::{OsmElement, OsmStop},
};
use itertools::Itertools;

/// copies the name and references of a feed stop onto a map stop and
/// asserts the platform tags. the map stop keeps its position and other
/// tags. returns true if any tag changed.
pub fn merge_stop(stop: &mut OsmStop, feed_stop: &GtfsStop) -> bool {
    let refs = feed_stop.ref_codes().iter().join(";");
    let mut changed = stop.set_name(&feed_stop.name);
    changed |= stop.set_ref_tag(&refs);
    for (key, value) in PLATFORM_TAGS {
        changed |= stop.element.set_tag(key, value);
    }
    changed
}

impl OsmStop {
    /// a new map platform at the position of a feed stop.
    pub fn from_feed(feed_stop: &GtfsStop) -> OsmStop {
        let mut stop = OsmStop::new(OsmElement::created(), feed_stop.lat, feed_stop.lon);
        merge_stop(&mut stop, feed_stop);
        stop
    }
}
