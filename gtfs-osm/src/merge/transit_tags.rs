//! fixed classification tags written on the map elements of a bus network.

/// tags identifying a node as a bus platform
pub const PLATFORM_TAGS: [(&str, &str); 3] = [
    ("highway", "bus_stop"),
    ("bus", "yes"),
    ("public_transport", "platform"),
];

/// tags identifying a relation as one bus trip
pub const ROUTE_TAGS: [(&str, &str); 2] = [("type", "route"), ("route", "bus")];

/// tags identifying a relation as a bus line grouping trips
pub const ROUTE_MASTER_TAGS: [(&str, &str); 2] = [("type", "route_master"), ("route_master", "bus")];
