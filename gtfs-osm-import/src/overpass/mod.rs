//! OpenStreetMap data from the Overpass API.
//! see <https://wiki.openstreetmap.org/wiki/Overpass_API>
mod filter_op;
mod filter_query;
mod osm_xml_reader;
mod overpass_error;
mod overpass_query;
mod overpass_source;

pub use filter_op::FilterOp;
pub use filter_query::FilterQuery;
pub use osm_xml_reader::OsmXmlReader;
pub use overpass_error::OverpassError;
pub use overpass_query::OverpassQuery;
pub use overpass_source::OverpassSource;
