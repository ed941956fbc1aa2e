use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// identifier of a node, way or relation in the map dataset. negative values
/// denote elements created in an edit session and not yet uploaded.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
pub struct OsmId(pub i64);

impl Display for OsmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
