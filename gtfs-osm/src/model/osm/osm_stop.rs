use super::{osm_tags::tag_accessors, OsmElement, OsmId};
use crate::model::schedule::StopElement;
use serde::{Deserialize, Serialize};

/// a node of the map dataset. platforms carry the feed reference codes of the
/// stops they serve in their `ref` tag, separated by `;`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OsmStop {
    pub element: OsmElement,
    pub lat: f64,
    pub lon: f64,
}

impl OsmStop {
    pub fn new(element: OsmElement, lat: f64, lon: f64) -> Self {
        Self { element, lat, lon }
    }

    tag_accessors! {
        name, set_name => "name";
        ref_tag, set_ref_tag => "ref";
        highway, set_highway => "highway";
        bus, set_bus => "bus";
        public_transport, set_public_transport => "public_transport";
    }
}

impl StopElement for OsmStop {
    type Id = OsmId;

    fn id(&self) -> Option<&OsmId> {
        self.element.id.as_ref()
    }

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }

    fn name(&self) -> Option<&str> {
        OsmStop::name(self)
    }

    fn refs(&self) -> Vec<&str> {
        match self.ref_tag() {
            None => vec![],
            Some(refs) => refs
                .split(';')
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }
}
