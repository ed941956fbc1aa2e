use crate::model::schedule::StopElement;
use serde::{Deserialize, Serialize};

/// a stop read from the feed. after de-duplication one stop may stand for
/// several feed rows sharing its coordinates, each contributing a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GtfsStop {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    pub name: String,
    refs: Vec<String>,
}

impl GtfsStop {
    pub fn new(id: &str, lat: f64, lon: f64, name: &str, stop_ref: &str) -> Self {
        Self {
            id: id.to_string(),
            lat,
            lon,
            name: name.to_string(),
            refs: vec![stop_ref.to_string()],
        }
    }

    /// appends a reference code unless already present. returns true if added.
    pub fn add_ref(&mut self, stop_ref: &str) -> bool {
        if self.refs.iter().any(|r| r == stop_ref) {
            false
        } else {
            self.refs.push(stop_ref.to_string());
            true
        }
    }

    pub fn ref_codes(&self) -> &[String] {
        &self.refs
    }

    pub fn same_location(&self, other: &GtfsStop) -> bool {
        self.lat == other.lat && self.lon == other.lon
    }
}

impl StopElement for GtfsStop {
    type Id = String;

    fn id(&self) -> Option<&String> {
        Some(&self.id)
    }

    fn lat(&self) -> f64 {
        self.lat
    }

    fn lon(&self) -> f64 {
        self.lon
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn refs(&self) -> Vec<&str> {
        self.refs.iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_add_ref_is_idempotent() {
        let mut stop = GtfsStop::new("s1", 45.5, -73.6, "Berri", "A");
        assert!(stop.add_ref("B"));
        assert!(!stop.add_ref("A"), "existing ref should not be appended");
        assert!(!stop.add_ref("B"), "existing ref should not be appended");
        assert_eq!(stop.ref_codes(), &["A".to_string(), "B".to_string()]);
    }
}
