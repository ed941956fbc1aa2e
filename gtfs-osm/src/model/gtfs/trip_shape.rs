use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// shape points of a trip keyed by their sequence number. points may arrive
/// in any order; the map keeps them sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripShape {
    points: BTreeMap<u32, (f64, f64)>,
}

impl TripShape {
    pub fn add_point(&mut self, sequence: u32, lat: f64, lon: f64) {
        self.points.insert(sequence, (lat, lon));
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// (lat, lon) pairs in sequence order
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.points.values().copied().collect()
    }

    pub fn to_linestring(&self) -> LineString<f64> {
        LineString::new(
            self.points
                .values()
                .map(|(lat, lon)| Coord { x: *lon, y: *lat })
                .collect(),
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_points_sorted_by_sequence() {
        let mut shape = TripShape::default();
        shape.add_point(3, 45.3, -73.3);
        shape.add_point(1, 45.1, -73.1);
        shape.add_point(2, 45.2, -73.2);
        assert_eq!(
            shape.points(),
            vec![(45.1, -73.1), (45.2, -73.2), (45.3, -73.3)]
        );
        let line = shape.to_linestring();
        assert_eq!(line.0.first().map(|c| c.x), Some(-73.1));
        assert_eq!(line.0.len(), 3);
    }
}
