use crate::model::{
    osm::OsmId,
    schedule::{RouteIdx, StopIdx, TripIdx},
};
use std::collections::HashMap;

/// schedule element written to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKey {
    Stop(StopIdx),
    Trip(TripIdx),
    Route(RouteIdx),
    /// way drawn for the n-th way member of a trip
    DrawnWay(TripIdx, usize),
    /// m-th node of a drawn way
    DrawnNode(TripIdx, usize, usize),
}

/// hands out the temporary identifiers of the elements created in one
/// document: -1, -2, -3, ... persistent identifiers pass through. an element
/// asking twice gets the same identifier.
#[derive(Debug)]
pub struct IdAllocator {
    next: i64,
    assigned: HashMap<ElementKey, i64>,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next: -1,
            assigned: HashMap::new(),
        }
    }
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// a fresh identifier for an element outside of any schedule.
    pub fn allocate(&mut self) -> i64 {
        let id = self.next;
        self.next -= 1;
        id
    }

    pub fn id_for(&mut self, key: ElementKey, persistent: Option<OsmId>) -> i64 {
        if let Some(id) = persistent {
            return id.0;
        }
        if let Some(id) = self.assigned.get(&key) {
            return *id;
        }
        let id = self.allocate();
        self.assigned.insert(key, id);
        id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_allocation() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.id_for(ElementKey::Stop(StopIdx(4)), None), -1);
        assert_eq!(ids.id_for(ElementKey::Trip(TripIdx(0)), None), -2);
        assert_eq!(
            ids.id_for(ElementKey::Stop(StopIdx(4)), None),
            -1,
            "an element keeps its identifier"
        );
        assert_eq!(
            ids.id_for(ElementKey::Stop(StopIdx(5)), Some(OsmId(123))),
            123
        );
        assert_eq!(ids.allocate(), -3);
    }

    #[test]
    fn test_allocators_are_independent() {
        let mut first = IdAllocator::new();
        let _ = first.allocate();
        let mut second = IdAllocator::new();
        assert_eq!(second.allocate(), -1);
    }
}
