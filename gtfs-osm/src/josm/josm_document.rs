use super::{
    josm_writer, ElementKey, ExportError, IdAllocator, JosmElement, JosmMember, MemberType,
    RouteExport,
};
use crate::model::{
    osm::{OsmElement, OsmSchedule, OsmStop, TripWay},
    schedule::{RouteElement, RouteIdx, StopIdx, TripIdx},
};
use std::collections::HashSet;
use std::io::Write;

/// the content of a JOSM edit session file. elements are kept per type and
/// each (type, id) pair is written once.
#[derive(Debug, Default)]
pub struct JosmDocument {
    nodes: Vec<JosmElement>,
    ways: Vec<JosmElement>,
    relations: Vec<JosmElement>,
    written: HashSet<(MemberType, i64)>,
}

impl JosmDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// document holding only stop nodes.
    pub fn from_stops<'s, I>(stops: I) -> Self
    where
        I: IntoIterator<Item = &'s OsmStop>,
    {
        let mut ids = IdAllocator::new();
        let mut document = Self::new();
        for stop in stops {
            let id = match stop.element.id {
                Some(id) => id.0,
                None => ids.allocate(),
            };
            document.push(stop_node(stop, id));
        }
        document
    }

    /// document holding the routes among `routes` that need to be uploaded,
    /// with their trips and the stops they serve. None when no route is
    /// modified.
    pub fn from_modified_routes(map: &OsmSchedule, routes: &[RouteIdx]) -> Option<RouteExport> {
        let mut ids = IdAllocator::new();
        let mut document = Self::new();
        let mut exported = vec![];
        let mut failures = vec![];
        for route in routes.iter() {
            if !map.route_is_modified(*route) {
                log::debug!("route {} is unchanged", map.route(*route).label());
                continue;
            }
            failures.extend(document.add_route(map, *route, &mut ids));
            exported.push(*route);
        }
        if exported.is_empty() {
            return None;
        }
        Some(RouteExport {
            document,
            routes: exported,
            failures,
        })
    }

    /// writes a route master after its trip relations. trips that cannot be
    /// written are returned: an existing one stays a member of the master
    /// by id, a new one is left out.
    pub fn add_route(
        &mut self,
        map: &OsmSchedule,
        route_idx: RouteIdx,
        ids: &mut IdAllocator,
    ) -> Vec<ExportError> {
        let route = map.route(route_idx);
        let id = ids.id_for(ElementKey::Route(route_idx), route.element.id);
        let mut master = element(MemberType::Relation, id, &route.element);
        let mut failures = vec![];
        for trip_idx in route.trips().iter() {
            match self.add_trip(map, *trip_idx, ids) {
                Ok(trip_id) => master
                    .members
                    .push(JosmMember::new(MemberType::Relation, trip_id, "")),
                Err(e) => {
                    log::error!("route {}: {e}", route.label());
                    if let Some(trip_id) = map.trip(*trip_idx).element.id {
                        master
                            .members
                            .push(JosmMember::new(MemberType::Relation, trip_id.0, ""));
                    }
                    failures.push(e);
                }
            }
        }
        self.push(master);
        failures
    }

    fn add_trip(
        &mut self,
        map: &OsmSchedule,
        trip_idx: TripIdx,
        ids: &mut IdAllocator,
    ) -> Result<i64, ExportError> {
        let trip = map.trip(trip_idx);
        if let Some(reason) = trip.import_error() {
            return Err(ExportError::IncompleteTrip {
                trip: trip.label(),
                reason: reason.to_string(),
            });
        }
        for (tag, value) in [("from", trip.from()), ("to", trip.to())] {
            if value.is_none() {
                return Err(ExportError::MissingTerminal {
                    trip: trip.label(),
                    tag,
                });
            }
        }

        let id = ids.id_for(ElementKey::Trip(trip_idx), trip.element.id);
        let mut relation = element(MemberType::Relation, id, &trip.element);
        for trip_stop in trip.stops().iter() {
            if let Some(position) = &trip_stop.stop_position {
                if let Some(idx) = map.stop_idx(&position.node) {
                    self.add_stop(map, idx, ids);
                }
                relation.members.push(JosmMember::new(
                    MemberType::Node,
                    position.node.0,
                    &position.role,
                ));
            }
            let node = self.add_stop(map, trip_stop.stop, ids);
            relation
                .members
                .push(JosmMember::new(MemberType::Node, node, &trip_stop.role));
        }
        for (n, way) in trip.ways().iter().enumerate() {
            let way_id = match way {
                TripWay::Existing(way_id) => way_id.0,
                TripWay::Drawn(points) => self.add_drawn_way(trip_idx, n, points, ids),
            };
            relation
                .members
                .push(JosmMember::new(MemberType::Way, way_id, ""));
        }
        self.push(relation);
        Ok(id)
    }

    fn add_stop(&mut self, map: &OsmSchedule, idx: StopIdx, ids: &mut IdAllocator) -> i64 {
        let stop = map.stop(idx);
        let id = ids.id_for(ElementKey::Stop(idx), stop.element.id);
        self.push(stop_node(stop, id));
        id
    }

    fn add_drawn_way(
        &mut self,
        trip: TripIdx,
        n: usize,
        points: &[(f64, f64)],
        ids: &mut IdAllocator,
    ) -> i64 {
        let way_id = ids.id_for(ElementKey::DrawnWay(trip, n), None);
        let mut way = JosmElement::new(MemberType::Way, way_id, true);
        for (m, (lat, lon)) in points.iter().enumerate() {
            let node_id = ids.id_for(ElementKey::DrawnNode(trip, n, m), None);
            let mut node = JosmElement::new(MemberType::Node, node_id, true);
            node.position = Some((*lat, *lon));
            self.push(node);
            way.node_refs.push(node_id);
        }
        self.push(way);
        way_id
    }

    fn push(&mut self, element: JosmElement) {
        if !self.written.insert((element.element_type, element.id)) {
            return;
        }
        match element.element_type {
            MemberType::Node => self.nodes.push(element),
            MemberType::Way => self.ways.push(element),
            MemberType::Relation => self.relations.push(element),
        }
    }

    pub fn nodes(&self) -> &[JosmElement] {
        &self.nodes
    }

    pub fn ways(&self) -> &[JosmElement] {
        &self.ways
    }

    pub fn relations(&self) -> &[JosmElement] {
        &self.relations
    }

    pub fn is_empty(&self) -> bool {
        self.written.is_empty()
    }

    pub(crate) fn elements_in_order(&self) -> impl Iterator<Item = &JosmElement> {
        self.nodes
            .iter()
            .chain(self.ways.iter())
            .chain(self.relations.iter())
    }

    /// streams the document as OSM XML.
    pub fn write<W: Write>(&self, out: W) -> Result<(), ExportError> {
        josm_writer::write_document(self, out)?;
        Ok(())
    }
}

fn element(element_type: MemberType, id: i64, source: &OsmElement) -> JosmElement {
    let mut element = JosmElement::new(element_type, id, source.needs_upload());
    element.attributes = source.attributes.pairs();
    element.tags = source
        .tags
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    element
}

fn stop_node(stop: &OsmStop, id: i64) -> JosmElement {
    let mut node = element(MemberType::Node, id, &stop.element);
    node.position = Some((stop.lat, stop.lon));
    node
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::osm::{
        OsmAttributes, OsmId, OsmRoute, OsmTags, OsmTrip, StopPosition, TripStop,
    };

    fn existing(id: i64, tags: &[(&str, &str)]) -> OsmElement {
        let mut attributes = OsmAttributes::default();
        attributes.set("version", "3");
        OsmElement::existing(OsmId(id), OsmTags::from_iter(tags.iter().copied()), attributes)
    }

    fn created(tags: &[(&str, &str)]) -> OsmElement {
        let mut element = OsmElement::created();
        for (k, v) in tags {
            element.set_tag(k, v);
        }
        element
    }

    /// route 1000 with trip 2000 over stops 101 and 102. the first platform
    /// has its stop position 99 in the map too.
    fn map() -> OsmSchedule {
        let mut map = OsmSchedule::new();
        let s1 = map.add_stop(OsmStop::new(
            existing(101, &[("name", "Berri"), ("ref", "S1")]),
            45.5,
            -73.56,
        ));
        let s2 = map.add_stop(OsmStop::new(
            existing(102, &[("name", "Sherbrooke"), ("ref", "S2")]),
            45.51,
            -73.57,
        ));
        map.add_stop(OsmStop::new(
            existing(99, &[("public_transport", "stop_position")]),
            45.5001,
            -73.56,
        ));
        let route = map.add_route(OsmRoute::new(existing(
            1000,
            &[("type", "route_master"), ("ref", "12")],
        )));
        let mut trip = OsmTrip::new(existing(
            2000,
            &[("type", "route"), ("ref", "12-N"), ("from", "Berri"), ("to", "Sherbrooke")],
        ));
        trip.push_stop(TripStop {
            stop: s1,
            role: String::from("platform"),
            stop_position: Some(StopPosition {
                node: OsmId(99),
                role: String::from("stop"),
            }),
        });
        trip.push_stop(TripStop::platform(s2));
        trip.push_way(TripWay::Existing(OsmId(5000)));
        map.add_trip(route, trip);
        map
    }

    fn relation(document: &JosmDocument, id: i64) -> &JosmElement {
        match document.relations().iter().find(|r| r.id == id) {
            Some(r) => r,
            None => panic!("relation {id} not in document"),
        }
    }

    #[test]
    fn test_unmodified_routes_produce_no_document() {
        let map = map();
        assert!(JosmDocument::from_modified_routes(&map, &[RouteIdx(0)]).is_none());
    }

    #[test]
    fn test_modified_trip_exports_its_route() {
        let mut map = map();
        map.trip_mut(TripIdx(0)).set_name("Bus 12 (12-N)");
        let export = match JosmDocument::from_modified_routes(&map, &[RouteIdx(0)]) {
            Some(export) => export,
            None => panic!("a modified route should be exported"),
        };
        assert!(export.failures.is_empty());
        assert_eq!(export.routes, vec![RouteIdx(0)]);
        let document = export.document;
        let trip = relation(&document, 2000);
        assert!(trip.upload);
        let members = trip
            .members
            .iter()
            .map(|m| (m.member_type, m.reference, m.role.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            members,
            vec![
                (MemberType::Node, 99, "stop"),
                (MemberType::Node, 101, "platform"),
                (MemberType::Node, 102, "platform"),
                (MemberType::Way, 5000, ""),
            ]
        );
        let master = relation(&document, 1000);
        assert!(!master.upload, "route master tags did not change");
        assert_eq!(
            document.relations().last().map(|r| r.id),
            Some(1000),
            "route master should follow its trips"
        );
        assert_eq!(document.nodes().len(), 3);
        assert!(document.nodes().iter().all(|n| !n.upload));
    }

    #[test]
    fn test_new_elements_get_temporary_ids() {
        let mut map = map();
        let shared = map.add_stop(OsmStop::new(created(&[("ref", "S3")]), 45.52, -73.58));
        let route = map.add_route(OsmRoute::new(created(&[("type", "route_master")])));
        for (headsign, from) in [("13-N", "A"), ("13-S", "B")] {
            let mut trip = OsmTrip::new(created(&[("ref", headsign), ("from", from), ("to", from)]));
            trip.push_stop(TripStop::platform(StopIdx(0)));
            trip.push_stop(TripStop::platform(shared));
            map.add_trip(route, trip);
        }
        let export = match JosmDocument::from_modified_routes(&map, &[RouteIdx(0), route]) {
            Some(export) => export,
            None => panic!("the new route should be exported"),
        };
        assert_eq!(export.routes, vec![route]);
        let document = export.document;
        let new_nodes = document
            .nodes()
            .iter()
            .filter(|n| n.id < 0)
            .collect::<Vec<_>>();
        assert_eq!(new_nodes.len(), 1, "a shared stop is written once");
        assert!(new_nodes[0].upload);
        let mut relation_ids = document.relations().iter().map(|r| r.id).collect::<Vec<_>>();
        assert!(relation_ids.iter().all(|id| *id < 0));
        relation_ids.push(new_nodes[0].id);
        relation_ids.sort();
        relation_ids.dedup();
        assert_eq!(relation_ids.len(), 4, "temporary ids are unique");
        let master = match document.relations().last() {
            Some(master) => master,
            None => panic!("no relation written"),
        };
        let trip_ids = document.relations()[..2].iter().map(|r| r.id).collect::<Vec<_>>();
        let member_ids = master.members.iter().map(|m| m.reference).collect::<Vec<_>>();
        assert_eq!(member_ids, trip_ids);
        for trip in document.relations()[..2].iter() {
            assert!(trip.members.iter().any(|m| m.reference == new_nodes[0].id));
            assert!(trip.members.iter().any(|m| m.reference == 101));
        }
    }

    #[test]
    fn test_trip_without_terminal_is_reported() {
        let mut map = map();
        let route = RouteIdx(0);
        let mut broken_new = OsmTrip::new(created(&[("ref", "12-S"), ("to", "Berri")]));
        broken_new.push_stop(TripStop::platform(StopIdx(1)));
        map.add_trip(route, broken_new);
        map.trip_mut(TripIdx(0)).element.tags = OsmTags::from_iter([("ref", "12-N")]);
        map.trip_mut(TripIdx(0)).element.mark_modified();
        let export = match JosmDocument::from_modified_routes(&map, &[route]) {
            Some(export) => export,
            None => panic!("the route should be exported"),
        };
        assert_eq!(export.failures.len(), 2);
        assert!(matches!(
            &export.failures[1],
            ExportError::MissingTerminal { tag: "from", .. }
        ));
        let master = relation(&export.document, 1000);
        let members = master.members.iter().map(|m| m.reference).collect::<Vec<_>>();
        assert_eq!(members, vec![2000], "existing trips stay members, new ones are dropped");
        assert_eq!(export.document.relations().len(), 1);
    }

    #[test]
    fn test_import_error_is_reported() {
        let mut map = map();
        map.trip_mut(TripIdx(0))
            .set_import_error(String::from("unexpected member role 'foo'"));
        map.route_mut(RouteIdx(0)).set_name("Bus 12");
        let export = match JosmDocument::from_modified_routes(&map, &[RouteIdx(0)]) {
            Some(export) => export,
            None => panic!("the route should be exported"),
        };
        assert!(matches!(
            &export.failures[0],
            ExportError::IncompleteTrip { .. }
        ));
    }

    #[test]
    fn test_drawn_way() {
        let mut map = map();
        let mut trip = OsmTrip::new(created(&[("from", "Berri"), ("to", "Sherbrooke")]));
        trip.push_stop(TripStop::platform(StopIdx(0)));
        trip.push_way(TripWay::Drawn(vec![(45.5, -73.56), (45.51, -73.57)]));
        map.add_trip(RouteIdx(0), trip);
        let export = match JosmDocument::from_modified_routes(&map, &[RouteIdx(0)]) {
            Some(export) => export,
            None => panic!("the route should be exported"),
        };
        let document = export.document;
        assert_eq!(document.ways().len(), 1);
        let way = &document.ways()[0];
        assert!(way.upload);
        assert_eq!(way.node_refs.len(), 2);
        for node in way.node_refs.iter() {
            assert!(document.nodes().iter().any(|n| n.id == *node && n.upload));
        }
    }

    #[test]
    fn test_write_xml() {
        let mut map = map();
        map.trip_mut(TripIdx(0)).set_name("Bus 12 & co");
        let export = match JosmDocument::from_modified_routes(&map, &[RouteIdx(0)]) {
            Some(export) => export,
            None => panic!("a modified route should be exported"),
        };
        let mut buffer = vec![];
        if let Err(e) = export.document.write(&mut buffer) {
            panic!("{e}");
        }
        let xml = match String::from_utf8(buffer) {
            Ok(xml) => xml,
            Err(e) => panic!("{e}"),
        };
        assert!(xml.contains("<osm version=\"0.6\" generator=\"gtfs-osm\">"));
        assert!(xml.contains(
            "<node id=\"101\" version=\"3\" lat=\"45.5000000\" lon=\"-73.5600000\">"
        ));
        assert!(xml.contains("<relation id=\"2000\" action=\"modify\" visible=\"true\" version=\"3\">"));
        assert!(xml.contains("<relation id=\"1000\" version=\"3\">"));
        assert!(xml.contains("<member type=\"node\" ref=\"99\" role=\"stop\"/>"));
        assert!(xml.contains("<tag k=\"name\" v=\"Bus 12 &amp; co\"/>"));
        assert!(xml.trim_end().ends_with("</osm>"));
    }

    #[test]
    fn test_from_stops() {
        let stops = vec![
            OsmStop::new(existing(101, &[("ref", "S1")]), 45.5, -73.56),
            OsmStop::new(created(&[("ref", "S2")]), 45.6, -73.5),
            OsmStop::new(created(&[("ref", "S3")]), 45.7, -73.5),
        ];
        let document = JosmDocument::from_stops(stops.iter());
        let ids = document.nodes().iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![101, -1, -2]);
        assert!(document.relations().is_empty());
    }
}
