use super::{FilterQuery, OverpassError};
use gtfs_osm::{
    model::osm::{
        OsmAttributes, OsmElement, OsmId, OsmRoute, OsmSchedule, OsmStop, OsmTags, OsmTrip,
        StopPosition, TripStop, TripWay,
    },
    validation::Issue,
};
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// tags every platform is expected to carry, with their value when it is
/// fixed
const PLATFORM_CHECKS: [(&str, Option<&str>); 3] = [
    ("highway", Some("bus_stop")),
    ("bus", Some("yes")),
    ("name", None),
];

/// builds an [`OsmSchedule`] from an OSM XML document: every node is a
/// stop, every `route_master=bus` relation a route and each of its member
/// relations a trip.
pub struct OsmXmlReader {
    platform_filters: Vec<FilterQuery>,
}

impl OsmXmlReader {
    /// `platform_filters` recognizes the nodes whose tags are validated.
    pub fn new(platform_filters: Vec<FilterQuery>) -> Self {
        Self { platform_filters }
    }

    pub fn read_stops(&self, xml: &str) -> Result<OsmSchedule, OverpassError> {
        let document = Document::parse(xml)?;
        let mut schedule = OsmSchedule::new();
        self.read_nodes(&document, &mut schedule)?;
        Ok(schedule)
    }

    pub fn read(&self, xml: &str) -> Result<OsmSchedule, OverpassError> {
        let document = Document::parse(xml)?;
        let mut schedule = OsmSchedule::new();
        self.read_nodes(&document, &mut schedule)?;

        let relations = document
            .root_element()
            .children()
            .filter(|n| n.has_tag_name("relation"))
            .map(|n| parse_id(&n).map(|id| (id, n)))
            .collect::<Result<Vec<_>, OverpassError>>()?;
        let by_id: HashMap<i64, Node> = relations.iter().copied().collect();
        for (_, relation) in relations.iter() {
            if tag(relation, "route_master") != Some("bus") {
                continue;
            }
            let route = schedule.add_route(OsmRoute::new(element(relation)?));
            for member in members(relation, "relation") {
                let trip_id = parse_ref(&member)?;
                match by_id.get(&trip_id) {
                    Some(trip_relation) => {
                        let trip = build_trip(&schedule, trip_relation)?;
                        if let Some(reason) = trip.import_error() {
                            log::warn!("relation {trip_id}: {reason}");
                        }
                        schedule.add_trip(route, trip);
                    }
                    None => log::warn!(
                        "relation {trip_id} of route master {} is not in the document",
                        schedule.route(route).label()
                    ),
                }
            }
        }
        log::info!(
            "read {} OSM stops and {} routes",
            schedule.stops().len(),
            schedule.route_count()
        );
        Ok(schedule)
    }

    fn read_nodes(
        &self,
        document: &Document,
        schedule: &mut OsmSchedule,
    ) -> Result<(), OverpassError> {
        let root = document.root_element();
        if !root.has_tag_name("osm") {
            return Err(OverpassError::InvalidData(format!(
                "unexpected root element <{}>",
                root.tag_name().name()
            )));
        }
        for node in root.children().filter(|n| n.has_tag_name("node")) {
            let stop = OsmStop::new(
                element(&node)?,
                parse_attribute(&node, "lat")?,
                parse_attribute(&node, "lon")?,
            );
            if self.platform_filters.iter().all(|f| f.matches(&stop.element.tags)) {
                schedule.issues.extend(check_platform(&stop));
            }
            schedule.add_stop(stop);
        }
        Ok(())
    }
}

fn check_platform(stop: &OsmStop) -> Vec<Issue> {
    let osm_id = stop
        .element
        .id
        .map(|id| id.to_string())
        .unwrap_or_default();
    PLATFORM_CHECKS
        .iter()
        .filter_map(|(key, expected)| match (stop.element.tags.get(key), expected) {
            (None, _) => Some(Issue::AttributeMissing {
                osm_id: osm_id.clone(),
                tag: key.to_string(),
                expected: expected.map(String::from),
            }),
            (Some(current), Some(expected)) if current != *expected => {
                Some(Issue::InvalidAttributeValue {
                    osm_id: osm_id.clone(),
                    tag: key.to_string(),
                    current: current.to_string(),
                    expected: expected.to_string(),
                })
            }
            _ => None,
        })
        .collect()
}

/// interprets the members of a route relation in order. a stop position
/// applies to the platform following it. anything else than stop
/// positions, platforms and unnamed ways stops the interpretation and is
/// recorded as the import error of the trip.
fn build_trip(schedule: &OsmSchedule, relation: &Node) -> Result<OsmTrip, OverpassError> {
    let mut trip = OsmTrip::new(element(relation)?);
    let mut stop_position: Option<StopPosition> = None;
    for member in relation.children().filter(|n| n.has_tag_name("member")) {
        let member_ref = parse_ref(&member)?;
        let role = member.attribute("role").unwrap_or_default();
        match member.attribute("type") {
            Some("node") if role.starts_with("stop") => {
                stop_position = Some(StopPosition {
                    node: OsmId(member_ref),
                    role: role.to_string(),
                });
            }
            Some("node") if role.starts_with("platform") => {
                match schedule.stop_idx(&OsmId(member_ref)) {
                    Some(stop) => trip.push_stop(TripStop {
                        stop,
                        role: role.to_string(),
                        stop_position: stop_position.take(),
                    }),
                    None => {
                        trip.set_import_error(format!(
                            "stop with id <{member_ref}> missing in OSM dataset"
                        ));
                        break;
                    }
                }
            }
            Some("node") => {
                trip.set_import_error(format!("unexpected node role '{role}'"));
                break;
            }
            Some("way") => {
                if stop_position.is_some() {
                    trip.set_import_error(format!(
                        "stop position not followed by a platform before way {member_ref}"
                    ));
                    break;
                }
                if !role.is_empty() {
                    trip.set_import_error(format!("way {member_ref} has role '{role}'"));
                    break;
                }
                trip.push_way(TripWay::Existing(OsmId(member_ref)));
            }
            other => log::debug!(
                "relation {}: ignoring {} member {member_ref}",
                trip.label(),
                other.unwrap_or("untyped")
            ),
        }
    }
    Ok(trip)
}

fn element(node: &Node) -> Result<OsmElement, OverpassError> {
    let id = parse_id(node)?;
    let tags = node
        .children()
        .filter(|n| n.has_tag_name("tag"))
        .filter_map(|n| Some((n.attribute("k")?, n.attribute("v")?)))
        .collect::<OsmTags>();
    let mut attributes = OsmAttributes::default();
    for attribute in node.attributes() {
        attributes.set(attribute.name(), attribute.value());
    }
    Ok(OsmElement::existing(OsmId(id), tags, attributes))
}

fn members<'a, 'input>(
    relation: &Node<'a, 'input>,
    member_type: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    relation
        .children()
        .filter(move |n| n.has_tag_name("member") && n.attribute("type") == Some(member_type))
}

fn tag<'a>(node: &Node<'a, '_>, key: &str) -> Option<&'a str> {
    node.children()
        .filter(|n| n.has_tag_name("tag"))
        .find(|n| n.attribute("k") == Some(key))
        .and_then(|n| n.attribute("v"))
}

fn parse_id(node: &Node) -> Result<i64, OverpassError> {
    parse_attribute(node, "id")
}

fn parse_ref(node: &Node) -> Result<i64, OverpassError> {
    parse_attribute(node, "ref")
}

fn parse_attribute<T: std::str::FromStr>(node: &Node, name: &str) -> Result<T, OverpassError> {
    let value = node.attribute(name).ok_or_else(|| {
        OverpassError::InvalidData(format!(
            "<{}> element without '{name}' attribute",
            node.tag_name().name()
        ))
    })?;
    value.parse().map_err(|_| {
        OverpassError::InvalidData(format!(
            "invalid '{name}' attribute '{value}' on <{}> element",
            node.tag_name().name()
        ))
    })
}
