use super::AppError;
use crate::config::ImportConfiguration;
use gtfs_osm::{
    conflation::{ConflationError, RouteConflator, RouteResolver},
    josm::{JosmDocument, RouteExport},
    merge::{MergeEngine, MergeError},
    model::{gtfs::FeedSchedule, osm::OsmSchedule, schedule::RouteIdx},
};
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::{fs::File, io::BufWriter};

static REF_SEPARATOR: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| Regex::new(r"[,;\s]+"));

/// splits a reference list such as `12,13 55` into its references.
pub fn parse_ref_list(refs: &str) -> Result<Vec<String>, AppError> {
    let separator = REF_SEPARATOR
        .as_ref()
        .map_err(|e| AppError::ConfigurationError(format!("invalid reference separator: {e}")))?;
    Ok(separator
        .split(refs.trim())
        .filter(|r| !r.is_empty())
        .map(String::from)
        .unique()
        .collect_vec())
}

/// feed routes named in `route_refs`, or every feed route.
pub fn select_feed_routes(
    feed: &FeedSchedule,
    map: &OsmSchedule,
    route_refs: Option<&[String]>,
) -> Vec<RouteIdx> {
    match route_refs {
        None => feed.routes().map(|(idx, _)| idx).collect_vec(),
        Some(refs) => {
            let conflator = RouteConflator::new(feed, map);
            refs.iter()
                .flat_map(|r| {
                    let routes = conflator.feed_routes_by_ref(r);
                    if routes.is_empty() {
                        log::warn!("route {r} is not in the GTFS feed");
                    }
                    routes
                })
                .unique()
                .collect_vec()
        }
    }
}

/// feed routes with no counterpart on the map.
pub fn missing_feed_routes(feed: &FeedSchedule, map: &OsmSchedule) -> Vec<RouteIdx> {
    let routes = RouteConflator::new(feed, map).routes_only_in_feed();
    log::info!("{} GTFS routes are not in OSM", routes.len());
    routes
}

/// adds a map route for each feed route. a route that cannot be built is
/// logged and skipped. returns the map routes created.
pub fn create_routes(
    feed: &FeedSchedule,
    map: &mut OsmSchedule,
    feed_routes: &[RouteIdx],
    conf: &ImportConfiguration,
) -> Vec<RouteIdx> {
    let mut engine =
        MergeEngine::new(feed, map, conf.missing_stop_policy).with_shapes(conf.include_shapes);
    let mut created = vec![];
    for feed_route in feed_routes.iter() {
        match engine.create_route(*feed_route) {
            Ok(idx) => created.push(idx),
            Err(e) => log::error!("route {}: {e}", feed.route(*feed_route).ref_code),
        }
    }
    created
}

/// merges each feed route into the map route it matches, or creates it when
/// the map has none. errors are isolated per route, except a cancelled
/// route selection which stops the run. returns the map routes merged or
/// created.
pub fn update_routes(
    feed: &FeedSchedule,
    map: &mut OsmSchedule,
    feed_routes: &[RouteIdx],
    resolver: &mut dyn RouteResolver,
    conf: &ImportConfiguration,
) -> Result<Vec<RouteIdx>, AppError> {
    let mut touched = vec![];
    for feed_route in feed_routes.iter() {
        let route = feed.route(*feed_route);
        let target = RouteConflator::new(feed, map).resolve_route(route, resolver);
        let mut engine =
            MergeEngine::new(feed, map, conf.missing_stop_policy).with_shapes(conf.include_shapes);
        match target {
            Err(ConflationError::Cancelled) => return Err(ConflationError::Cancelled.into()),
            Err(e) => log::error!("route {}: {e}", route.ref_code),
            Ok(None) => {
                log::info!("route {} is not in OSM, creating it", route.ref_code);
                match engine.create_route(*feed_route) {
                    Ok(idx) => touched.push(idx),
                    Err(e) => log::error!("route {}: {e}", route.ref_code),
                }
            }
            Ok(Some(map_route)) => match engine.merge_route(map_route, *feed_route) {
                Ok(outcome) if outcome.changed() => {
                    log::info!(
                        "route {}: {} trips updated, {} trips created",
                        route.ref_code,
                        outcome.updated_trips.len(),
                        outcome.created_trips.len()
                    );
                    touched.push(map_route);
                }
                Ok(_) => log::info!("route {} is up to date", route.ref_code),
                Err(e @ MergeError::UnreconciledTrips { .. }) if conf.ignore_unreconciled_trips => {
                    log::warn!("{e}");
                    touched.push(map_route);
                }
                Err(e) => log::error!("route {}: {e}", route.ref_code),
            },
        }
    }
    Ok(touched)
}

/// writes the modified routes among `routes` to `output_file`. nothing is
/// written when none was modified.
pub fn write_routes(
    map: &OsmSchedule,
    routes: &[RouteIdx],
    output_file: &str,
) -> Result<Option<RouteExport>, AppError> {
    let export = match JosmDocument::from_modified_routes(map, routes) {
        Some(export) => export,
        None => {
            log::warn!("no route was modified, {output_file} not written");
            return Ok(None);
        }
    };
    for failure in export.failures.iter() {
        log::warn!("{failure}");
    }
    let file = File::create(output_file)?;
    export.document.write(BufWriter::new(file))?;
    log::info!("wrote {} routes to {output_file}", export.routes.len());
    Ok(Some(export))
}
