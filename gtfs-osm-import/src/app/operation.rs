use super::{route_ops, stop_ops, AppError, ConsoleResolver, ScheduleSources};
use crate::{cache::write_cache, config::ImportConfiguration};
use clap::Subcommand;
use gtfs_osm::conflation::{RouteResolver, SkipAmbiguous};
use std::{fs::File, io::BufWriter};

#[derive(Debug, Clone, Subcommand)]
pub enum Operation {
    /// platforms of the feed
    Stops {
        #[command(subcommand)]
        op: StopOperation,
    },
    /// bus routes of the feed
    Routes {
        #[command(subcommand)]
        op: RouteOperation,
    },
    /// save loaded schedules for later runs
    Cache {
        #[command(subcommand)]
        op: CacheOperation,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum StopOperation {
    /// write feed stops as new OSM platforms
    Export {
        #[arg(long, help = "JOSM document to write")]
        output_file: String,
        #[arg(long, help = "comma separated stop references to export")]
        stop_ref: Option<String>,
        #[arg(long, help = "export only the stops missing in OSM")]
        only_missing: bool,
    },
    /// report data problems of the feed and OSM stops
    Inspect,
}

#[derive(Debug, Clone, Subcommand)]
pub enum RouteOperation {
    /// write feed routes as new OSM routes
    Export {
        #[arg(long, help = "JOSM document to write")]
        output_file: String,
        #[arg(long, help = "comma separated route references to export")]
        route_ref: Option<String>,
    },
    /// write the feed routes missing in OSM as new OSM routes
    ExportMissing {
        #[arg(long, help = "JOSM document to write")]
        output_file: String,
    },
    /// update OSM routes from the feed, creating the missing ones
    Update {
        #[arg(long, help = "JOSM document to write")]
        output_file: String,
        #[arg(long, help = "comma separated route references to update")]
        route_ref: Option<String>,
        #[arg(long, help = "ask which OSM route to update when several match")]
        interactive: bool,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum CacheOperation {
    /// load the GTFS feed and save its schedule
    Gtfs {
        #[arg(long)]
        output_file: String,
    },
    /// query overpass around the feed and save the OSM XML response
    OsmXml {
        #[arg(long)]
        output_file: String,
    },
    /// load the OSM schedule around the feed and save it
    Osm {
        #[arg(long)]
        output_file: String,
    },
}

impl Operation {
    pub fn run(&self, sources: &ScheduleSources, conf: &ImportConfiguration) -> Result<(), AppError> {
        match self {
            Operation::Stops { op } => op.run(sources, conf),
            Operation::Routes { op } => op.run(sources, conf),
            Operation::Cache { op } => op.run(sources, conf),
        }
    }
}

impl StopOperation {
    pub fn run(&self, sources: &ScheduleSources, conf: &ImportConfiguration) -> Result<(), AppError> {
        let feed = sources.load_feed_stops(conf)?;
        let map = sources.load_map_stops(conf, &feed)?;
        match self {
            StopOperation::Export {
                output_file,
                stop_ref,
                only_missing,
            } => {
                let stop_refs = stop_ref
                    .as_deref()
                    .map(route_ops::parse_ref_list)
                    .transpose()?;
                let export =
                    stop_ops::export_stops(&feed, &map, stop_refs.as_deref(), *only_missing);
                if !export.unresolved.is_empty() {
                    log::warn!(
                        "{} GTFS stops are only partly in OSM and were not exported",
                        export.unresolved.len()
                    );
                }
                if export.document.is_empty() {
                    log::warn!("no stop to export, {output_file} not written");
                    return Ok(());
                }
                export
                    .document
                    .write(BufWriter::new(File::create(output_file)?))?;
                log::info!(
                    "wrote {} stops to {output_file}",
                    export.document.nodes().len()
                );
                Ok(())
            }
            StopOperation::Inspect => {
                let issues = stop_ops::inspect_stops(&feed, &map, conf.max_stop_distance_meters);
                if issues.is_empty() {
                    println!("no issue found");
                } else {
                    print!("{}", issues.report());
                }
                Ok(())
            }
        }
    }
}

impl RouteOperation {
    pub fn run(&self, sources: &ScheduleSources, conf: &ImportConfiguration) -> Result<(), AppError> {
        match self {
            RouteOperation::Export {
                output_file,
                route_ref,
            } => {
                let route_refs = route_ref
                    .as_deref()
                    .map(route_ops::parse_ref_list)
                    .transpose()?;
                let feed = sources.load_feed(conf, route_refs.as_deref())?;
                let mut map = sources.load_map(conf, &feed)?;
                let feed_routes = route_ops::select_feed_routes(&feed, &map, route_refs.as_deref());
                let created = route_ops::create_routes(&feed, &mut map, &feed_routes, conf);
                route_ops::write_routes(&map, &created, output_file)?;
                Ok(())
            }
            RouteOperation::ExportMissing { output_file } => {
                let feed = sources.load_feed(conf, None)?;
                let mut map = sources.load_map(conf, &feed)?;
                let feed_routes = route_ops::missing_feed_routes(&feed, &map);
                let created = route_ops::create_routes(&feed, &mut map, &feed_routes, conf);
                route_ops::write_routes(&map, &created, output_file)?;
                Ok(())
            }
            RouteOperation::Update {
                output_file,
                route_ref,
                interactive,
            } => {
                let route_refs = route_ref
                    .as_deref()
                    .map(route_ops::parse_ref_list)
                    .transpose()?;
                let feed = sources.load_feed(conf, route_refs.as_deref())?;
                let mut map = sources.load_map(conf, &feed)?;
                let feed_routes = route_ops::select_feed_routes(&feed, &map, route_refs.as_deref());
                let stdin = std::io::stdin();
                let mut console = ConsoleResolver::new(stdin.lock(), std::io::stdout());
                let mut skip = SkipAmbiguous;
                let resolver: &mut dyn RouteResolver = if *interactive {
                    &mut console
                } else {
                    &mut skip
                };
                let touched =
                    route_ops::update_routes(&feed, &mut map, &feed_routes, resolver, conf)?;
                route_ops::write_routes(&map, &touched, output_file)?;
                Ok(())
            }
        }
    }
}

impl CacheOperation {
    pub fn run(&self, sources: &ScheduleSources, conf: &ImportConfiguration) -> Result<(), AppError> {
        match self {
            CacheOperation::Gtfs { output_file } => {
                let feed = sources.load_feed(conf, None)?;
                write_cache(&feed, output_file)?;
                Ok(())
            }
            CacheOperation::OsmXml { output_file } => {
                let feed = sources.load_feed_stops(conf)?;
                let xml = sources.query_map_document(conf, &feed)?;
                std::fs::write(output_file, xml)?;
                log::info!("wrote OSM document to {output_file}");
                Ok(())
            }
            CacheOperation::Osm { output_file } => {
                let feed = sources.load_feed_stops(conf)?;
                let map = sources.load_map(conf, &feed)?;
                write_cache(&map, output_file)?;
                Ok(())
            }
        }
    }
}
