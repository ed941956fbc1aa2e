use super::{AppError, Operation, ScheduleSources};
use crate::config::ImportConfiguration;
use clap::Parser;

/// command line tool importing GTFS bus networks into OpenStreetMap through
/// JOSM edit session files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GtfsOsmApp {
    #[command(subcommand)]
    pub op: Operation,
    #[command(flatten)]
    pub sources: ScheduleSources,
    #[arg(long, global = true, help = "path to file with gtfs-osm import parameters")]
    pub configuration_file: Option<String>,
}

impl GtfsOsmApp {
    pub fn run(&self) -> Result<(), AppError> {
        let conf = match &self.configuration_file {
            None => Ok(ImportConfiguration::default()),
            Some(f) => {
                log::info!("reading gtfs-osm configuration from {f}");
                ImportConfiguration::try_from(f)
            }
        }?;
        self.op.run(&self.sources, &conf)
    }
}
