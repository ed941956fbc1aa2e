use crate::{cache::CacheError, gtfs::FeedError, overpass::OverpassError};
use gtfs_osm::{
    conflation::ConflationError, josm::ExportError, merge::MergeError,
    model::schedule::ScheduleError,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failure reading run configuration: {0}")]
    ConfigurationError(String),
    #[error("no {0} source given")]
    MissingSource(String),
    #[error("failure loading GTFS feed: {source}")]
    FeedError {
        #[from]
        source: FeedError,
    },
    #[error("failure loading OSM data: {source}")]
    OverpassError {
        #[from]
        source: OverpassError,
    },
    #[error(transparent)]
    CacheError {
        #[from]
        source: CacheError,
    },
    #[error(transparent)]
    ScheduleError {
        #[from]
        source: ScheduleError,
    },
    #[error(transparent)]
    ConflationError {
        #[from]
        source: ConflationError,
    },
    #[error(transparent)]
    MergeError {
        #[from]
        source: MergeError,
    },
    #[error("failure writing JOSM document: {source}")]
    ExportError {
        #[from]
        source: ExportError,
    },
    #[error("failure writing output: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
}
