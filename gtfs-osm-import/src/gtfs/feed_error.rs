use super::RowError;
use gtfs_osm::model::schedule::ScheduleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failure reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failure reading {path}: {source}")]
    Csv { path: String, source: csv::Error },
    #[error("{0} has no rows")]
    EmptyFile(String),
    #[error("agency '{name}' ({id}) is not supported yet")]
    UnsupportedAgency { id: String, name: String },
    #[error("{file}, row {row}: {source}")]
    Row {
        file: String,
        row: usize,
        source: RowError,
    },
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}
