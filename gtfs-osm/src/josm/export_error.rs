use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("trip '{trip}' has no '{tag}' tag")]
    MissingTerminal { trip: String, tag: &'static str },
    #[error("trip '{trip}' was not completely read from OSM: {reason}")]
    IncompleteTrip { trip: String, reason: String },
    #[error("failure writing OSM document: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
