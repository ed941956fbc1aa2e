use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverpassError {
    #[error("overpass request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("overpass returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failure parsing OSM XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("invalid OSM data: {0}")]
    InvalidData(String),
}
