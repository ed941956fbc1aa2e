use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("failure accessing cache file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("failure decoding cache file {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}
