use crate::model::schedule::RouteKey;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConflationError {
    #[error("{count} map routes share the key ({key}), merge them in the map first")]
    DuplicateMapRoutes { key: RouteKey, count: usize },
    #[error("route selection cancelled")]
    Cancelled,
    #[error("failure selecting a route: {0}")]
    ResolverError(String),
}
