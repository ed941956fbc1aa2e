//! gzip compressed JSON snapshots of loaded schedules, so that later runs
//! skip parsing the feed or querying the map.
mod cache_error;
mod cache_ops;

pub use cache_error::CacheError;
pub use cache_ops::{read_cache, write_cache, CacheEnvelope};
