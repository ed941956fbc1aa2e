mod merge_engine;
mod merge_error;
mod merge_outcome;
mod missing_stop_policy;
mod stop_merge;
pub mod transit_tags;

pub use merge_engine::MergeEngine;
pub use merge_error::MergeError;
pub use merge_outcome::MergeOutcome;
pub use missing_stop_policy::MissingStopPolicy;
pub use stop_merge::merge_stop;
