use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Enumerates the criteria used to decide that two feed stops
/// are duplicates of one another
#[derive(Serialize, Deserialize, Debug, ValueEnum, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateStopPolicy {
    /// identical coordinates; a differing name only logs a warning
    #[default]
    CoordinatesOnly,
    /// identical coordinates and identical names
    CoordinatesAndName,
}
