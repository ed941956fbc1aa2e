//! Conflation and merge engine reconciling a GTFS transit feed with the
//! public transport relations of OpenStreetMap. Both sources are loaded into
//! a [`model::schedule::Schedule`], matched by the conflators, merged into the
//! map side by the [`merge::MergeEngine`], and the changed subset is written
//! as a JOSM edit session by [`josm::JosmDocument`].
pub mod conflation;
pub mod josm;
pub mod merge;
pub mod model;
pub mod validation;
