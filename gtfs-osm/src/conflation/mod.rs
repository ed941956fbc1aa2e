mod conflation_error;
mod route_conflator;
mod route_match;
mod route_resolver;
mod stop_conflator;

pub use conflation_error::ConflationError;
pub use route_conflator::RouteConflator;
pub use route_match::RouteMatch;
pub use route_resolver::{RouteCandidate, RouteResolver, ScriptedAnswer, ScriptedResolver, SkipAmbiguous};
pub use stop_conflator::{StopConflator, DEFAULT_MAX_STOP_DISTANCE_METERS};
