use crate::model::schedule::RouteIdx;

/// result of matching a feed route against the map routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    /// a single map route shares reference, network and operator
    Exact(RouteIdx),
    /// no exact match, but these map routes share the reference code
    Candidates(Vec<RouteIdx>),
    /// the route is not in the map
    NotFound,
}
