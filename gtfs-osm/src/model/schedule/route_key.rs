use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// composite natural key of a route. reference codes alone collide between
/// operators serving the same area, so matching across sources uses all three.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub ref_code: Option<String>,
    pub network: Option<String>,
    pub operator: Option<String>,
}

impl RouteKey {
    pub fn new(ref_code: Option<&str>, network: Option<&str>, operator: Option<&str>) -> Self {
        Self {
            ref_code: ref_code.map(String::from),
            network: network.map(String::from),
            operator: operator.map(String::from),
        }
    }
}

impl Display for RouteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ref={} network={} operator={}",
            self.ref_code.as_deref().unwrap_or("<none>"),
            self.network.as_deref().unwrap_or("<none>"),
            self.operator.as_deref().unwrap_or("<none>"),
        )
    }
}
