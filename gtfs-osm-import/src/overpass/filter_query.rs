use super::FilterOp;
use gtfs_osm::model::osm::OsmTags;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize,
};
use std::{
    fmt::{self, Display},
    str::FromStr,
};

static QUERY_REGEX: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r#"^\["([\w:*]+)"(?:(=|~)"([^"]*)")?\]$"#));

#[derive(Debug, Clone, PartialEq, Eq)]
/// represents a single tag filter of an overpass API query, such as
/// `["public_transport"="platform"]` or `["ref"]`.
/// see <https://wiki.openstreetmap.org/wiki/Overpass_API/Language_Guide#Tag_request_clauses_(or_%22tag_filters%22)>
pub struct FilterQuery {
    /// the key in the tag's key/value pair to match against
    tag: String,
    /// operation/predicate used on this query
    op: FilterOp,
    /// the values we are expecting. if empty, then simply
    /// any value set at this tag returns true
    values: Vec<String>,
}

impl FilterQuery {
    /// `["tag"="value"]`
    pub fn equals(tag: &str, value: &str) -> Self {
        Self {
            tag: tag.to_string(),
            op: FilterOp::Equals,
            values: vec![value.to_string()],
        }
    }

    /// `["tag"]`
    pub fn exists(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            op: FilterOp::Equals,
            values: vec![],
        }
    }

    /// evaluates the filter against the tags of an element. a regular
    /// expression filter accepts any of its alternatives exactly.
    pub fn matches(&self, tags: &OsmTags) -> bool {
        match tags.get(&self.tag) {
            None => false,
            Some(_) if self.values.is_empty() => true,
            Some(value) => self.values.iter().any(|v| v == value),
        }
    }
}

impl Display for FilterQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.values.is_empty() {
            return write!(f, "[\"{}\"]", self.tag);
        }
        let op = match self.values.len() {
            1 => self.op.clone(),
            _ => FilterOp::Matches,
        };
        write!(f, "[\"{}\"{}\"{}\"]", self.tag, op, self.values.iter().join("|"))
    }
}

impl FromStr for FilterQuery {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = QUERY_REGEX
            .as_ref()
            .map_err(|e| format!("internal error building overpass query regex: {e}"))?;
        let groups = re
            .captures(s.trim())
            .ok_or_else(|| format!("unable to parse overpass filter: '{s}'"))?;
        let tag = String::from(&groups[1]);
        match (groups.get(2), groups.get(3)) {
            (Some(op), Some(values)) => Ok(FilterQuery {
                tag,
                op: FilterOp::from_str(op.as_str())?,
                values: values.as_str().split('|').map(String::from).collect(),
            }),
            _ => Ok(FilterQuery::exists(&tag)),
        }
    }
}

struct FilterQueryVisitor;

impl Visitor<'_> for FilterQueryVisitor {
    type Value = FilterQuery;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an overpass tag filter such as [\"public_transport\"=\"platform\"]")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        FilterQuery::from_str(v).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for FilterQuery {
    fn deserialize<D>(deserializer: D) -> Result<FilterQuery, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(FilterQueryVisitor)
    }
}

impl Serialize for FilterQuery {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
