use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// key/value tags of a map element, kept sorted by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsmTags(BTreeMap<String, String>);

impl OsmTags {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// writes a tag. returns true only if the stored value changed.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        match self.0.get(key) {
            Some(current) if current == value => false,
            _ => {
                self.0.insert(key.to_string(), value.to_string());
                true
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OsmTags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        OsmTags(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// generates typed getters and setters over the tags of an element. each
/// entry maps a logical attribute to its tag key. setters go through
/// [`super::OsmElement::set_tag`] and return whether the value changed.
macro_rules! tag_accessors {
    ($($getter:ident, $setter:ident => $key:literal;)*) => {
        $(
            pub fn $getter(&self) -> Option<&str> {
                self.element.tags.get($key)
            }

            pub fn $setter(&mut self, value: &str) -> bool {
                self.element.set_tag($key, value)
            }
        )*
    };
}

pub(crate) use tag_accessors;
