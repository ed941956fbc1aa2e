use super::{OsmAttributes, OsmId, OsmTags};
use serde::{Deserialize, Serialize};

/// state shared by every map element: identity, tags, metadata and the
/// modified flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsmElement {
    /// persistent identifier, None for elements created during a merge
    pub id: Option<OsmId>,
    pub tags: OsmTags,
    pub attributes: OsmAttributes,
    modified: bool,
}

impl OsmElement {
    /// an element loaded from the map dataset, unmodified.
    pub fn existing(id: OsmId, tags: OsmTags, attributes: OsmAttributes) -> Self {
        Self {
            id: Some(id),
            tags,
            attributes,
            modified: false,
        }
    }

    /// an element with no persistent identifier yet.
    pub fn created() -> Self {
        Self::default()
    }

    /// writes a tag and raises the modified flag if the value changed.
    /// setting a tag to its current value leaves the flag untouched.
    pub fn set_tag(&mut self, key: &str, value: &str) -> bool {
        let changed = self.tags.set(key, value);
        if changed {
            self.modified = true;
        }
        changed
    }

    pub fn mark_modified(&mut self) {
        self.modified = true;
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// true when the element has to be uploaded by the editor.
    pub fn needs_upload(&self) -> bool {
        self.is_new() || self.modified
    }
}
