use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// metadata attributes of a map element. they are not edited, only carried
/// back into the edit document so the editor can upload a new version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OsmAttributes {
    pub changeset: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
    pub uid: Option<String>,
    pub user: Option<String>,
    pub version: Option<String>,
}

impl OsmAttributes {
    /// sets an attribute read from an OSM document. unknown keys and
    /// timestamps that do not parse are ignored.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "changeset" => self.changeset = Some(value.to_string()),
            "uid" => self.uid = Some(value.to_string()),
            "user" => self.user = Some(value.to_string()),
            "version" => self.version = Some(value.to_string()),
            "timestamp" => {
                self.timestamp = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
                    .ok()
                    .map(|t| t.and_utc())
            }
            _ => {}
        }
    }

    /// attributes as they are written to an OSM document.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![];
        if let Some(changeset) = &self.changeset {
            pairs.push(("changeset", changeset.clone()));
        }
        if let Some(timestamp) = &self.timestamp {
            pairs.push(("timestamp", timestamp.format(TIMESTAMP_FORMAT).to_string()));
        }
        if let Some(uid) = &self.uid {
            pairs.push(("uid", uid.clone()));
        }
        if let Some(user) = &self.user {
            pairs.push(("user", user.clone()));
        }
        if let Some(version) = &self.version {
            pairs.push(("version", version.clone()));
        }
        pairs
    }
}
