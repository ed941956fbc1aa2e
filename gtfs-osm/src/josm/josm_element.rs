use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberType {
    Node,
    Way,
    Relation,
}

impl Display for MemberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberType::Node => write!(f, "node"),
            MemberType::Way => write!(f, "way"),
            MemberType::Relation => write!(f, "relation"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JosmMember {
    pub member_type: MemberType,
    pub reference: i64,
    pub role: String,
}

impl JosmMember {
    pub fn new(member_type: MemberType, reference: i64, role: &str) -> Self {
        Self {
            member_type,
            reference,
            role: role.to_string(),
        }
    }
}

/// a node, way or relation as written to the document.
#[derive(Debug, Clone, PartialEq)]
pub struct JosmElement {
    pub element_type: MemberType,
    pub id: i64,
    /// marks the element as created or changed in this session
    pub upload: bool,
    pub attributes: Vec<(&'static str, String)>,
    /// (lat, lon), nodes only
    pub position: Option<(f64, f64)>,
    /// ways only
    pub node_refs: Vec<i64>,
    /// relations only
    pub members: Vec<JosmMember>,
    pub tags: Vec<(String, String)>,
}

impl JosmElement {
    pub fn new(element_type: MemberType, id: i64, upload: bool) -> Self {
        Self {
            element_type,
            id,
            upload,
            attributes: vec![],
            position: None,
            node_refs: vec![],
            members: vec![],
            tags: vec![],
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
