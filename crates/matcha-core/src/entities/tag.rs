//! Interest tags

use serde::Serialize;

use crate::value_objects::TagId;

/// A named interest users can attach to themselves
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// A tag with the number of users carrying it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagUsage {
    pub id: TagId,
    pub name: String,
    pub usage_count: i64,
}

impl Tag {
    /// Canonical form under which a tag name is stored and matched
    pub fn normalize(name: &str) -> String {
        name.trim().trim_start_matches('#').to_lowercase()
    }
}
