use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A canonical label. Two tags are the same tag when their names match,
/// whatever their ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub taggings_count: Option<u32>,
}

impl Tag {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            taggings_count: None,
        }
    }

    pub fn with_taggings_count(mut self, count: u32) -> Self {
        self.taggings_count = Some(count);
        self
    }

    pub fn count(&self) -> u32 {
        self.taggings_count.unwrap_or(0)
    }

    /// The name with everything but ASCII letters and digits removed.
    pub fn safe_name(&self) -> String {
        self.name.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Tag {}

impl Hash for Tag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// Request/Response DTOs
#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ResolveTagsRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub tag: Tag,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<Tag>,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub raw: String,
    pub normalized: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tags_with_same_name_are_equal() {
        let saved = Tag::new(1, "awesome");
        let fresh = Tag::new(0, "awesome");
        assert_eq!(saved, fresh);
        assert_ne!(saved, Tag::new(1, "epic"));

        let set: HashSet<Tag> = [saved, fresh].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(Tag::new(7, "cool").to_string(), "cool");
    }

    #[test]
    fn test_safe_name_and_count() {
        let tag = Tag::new(3, "c++ well-known").with_taggings_count(4);
        assert_eq!(tag.safe_name(), "cwellknown");
        assert_eq!(tag.count(), 4);
        assert_eq!(Tag::new(4, "epic").count(), 0);
    }

    #[test]
    fn test_serialization_omits_missing_count() {
        let json = serde_json::to_value(Tag::new(5, "epic")).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 5, "name": "epic" }));
    }
}
