//! Course model and the inputs used to create courses.

use serde::{Deserialize, Serialize};

use super::Timestamp;

/// Static display fields of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseMetadata {
    /// Display name (e.g., "Java Programming").
    pub name: String,
    pub description: String,
    /// Short glyph or label shown next to the name.
    pub icon: String,
    /// Display color token (e.g., "#f89820").
    pub color: String,
}

/// A placeholder course to seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDescriptor {
    /// Document id under `courses/`.
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub slug: String,
}

impl CourseDescriptor {
    pub fn metadata(&self) -> CourseMetadata {
        CourseMetadata {
            name: self.name.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        }
    }
}

/// A course document at `courses/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Copy of the document id. Only seeded placeholders carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    /// Duplicate of the document id.
    pub slug: String,
    pub created_at: Timestamp,
    /// Number of topics under the course when it was last written by a
    /// migration or seed. Not kept live afterwards.
    pub topic_count: u64,
}

impl Course {
    pub fn new(
        slug: &str,
        metadata: &CourseMetadata,
        created_at: Timestamp,
        topic_count: u64,
    ) -> Self {
        Self {
            id: None,
            name: metadata.name.clone(),
            description: metadata.description.clone(),
            icon: metadata.icon.clone(),
            color: metadata.color.clone(),
            slug: slug.to_string(),
            created_at,
            topic_count,
        }
    }

    /// An empty placeholder course built from a seed descriptor.
    pub fn placeholder(descriptor: &CourseDescriptor, created_at: Timestamp) -> Self {
        Self {
            id: Some(descriptor.id.clone()),
            ..Self::new(&descriptor.slug, &descriptor.metadata(), created_at, 0)
        }
    }
}
