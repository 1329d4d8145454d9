//! Content migrations from the legacy flat layout to the course layout.
//!
//! Legacy layout:
//!
//! ```text
//! java_topics/{topicId}                         { title, description, createdAt }
//! java_topics/{topicId}/questions/{questionId}  { question, answer, createdAt }
//! ```
//!
//! Course layout:
//!
//! ```text
//! courses/{courseId}                                          { name, description, icon, color, slug, createdAt, topicCount }
//! courses/{courseId}/topics/{topicId}                         { title, description, createdAt }
//! courses/{courseId}/topics/{topicId}/questions/{questionId}  { question, answer, createdAt }
//! ```
//!
//! Migrations are:
//! - **One-directional**: the legacy tree is read, never modified or deleted
//! - **Id-preserving**: topic and question ids are copied verbatim
//! - **Overwriting**: destination documents are fully replaced, so re-runs
//!   rewrite the same content at the same paths
//! - **Sequential**: every read and write is awaited before the next starts
//! - **Not resumable**: a failed run stops where it failed; re-running starts
//!   over from the first topic

mod course;
pub mod defaults;
mod result;
mod seed;
mod verify;

pub use course::{CourseMigrator, MigrationOptions, TopicCountPolicy, WriteMode};
pub use result::{MigrationOutcome, MigrationResult, SeedReport, SeedResult, Tally};
pub use seed::{SampleCourseSeeder, SeedMode};
pub use verify::{CourseVerifier, VerifyIssue, VerifyReport};

use crate::error::AppError;
use crate::store::{CollectionPath, DocPath};

/// Top-level collection holding every course.
pub const COURSES: &str = "courses";
/// Sub-collection of a course holding its topics.
pub const TOPICS: &str = "topics";
/// Sub-collection of a topic holding its questions (same name in both layouts).
pub const QUESTIONS: &str = "questions";

pub const TOPIC_COUNT: &str = "topicCount";

/// Resolved source and destination paths for one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseLayout {
    /// Legacy topic collection, e.g. `java_topics`.
    pub legacy: CollectionPath,
    pub course_id: String,
    /// `courses/{courseId}`
    pub course: DocPath,
    /// `courses/{courseId}/topics`
    pub topics: CollectionPath,
}

impl CourseLayout {
    pub fn new(legacy_collection: &str, course_id: &str) -> Result<Self, AppError> {
        let legacy = CollectionPath::parse(legacy_collection)?;
        let course = CollectionPath::root(COURSES)?.doc(course_id)?;
        let topics = course.collection(TOPICS)?;
        Ok(Self {
            legacy,
            course_id: course_id.to_string(),
            course,
            topics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_paths() {
        let layout = CourseLayout::new("java_topics", "java").unwrap();
        assert_eq!(layout.legacy.to_string(), "java_topics");
        assert_eq!(layout.course.to_string(), "courses/java");
        assert_eq!(layout.topics.to_string(), "courses/java/topics");
    }

    #[test]
    fn test_layout_rejects_empty_course_id() {
        assert!(matches!(
            CourseLayout::new("java_topics", ""),
            Err(AppError::InvalidPath { .. })
        ));
    }

    #[test]
    fn test_layout_rejects_document_as_legacy_collection() {
        assert!(CourseLayout::new("java_topics/t1", "java").is_err());
    }
}
