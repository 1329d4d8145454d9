//! Topic and Question models under a course.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A topic document at `courses/{course}/topics/{topic}`.
///
/// The id is the legacy topic id, carried over unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub title: String,
    pub description: String,
    /// Copied verbatim from the legacy document when present.
    pub created_at: JsonValue,
}

/// A question document at `courses/{course}/topics/{topic}/questions/{question}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub answer: String,
    pub created_at: JsonValue,
}
