//! Field defaulting for legacy documents.
//!
//! Legacy topics and questions were written by hand through the old admin
//! screens and are often incomplete. Missing values are filled in rather
//! than rejected. A value counts as missing when it is absent, `null`,
//! `false`, `0` or the empty string.

use serde_json::Value as JsonValue;

use crate::models::{Question, Timestamp, Topic};
use crate::store::Fields;

/// Title given to legacy topics that have none.
pub const UNTITLED_TOPIC: &str = "Untitled Topic";

pub const CREATED_AT: &str = "createdAt";

fn is_missing(value: Option<&JsonValue>) -> bool {
    match value {
        None | Some(JsonValue::Null) | Some(JsonValue::Bool(false)) => true,
        Some(JsonValue::String(s)) => s.is_empty(),
        Some(JsonValue::Number(n)) => n.as_f64() == Some(0.0),
        Some(_) => false,
    }
}

/// Text field value, rendering non-string scalars. Arrays and objects
/// cannot be shown as text and count as missing.
fn text_or(fields: &Fields, key: &str, default: &str) -> String {
    let value = fields.get(key);
    if is_missing(value) {
        return default.to_string();
    }
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Number(n)) => n.to_string(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        _ => default.to_string(),
    }
}

/// Returns true if the source carries its own creation timestamp.
pub fn has_created_at(fields: &Fields) -> bool {
    !is_missing(fields.get(CREATED_AT))
}

fn created_at_or(fields: &Fields, now: Timestamp) -> JsonValue {
    match fields.get(CREATED_AT) {
        Some(value) if has_created_at(fields) => value.clone(),
        _ => now.to_value(),
    }
}

/// Builds a destination topic from legacy topic fields.
pub fn normalize_topic(fields: &Fields, now: Timestamp) -> Topic {
    Topic {
        title: text_or(fields, "title", UNTITLED_TOPIC),
        description: text_or(fields, "description", ""),
        created_at: created_at_or(fields, now),
    }
}

/// Builds a destination question from legacy question fields.
pub fn normalize_question(fields: &Fields, now: Timestamp) -> Question {
    Question {
        question: text_or(fields, "question", ""),
        answer: text_or(fields, "answer", ""),
        created_at: created_at_or(fields, now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_complete_topic_is_copied() {
        let now = Timestamp::now();
        let topic = normalize_topic(
            &fields(json!({
                "title": "Intro",
                "description": "Basics",
                "createdAt": {"seconds": 1700000000, "nanoseconds": 0},
                "legacyOnly": true
            })),
            now,
        );

        assert_eq!(topic.title, "Intro");
        assert_eq!(topic.description, "Basics");
        assert_eq!(
            topic.created_at,
            json!({"seconds": 1700000000, "nanoseconds": 0})
        );
    }

    #[test]
    fn test_empty_topic_gets_defaults() {
        let now = Timestamp::now();
        let topic = normalize_topic(&Fields::new(), now);

        assert_eq!(topic.title, UNTITLED_TOPIC);
        assert_eq!(topic.description, "");
        assert_eq!(topic.created_at, now.to_value());
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let now = Timestamp::now();
        let topic = normalize_topic(
            &fields(json!({"title": "", "description": null, "createdAt": 0})),
            now,
        );

        assert_eq!(topic.title, UNTITLED_TOPIC);
        assert_eq!(topic.description, "");
        assert_eq!(topic.created_at, now.to_value());
    }

    #[test]
    fn test_scalar_text_is_rendered() {
        let topic = normalize_topic(&fields(json!({"title": 101})), Timestamp::now());
        assert_eq!(topic.title, "101");
    }

    #[test]
    fn test_structured_text_counts_as_missing() {
        let question = normalize_question(
            &fields(json!({"question": ["a", "b"], "answer": {"text": "x"}})),
            Timestamp::now(),
        );
        assert_eq!(question.question, "");
        assert_eq!(question.answer, "");
    }

    #[test]
    fn test_question_defaults() {
        let now = Timestamp::now();
        let question = normalize_question(
            &fields(json!({"question": "What is X?", "createdAt": "2023-01-01"})),
            now,
        );

        assert_eq!(question.question, "What is X?");
        assert_eq!(question.answer, "");
        assert_eq!(question.created_at, json!("2023-01-01"));
    }

    #[test]
    fn test_has_created_at() {
        assert!(has_created_at(&fields(json!({"createdAt": "2023-01-01"}))));
        assert!(!has_created_at(&fields(json!({"createdAt": ""}))));
        assert!(!has_created_at(&Fields::new()));
    }
}
