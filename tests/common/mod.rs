//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use curricula::models::{CourseDescriptor, CourseMetadata};
use curricula::store::backends::memory::InMemoryStore;
use curricula::store::{DocPath, DocumentWriter, Fields, SetOptions};
use serde_json::Value as JsonValue;

pub fn fields(value: JsonValue) -> Fields {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

pub fn doc(path: &str) -> DocPath {
    DocPath::parse(path).expect("valid document path")
}

pub async fn put(store: &InMemoryStore, path: &str, value: JsonValue) {
    store
        .set_document(&doc(path), fields(value), SetOptions::REPLACE)
        .await
        .expect("seed write failed");
}

/// Every stored document whose path starts with `prefix`.
pub async fn documents_under(store: &InMemoryStore, prefix: &str) -> BTreeMap<String, Fields> {
    store
        .documents()
        .await
        .into_iter()
        .map(|(path, fields)| (path.to_string(), fields))
        .filter(|(path, _)| path == prefix || path.starts_with(&format!("{}/", prefix)))
        .collect()
}

pub fn java_metadata() -> CourseMetadata {
    CourseMetadata {
        name: "Java Programming".to_string(),
        description: "Master Java".to_string(),
        icon: "☕".to_string(),
        color: "#f89820".to_string(),
    }
}

pub fn descriptor(id: &str, name: &str) -> CourseDescriptor {
    CourseDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("Learn {}", name),
        icon: "*".to_string(),
        color: "#000000".to_string(),
        slug: id.to_string(),
    }
}

/// The two-topic legacy tree used throughout the migration tests:
/// `t1` with one question and every field set, `t2` with only a title.
pub async fn legacy_store() -> InMemoryStore {
    let store = InMemoryStore::new();
    put(
        &store,
        "legacy/t1",
        serde_json::json!({
            "title": "Intro",
            "description": "Basics",
            "createdAt": "2023-05-01T10:00:00.000Z"
        }),
    )
    .await;
    put(
        &store,
        "legacy/t1/questions/q1",
        serde_json::json!({
            "question": "What is X?",
            "answer": "X is Y",
            "createdAt": "2023-05-02T10:00:00.000Z"
        }),
    )
    .await;
    put(&store, "legacy/t2", serde_json::json!({"title": "Advanced"})).await;
    store
}
