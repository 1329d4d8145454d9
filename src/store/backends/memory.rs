//! In-process document store.
//!
//! Holds every document in a single ordered map keyed by [`DocPath`], so a
//! collection listing is naturally ordered by document id. The store is a
//! cheap-to-clone handle; clones share state.
//!
//! Write-denial rules emulate the hosted store's security rules: a write at
//! or below a denied prefix fails with [`AppError::PermissionDenied`].

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::sync::{Mutex, RwLock};

use crate::error::AppError;
use crate::store::document::{Document, DocumentStream, Fields};
use crate::store::path::{CollectionPath, DocPath};
use crate::store::traits::{
    Batch, Direction, DocumentClient, DocumentReader, DocumentWriter, ListOptions, SetOptions,
};

#[derive(Debug, Default)]
struct State {
    documents: BTreeMap<DocPath, Fields>,
    denied: Vec<Vec<String>>,
}

impl State {
    fn check_writable(&self, path: &DocPath) -> Result<(), AppError> {
        if self.denied.iter().any(|prefix| path.starts_with(prefix)) {
            return Err(AppError::PermissionDenied(path.to_string()));
        }
        Ok(())
    }

    fn apply(&mut self, path: &DocPath, fields: Fields, options: SetOptions) {
        match self.documents.get_mut(path) {
            Some(existing) if options.merge => existing.extend(fields),
            _ => {
                self.documents.insert(path.clone(), fields);
            }
        }
    }
}

/// Shared in-memory document store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with the given documents.
    pub fn from_documents(documents: BTreeMap<DocPath, Fields>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State {
                documents,
                denied: Vec::new(),
            })),
        }
    }

    /// Copy of every stored document, ordered by path.
    pub async fn documents(&self) -> BTreeMap<DocPath, Fields> {
        self.state.read().await.documents.clone()
    }

    /// Number of stored documents across all collections.
    pub async fn len(&self) -> usize {
        self.state.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Rejects every subsequent write at or below `prefix`.
    ///
    /// `prefix` may name a collection or a document.
    pub async fn deny_writes_under(&self, prefix: &str) -> Result<(), AppError> {
        let segments = CollectionPath::parse(prefix)
            .map(|c| c.segments().to_vec())
            .or_else(|_| DocPath::parse(prefix).map(|d| d.segments().to_vec()))?;
        self.state.write().await.denied.push(segments);
        Ok(())
    }
}

/// Orders JSON values: missing < null < bool < number < string < other.
fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    fn rank(v: Option<&JsonValue>) -> u8 {
        match v {
            None => 0,
            Some(JsonValue::Null) => 1,
            Some(JsonValue::Bool(_)) => 2,
            Some(JsonValue::Number(_)) => 3,
            Some(JsonValue::String(_)) => 4,
            Some(_) => 5,
        }
    }

    match (a, b) {
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(x), Some(y)) if rank(a) == 5 && rank(b) == 5 => x.to_string().cmp(&y.to_string()),
        _ => rank(a).cmp(&rank(b)),
    }
}

#[async_trait]
impl DocumentReader for InMemoryStore {
    async fn list_documents(
        &self,
        collection: &CollectionPath,
        options: ListOptions,
    ) -> Result<DocumentStream<'_>, AppError> {
        let depth = collection.segments().len() + 1;
        let mut docs: Vec<Document> = {
            let state = self.state.read().await;
            state
                .documents
                .iter()
                .filter(|(path, _)| {
                    path.segments().len() == depth && path.starts_with(collection.segments())
                })
                .map(|(path, fields)| Document::new(path.clone(), fields.clone()))
                .collect()
        };

        if let Some(order) = &options.order_by {
            docs.sort_by(|a, b| {
                let ord = compare_values(a.get_raw(&order.field), b.get_raw(&order.field))
                    .then_with(|| a.id().cmp(b.id()));
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }
        if let Some(limit) = options.limit {
            docs.truncate(limit);
        }

        tracing::trace!("Listed {} documents in '{}'", docs.len(), collection);
        Ok(Box::pin(futures::stream::iter(docs.into_iter().map(Ok))))
    }

    async fn get_document(&self, path: &DocPath) -> Result<Option<Document>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .documents
            .get(path)
            .map(|fields| Document::new(path.clone(), fields.clone())))
    }
}

#[async_trait]
impl DocumentWriter for InMemoryStore {
    async fn set_document(
        &self,
        path: &DocPath,
        fields: Fields,
        options: SetOptions,
    ) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        state.check_writable(path)?;
        state.apply(path, fields, options);
        tracing::trace!("Wrote '{}' (merge: {})", path, options.merge);
        Ok(())
    }
}

struct PendingWrite {
    path: DocPath,
    fields: Fields,
    options: SetOptions,
}

/// Buffered writes against an [`InMemoryStore`], applied all-or-nothing.
pub struct MemoryBatch {
    store: InMemoryStore,
    pending: Mutex<Vec<PendingWrite>>,
}

impl MemoryBatch {
    /// Number of buffered writes.
    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DocumentWriter for MemoryBatch {
    async fn set_document(
        &self,
        path: &DocPath,
        fields: Fields,
        options: SetOptions,
    ) -> Result<(), AppError> {
        self.pending.lock().await.push(PendingWrite {
            path: path.clone(),
            fields,
            options,
        });
        Ok(())
    }
}

#[async_trait]
impl Batch for MemoryBatch {
    async fn commit(self) -> Result<(), AppError> {
        let pending = self.pending.into_inner();
        let mut state = self.store.state.write().await;

        // Check every write before applying any
        for write in &pending {
            state.check_writable(&write.path)?;
        }

        let count = pending.len();
        for write in pending {
            state.apply(&write.path, write.fields, write.options);
        }
        tracing::debug!("Committed batch of {} writes", count);
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        let discarded = self.pending.into_inner().len();
        tracing::debug!("Rolled back batch, discarded {} writes", discarded);
        Ok(())
    }
}

#[async_trait]
impl DocumentClient for InMemoryStore {
    type Batch<'a> = MemoryBatch;

    async fn begin(&self) -> Result<Self::Batch<'_>, AppError> {
        Ok(MemoryBatch {
            store: self.clone(),
            pending: Mutex::new(Vec::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::query::QueryExt;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    fn doc(path: &str) -> DocPath {
        DocPath::parse(path).unwrap()
    }

    fn coll(path: &str) -> CollectionPath {
        CollectionPath::parse(path).unwrap()
    }

    #[tokio::test]
    async fn test_listing_excludes_subcollections() {
        let store = InMemoryStore::new();
        for path in [
            "java_topics/t2",
            "java_topics/t1",
            "java_topics/t1/questions/q1",
            "java_topicsx/t9",
        ] {
            store
                .set_document(&doc(path), Fields::new(), SetOptions::REPLACE)
                .await
                .unwrap();
        }

        let docs = store.collection(&coll("java_topics")).fetch_all().await.unwrap();
        let ids: Vec<_> = docs.iter().map(|d| d.id()).collect();
        assert_eq!(ids, vec!["t1", "t2"]);

        let questions = store
            .collection(&coll("java_topics/t1/questions"))
            .fetch_all()
            .await
            .unwrap();
        assert_eq!(questions.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = InMemoryStore::new();
        let docs = store.collection(&coll("nothing")).fetch_all().await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_replace_drops_old_fields() {
        let store = InMemoryStore::new();
        let path = doc("courses/java");
        store
            .set_document(&path, fields(json!({"name": "Java", "topicCount": 3})), SetOptions::REPLACE)
            .await
            .unwrap();
        store
            .set_document(&path, fields(json!({"name": "Java 2"})), SetOptions::REPLACE)
            .await
            .unwrap();

        let stored = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(stored.fields(), &fields(json!({"name": "Java 2"})));
    }

    #[tokio::test]
    async fn test_merge_overlays_fields() {
        let store = InMemoryStore::new();
        let path = doc("courses/java");
        store
            .set_document(&path, fields(json!({"name": "Java", "topicCount": 0})), SetOptions::REPLACE)
            .await
            .unwrap();
        store
            .set_document(&path, fields(json!({"topicCount": 7})), SetOptions::MERGE)
            .await
            .unwrap();

        let stored = store.get_document(&path).await.unwrap().unwrap();
        assert_eq!(stored.fields(), &fields(json!({"name": "Java", "topicCount": 7})));
    }

    #[tokio::test]
    async fn test_order_by_field_then_id() {
        let store = InMemoryStore::new();
        store
            .set_document(&doc("c/a"), fields(json!({"rank": 2})), SetOptions::REPLACE)
            .await
            .unwrap();
        store
            .set_document(&doc("c/b"), fields(json!({"rank": 1})), SetOptions::REPLACE)
            .await
            .unwrap();
        store
            .set_document(&doc("c/c"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();
        store
            .set_document(&doc("c/d"), fields(json!({"rank": 1})), SetOptions::REPLACE)
            .await
            .unwrap();

        let asc = store
            .collection(&coll("c"))
            .order_by("rank", Direction::Ascending)
            .fetch_all()
            .await
            .unwrap();
        let ids: Vec<_> = asc.iter().map(|d| d.id().to_string()).collect();
        assert_eq!(ids, vec!["c", "b", "d", "a"]);

        let desc = store
            .collection(&coll("c"))
            .order_by("rank", Direction::Descending)
            .limit(2)
            .fetch_all()
            .await
            .unwrap();
        let ids: Vec<_> = desc.iter().map(|d| d.id().to_string()).collect();
        assert_eq!(ids, vec!["a", "d"]);
    }

    #[tokio::test]
    async fn test_denied_prefix_rejects_writes() {
        let store = InMemoryStore::new();
        store.deny_writes_under("courses/java").await.unwrap();

        let denied = store
            .set_document(&doc("courses/java/topics/t1"), Fields::new(), SetOptions::REPLACE)
            .await;
        assert!(matches!(denied, Err(AppError::PermissionDenied(_))));

        store
            .set_document(&doc("courses/javascript"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_batch_invisible_until_commit() {
        let store = InMemoryStore::new();
        let batch = store.begin().await.unwrap();
        batch
            .set_document(&doc("courses/java"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();

        assert_eq!(batch.len().await, 1);
        assert!(store.is_empty().await);

        batch.commit().await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_batch_rollback_discards() {
        let store = InMemoryStore::new();
        let batch = store.begin().await.unwrap();
        batch
            .set_document(&doc("courses/java"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();
        batch.rollback().await.unwrap();

        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_batch_commit_is_all_or_nothing() {
        let store = InMemoryStore::new();
        store.deny_writes_under("courses/python").await.unwrap();

        let batch = store.begin().await.unwrap();
        batch
            .set_document(&doc("courses/java"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();
        batch
            .set_document(&doc("courses/python"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();

        assert!(batch.commit().await.is_err());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = InMemoryStore::new();
        let other = store.clone();
        other
            .set_document(&doc("courses/java"), Fields::new(), SetOptions::REPLACE)
            .await
            .unwrap();
        assert!(store.get_document(&doc("courses/java")).await.unwrap().is_some());
    }
}
