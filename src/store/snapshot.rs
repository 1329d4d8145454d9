//! JSON file snapshots of an [`InMemoryStore`].
//!
//! A snapshot is a flat map of document paths to field sets:
//!
//! ```json
//! {
//!   "version": 1,
//!   "documents": {
//!     "java_topics/t1": { "title": "Intro" },
//!     "java_topics/t1/questions/q1": { "question": "What is X?", "answer": "X is Y" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::store::backends::memory::InMemoryStore;
use crate::store::document::Fields;
use crate::store::path::DocPath;

/// Snapshot format version written by [`save`].
pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    version: u32,
    #[serde(default)]
    documents: BTreeMap<String, Fields>,
}

/// Loads a store from a snapshot file.
///
/// A missing file loads as an empty store.
pub fn load(path: &Path) -> Result<InMemoryStore, AppError> {
    if !path.exists() {
        tracing::info!("No snapshot at {}, starting with an empty store", path.display());
        return Ok(InMemoryStore::new());
    }

    let raw = std::fs::read_to_string(path)?;
    let file: SnapshotFile = serde_json::from_str(&raw)?;
    if file.version != SNAPSHOT_VERSION {
        return Err(AppError::Snapshot(format!(
            "unsupported snapshot version {} in {} (expected {})",
            file.version,
            path.display(),
            SNAPSHOT_VERSION
        )));
    }

    let documents = file
        .documents
        .into_iter()
        .map(|(raw_path, fields)| {
            DocPath::parse(&raw_path)
                .map(|p| (p, fields))
                .map_err(|e| AppError::Snapshot(format!("{}: {}", path.display(), e)))
        })
        .collect::<Result<BTreeMap<_, _>, _>>()?;

    tracing::debug!("Loaded {} documents from {}", documents.len(), path.display());
    Ok(InMemoryStore::from_documents(documents))
}

/// Writes the store to a snapshot file.
///
/// The file is written to a temporary sibling first and then renamed over
/// `path`, so readers never observe a half-written snapshot.
pub async fn save(store: &InMemoryStore, path: &Path) -> Result<(), AppError> {
    let documents = store
        .documents()
        .await
        .into_iter()
        .map(|(p, fields)| (p.to_string(), fields))
        .collect();
    let file = SnapshotFile {
        version: SNAPSHOT_VERSION,
        documents,
    };
    let json = serde_json::to_string_pretty(&file)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;

    tracing::debug!("Saved {} documents to {}", file.documents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::traits::{DocumentReader, DocumentWriter, SetOptions};
    use serde_json::json;

    #[tokio::test]
    async fn test_missing_file_is_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("absent.json")).unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("store.json");
        let store = InMemoryStore::new();
        let path = DocPath::parse("java_topics/t1/questions/q1").unwrap();
        let fields = match json!({"question": "What is X?", "answer": "X is Y"}) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        store
            .set_document(&path, fields.clone(), SetOptions::REPLACE)
            .await
            .unwrap();

        save(&store, &file).await.unwrap();
        let loaded = load(&file).unwrap();

        let doc = loaded.get_document(&path).await.unwrap().unwrap();
        assert_eq!(doc.fields(), &fields);
    }

    #[test]
    fn test_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("store.json");
        std::fs::write(&file, r#"{"version": 99, "documents": {}}"#).unwrap();

        assert!(matches!(load(&file), Err(AppError::Snapshot(_))));
    }

    #[test]
    fn test_rejects_collection_keys() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("store.json");
        std::fs::write(&file, r#"{"version": 1, "documents": {"java_topics": {}}}"#).unwrap();

        assert!(matches!(load(&file), Err(AppError::Snapshot(_))));
    }
}
