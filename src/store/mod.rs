//! Document store abstraction for hierarchical collection/document access.
//!
//! This module provides a trait-based abstraction over document databases
//! addressed by alternating collection and document path segments
//! (`courses/java/topics/t1`).
//!
//! # Architecture
//!
//! - [`DocumentReader`] - List collections, fetch documents
//! - [`DocumentWriter`] - Set documents (replace or merge)
//! - [`Batch`] - Unit of work (commit/rollback)
//! - [`DocumentClient`] - Auto-committed access plus batch creation
//!
//! # Usage
//!
//! ```ignore
//! use curricula::store::{CollectionPath, QueryExt, SetOptions};
//!
//! let topics = CollectionPath::root("java_topics")?;
//! for topic in store.collection(&topics).fetch_all().await? {
//!     println!("{}: {:?}", topic.id(), topic.get_raw("title"));
//! }
//!
//! store.set_document(&topics.doc("t1")?, fields, SetOptions::REPLACE).await?;
//! ```

mod document;
mod path;
mod query;
mod traits;

pub mod backends;
pub mod snapshot;

pub use document::{fields_of, Document, DocumentStream, Fields};
pub use path::{CollectionPath, DocPath};
pub use query::{Query, QueryExt};
pub use traits::{
    Batch, Direction, DocumentClient, DocumentReader, DocumentWriter, ListOptions, OrderBy,
    SetOptions,
};
