//! Core traits for document store abstraction.
//!
//! This module defines the trait hierarchy that backends must implement:
//!
//! - [`DocumentReader`] - List collections and fetch single documents
//! - [`DocumentWriter`] - Create, replace or merge documents
//! - [`Batch`] - Unit-of-work lifecycle (commit/rollback)
//! - [`DocumentClient`] - Auto-committed access plus batch creation

use async_trait::async_trait;

use crate::error::AppError;
use crate::store::document::{Document, DocumentStream, Fields};
use crate::store::path::{CollectionPath, DocPath};

/// Sort direction for ordered listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Field ordering for a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// Options for [`DocumentReader::list_documents`].
///
/// The default lists every document in the backend's natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub order_by: Option<OrderBy>,
    pub limit: Option<usize>,
}

/// Options for [`DocumentWriter::set_document`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Overlay the given fields on the stored ones instead of replacing
    /// the whole field set.
    pub merge: bool,
}

impl SetOptions {
    /// Full replace of the stored field set.
    pub const REPLACE: SetOptions = SetOptions { merge: false };
    /// Overlay onto existing fields, creating the document if absent.
    pub const MERGE: SetOptions = SetOptions { merge: true };
}

/// Reads documents from a hierarchical store.
#[async_trait]
pub trait DocumentReader: Send + Sync {
    /// Lists the documents directly inside `collection`.
    ///
    /// Documents in sub-collections are not included. An unknown collection
    /// is an empty listing, not an error.
    async fn list_documents(
        &self,
        collection: &CollectionPath,
        options: ListOptions,
    ) -> Result<DocumentStream<'_>, AppError>;

    /// Fetches a single document, `None` if it does not exist.
    async fn get_document(&self, path: &DocPath) -> Result<Option<Document>, AppError>;
}

/// Writes documents to a hierarchical store.
#[async_trait]
pub trait DocumentWriter: Send + Sync {
    /// Creates or replaces (or merges into, see [`SetOptions`]) a document.
    async fn set_document(
        &self,
        path: &DocPath,
        fields: Fields,
        options: SetOptions,
    ) -> Result<(), AppError>;
}

/// Unit-of-work lifecycle management.
///
/// Writes made through a batch become visible only on [`commit`](Batch::commit),
/// and then all at once.
#[async_trait]
pub trait Batch: Send + Sync {
    /// Applies every buffered write.
    ///
    /// Consumes the batch - it cannot be used after commit.
    async fn commit(self) -> Result<(), AppError>;

    /// Discards every buffered write.
    ///
    /// Consumes the batch - it cannot be used after rollback.
    async fn rollback(self) -> Result<(), AppError>;
}

/// A document store client that can begin batches.
///
/// The reader/writer methods on the client itself are auto-committed:
/// each write is durable (and visible to other callers) once it returns.
#[async_trait]
pub trait DocumentClient: DocumentReader + DocumentWriter {
    /// The batch type returned by this client.
    type Batch<'a>: Batch + DocumentWriter
    where
        Self: 'a;

    /// Begins a new batch.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let batch = client.begin().await?;
    /// batch.set_document(&path, fields, SetOptions::REPLACE).await?;
    /// batch.commit().await?;
    /// ```
    async fn begin(&self) -> Result<Self::Batch<'_>, AppError>;
}
