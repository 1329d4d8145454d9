//! Query builder for fluent collection listings.

use futures::TryStreamExt;

use crate::error::AppError;
use crate::store::document::{Document, DocumentStream};
use crate::store::path::CollectionPath;
use crate::store::traits::{Direction, DocumentReader, ListOptions, OrderBy};

/// A builder for listing a collection.
///
/// `Query` provides a fluent API for ordering and limiting a listing
/// against any [`DocumentReader`].
///
/// # Example
///
/// ```ignore
/// let topics = Query::new(&store, &path)
///     .order_by("title", Direction::Ascending)
///     .fetch_all()
///     .await?;
/// ```
pub struct Query<'a, R: DocumentReader + ?Sized> {
    reader: &'a R,
    collection: CollectionPath,
    options: ListOptions,
}

impl<'a, R: DocumentReader + ?Sized> Query<'a, R> {
    /// Creates a new query over `collection`.
    pub fn new(reader: &'a R, collection: &CollectionPath) -> Self {
        Self {
            reader,
            collection: collection.clone(),
            options: ListOptions::default(),
        }
    }

    /// Orders the listing by a field.
    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.options.order_by = Some(OrderBy {
            field: field.to_string(),
            direction,
        });
        self
    }

    /// Caps the number of documents returned.
    pub fn limit(mut self, limit: usize) -> Self {
        self.options.limit = Some(limit);
        self
    }

    /// Executes the listing and returns a stream of documents.
    pub async fn execute(self) -> Result<DocumentStream<'a>, AppError> {
        self.reader
            .list_documents(&self.collection, self.options)
            .await
    }

    /// Executes the listing and collects all documents into a vector.
    pub async fn fetch_all(self) -> Result<Vec<Document>, AppError> {
        self.execute().await?.try_collect().await
    }
}

/// Extension trait providing a convenient `collection()` method.
///
/// Automatically implemented for all [`DocumentReader`] types, so callers can
/// write `store.collection(&path)` instead of `Query::new(&store, &path)`.
pub trait QueryExt: DocumentReader {
    fn collection(&self, path: &CollectionPath) -> Query<'_, Self>
    where
        Self: Sized,
    {
        Query::new(self, path)
    }
}

impl<R: DocumentReader> QueryExt for R {}
