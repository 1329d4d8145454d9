//! Documents and document streams.

use std::pin::Pin;

use futures::Stream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::store::path::DocPath;

/// Field set of a single document.
pub type Fields = serde_json::Map<String, JsonValue>;

/// A stream of documents from a collection listing.
pub type DocumentStream<'a> = Pin<Box<dyn Stream<Item = Result<Document, AppError>> + Send + 'a>>;

/// A document read from the store: its path plus its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: DocPath,
    fields: Fields,
}

impl Document {
    pub fn new(path: DocPath, fields: Fields) -> Self {
        Self { path, fields }
    }

    /// Document id (last path segment).
    pub fn id(&self) -> &str {
        self.path.id()
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Gets a field, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is missing or has the wrong shape.
    pub fn get<T: DeserializeOwned>(&self, field: &str) -> Result<T, AppError> {
        let value = self
            .fields
            .get(field)
            .ok_or_else(|| self.invalid_field(field, "field not found"))?;
        serde_json::from_value(value.clone()).map_err(|e| self.invalid_field(field, e))
    }

    /// Gets a field, returning `None` if it is missing or `null`.
    ///
    /// Still returns an error if the field exists but deserialization fails.
    pub fn get_opt<T: DeserializeOwned>(&self, field: &str) -> Result<Option<T>, AppError> {
        match self.fields.get(field) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone())
                .map(Some)
                .map_err(|e| self.invalid_field(field, e)),
            None => Ok(None),
        }
    }

    /// Returns the raw JSON value of a field, if present.
    pub fn get_raw(&self, field: &str) -> Option<&JsonValue> {
        self.fields.get(field)
    }

    fn invalid_field(&self, field: &str, message: impl ToString) -> AppError {
        AppError::InvalidField {
            path: self.path.to_string(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// Serializes a model into a document field set.
///
/// The model must serialize to a JSON object.
pub fn fields_of<T: Serialize>(model: &T) -> Result<Fields, AppError> {
    match serde_json::to_value(model)? {
        JsonValue::Object(map) => Ok(map),
        other => Err(AppError::Internal(format!(
            "expected an object for document fields, got {}",
            other
        ))),
    }
}
