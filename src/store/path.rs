//! Typed document-store paths.
//!
//! The store is addressed the same way as the hosted database the content
//! app was built on: alternating collection and document segments joined by
//! `/`. A path with an odd number of segments names a collection, an even
//! number names a document.

use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Segment separator.
pub const SEPARATOR: char = '/';

fn validate_segment(full: &str, segment: &str) -> Result<(), AppError> {
    if segment.is_empty() {
        return Err(AppError::invalid_path(full, "empty segment"));
    }
    if segment.contains(SEPARATOR) {
        return Err(AppError::invalid_path(
            full,
            format!("segment '{}' contains '{}'", segment, SEPARATOR),
        ));
    }
    Ok(())
}

fn split(raw: &str) -> Result<Vec<String>, AppError> {
    let trimmed = raw.trim_matches(SEPARATOR);
    if trimmed.is_empty() {
        return Err(AppError::invalid_path(raw, "path is empty"));
    }
    trimmed
        .split(SEPARATOR)
        .map(|s| validate_segment(raw, s).map(|_| s.to_string()))
        .collect()
}

/// Path to a collection, e.g. `java_topics` or `courses/java/topics`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    segments: Vec<String>,
}

/// Path to a document, e.g. `courses/java` or `java_topics/t1/questions/q1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocPath {
    segments: Vec<String>,
}

impl CollectionPath {
    /// A top-level collection.
    pub fn root(name: &str) -> Result<Self, AppError> {
        validate_segment(name, name)?;
        Ok(Self {
            segments: vec![name.to_string()],
        })
    }

    /// Parse a `/`-separated collection path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let segments = split(raw)?;
        if segments.len() % 2 == 0 {
            return Err(AppError::invalid_path(
                raw,
                "collection paths need an odd number of segments",
            ));
        }
        Ok(Self { segments })
    }

    /// The document with the given id inside this collection.
    pub fn doc(&self, id: &str) -> Result<DocPath, AppError> {
        validate_segment(id, id)?;
        let mut segments = self.segments.clone();
        segments.push(id.to_string());
        Ok(DocPath { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl DocPath {
    /// Parse a `/`-separated document path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let segments = split(raw)?;
        if segments.len() % 2 != 0 {
            return Err(AppError::invalid_path(
                raw,
                "document paths need an even number of segments",
            ));
        }
        Ok(Self { segments })
    }

    /// Document id (last segment).
    pub fn id(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// A sub-collection of this document.
    pub fn collection(&self, name: &str) -> Result<CollectionPath, AppError> {
        validate_segment(name, name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(CollectionPath { segments })
    }

    /// Returns true if this document is at or below `prefix`.
    ///
    /// `prefix` is compared segment-wise, so `courses/java` covers
    /// `courses/java/topics/t1` but not `courses/javascript`.
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.segments.len() >= prefix.len() && self.segments[..prefix.len()] == *prefix
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

impl FromStr for CollectionPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl FromStr for DocPath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_paths_display() {
        let topic = CollectionPath::root("courses")
            .unwrap()
            .doc("java")
            .unwrap()
            .collection("topics")
            .unwrap()
            .doc("t1")
            .unwrap();

        assert_eq!(topic.to_string(), "courses/java/topics/t1");
        assert_eq!(topic.id(), "t1");
    }

    #[test]
    fn test_parse_checks_segment_parity() {
        assert!(CollectionPath::parse("java_topics").is_ok());
        assert!(CollectionPath::parse("java_topics/t1").is_err());
        assert!(DocPath::parse("java_topics/t1").is_ok());
        assert!(DocPath::parse("java_topics/t1/questions").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert!(DocPath::parse("courses//java").is_err());
        assert!(CollectionPath::parse("").is_err());
        assert!(CollectionPath::parse("/").is_err());
    }

    #[test]
    fn test_parse_trims_outer_separators() {
        let path = DocPath::parse("/courses/java/").unwrap();
        assert_eq!(path.to_string(), "courses/java");
    }

    #[test]
    fn test_ids_cannot_contain_separator() {
        let courses = CollectionPath::root("courses").unwrap();
        assert!(courses.doc("a/b").is_err());
        assert!(courses.doc("").is_err());
        assert!(CollectionPath::root("").is_err());
    }

    #[test]
    fn test_starts_with_is_segment_wise() {
        let path = DocPath::parse("courses/javascript").unwrap();
        let java = DocPath::parse("courses/java").unwrap();
        assert!(!path.starts_with(java.segments()));
        assert!(path.starts_with(&["courses".to_string()]));
    }
}
