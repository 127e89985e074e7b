//! Document module - one converted source file in the grid

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a document, based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, which gives the grid a
/// stable upload order without a separate sequence counter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Generate a new UUIDv7-based DocumentId
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse a DocumentId from its string form
    pub fn parse(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("invalid document id: {}", e))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document in the grid
///
/// Immutable once created: the converter produces it, the engine reads it.
/// Removal is an explicit user action and cascades to the document's results
/// in the store; nothing here mutates in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, stable for the lifetime of a run
    pub id: DocumentId,

    /// Display name (usually the original file name)
    pub name: String,

    /// Normalized textual content produced by the converter
    pub content: String,

    /// Content type of the original source (e.g. "application/pdf")
    pub content_type: String,
}

impl Document {
    /// Create a document with a fresh id
    pub fn new(
        name: impl Into<String>,
        content: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            id: DocumentId::new(),
            name: name.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_id_roundtrip() {
        let id = DocumentId::new();
        let parsed = DocumentId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_document_id_rejects_garbage() {
        assert!(DocumentId::parse("not-a-uuid").is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(DocumentId::new(), DocumentId::new());
    }

    #[test]
    fn test_document_construction() {
        let doc = Document::new("report.pdf", "# Report", "application/pdf");
        assert_eq!(doc.name, "report.pdf");
        assert_eq!(doc.content, "# Report");
        assert_eq!(doc.content_type, "application/pdf");
    }
}
