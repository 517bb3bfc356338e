//! Documents: a metadata mapping, a body and the source they came from.

use fusion_query::{Mapping, Queryable, Value};
use serde::Serialize;

use crate::path::{filename_from_path, name_from_path};

/// Field name to value mapping extracted from a document's frontmatter.
///
/// Keys keep the order they were written in.
pub type Metadata = Mapping;

/// A parsed document.
///
/// `name` and `filename` are derived from `source` and recomputed whenever it
/// changes; they cannot be set on their own.
///
/// # Example
///
/// ```rust
/// use fusion::{Document, Metadata, Value};
///
/// let mut metadata = Metadata::new();
/// metadata.insert("title".into(), Value::from("Hello"));
///
/// let doc = Document::from_parts(metadata, "Body", "posts/hello.md");
/// assert_eq!(doc.filename(), "hello.md");
/// assert_eq!(doc.name(), "hello");
/// assert_eq!(doc.field("title"), Some(&Value::from("Hello")));
/// assert_eq!(doc.field("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    metadata: Metadata,
    content: String,
    source: String,
    name: String,
    filename: String,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a document from its parts.
    pub fn from_parts(
        metadata: Metadata,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        let mut doc = Self::new();
        doc.set(metadata, content, source);
        doc
    }

    /// Replaces every part of the document.
    ///
    /// Nothing is merged: metadata keys absent from `metadata` are gone
    /// afterwards.
    pub fn set(
        &mut self,
        metadata: Metadata,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> &mut Self {
        let source = source.into();
        self.name = name_from_path(&source).to_string();
        self.filename = filename_from_path(&source).to_string();
        self.metadata = metadata;
        self.content = content.into();
        self.source = source;
        self
    }

    /// Looks up a metadata field. Absent fields are `None`.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.metadata.get(name)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// The file path the document was loaded from, or empty.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The filename without its final extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns a copy of the document without its body.
    pub fn without_content(&self) -> Self {
        Self {
            content: String::new(),
            ..self.clone()
        }
    }

    /// Snapshots the document as a plain record.
    pub fn record(&self) -> DocumentRecord {
        DocumentRecord {
            metadata: self.metadata.clone(),
            content: self.content.clone(),
            source: self.source.clone(),
            name: self.name.clone(),
            filename: self.filename.clone(),
        }
    }
}

impl Queryable for Document {
    fn field_value(&self, field: &str) -> Option<&Value> {
        self.field(field)
    }
}

/// A serializable snapshot of a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub metadata: Metadata,
    pub content: String,
    pub source: String,
    pub name: String,
    pub filename: String,
}

impl From<&Document> for DocumentRecord {
    fn from(doc: &Document) -> Self {
        doc.record()
    }
}
