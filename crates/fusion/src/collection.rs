//! Document collections with deferred filter, sort and limit.
//!
//! A [`Collection`] stores documents in insertion order next to a pending
//! [`Query`]. Query-building methods only record intent; reading results
//! goes through [`resolve`](Collection::resolve), which evaluates the
//! pending query in one pass and returns a new collection:
//!
//! ```text
//! where_eq / filter / order_by / limit   (record only)
//!                  │
//!                  ▼
//! resolve(): filter ─▶ sort ─▶ limit ─▶ new Collection, empty pending state
//! ```
//!
//! The receiver of `resolve` is never modified, so a collection can be
//! resolved any number of times with the same result.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use fusion_query::{Clause, Dir, Op, OrderBy, Query, Value};
use log::{debug, trace, warn};

use crate::config::{CollectionConfig, ParseErrorPolicy};
use crate::document::{Document, DocumentRecord, Metadata};
use crate::error::{Error, Result};
use crate::fs::{FileEnumerator, RealFs};
use crate::parser::{DocumentParser, FrontmatterParser};

/// An ordered set of documents plus a pending query.
///
/// Documents are held behind `Arc`, so resolving shares them with the
/// derived collection instead of copying.
///
/// # Example
///
/// ```rust
/// use fusion::{Collection, Dir};
///
/// let mut posts = Collection::new();
/// posts
///     .add_text("---\ntitle: One\ndate: 2023-01-01\n---\nFirst", "")?
///     .add_text("---\ntitle: Two\ndate: 2023-02-01\n---\nSecond", "")?;
///
/// posts.filter_op("date", ">=", "2023-01-15")?.order_by("date", Dir::Desc);
///
/// let titles: Vec<_> = posts
///     .items()
///     .iter()
///     .filter_map(|doc| doc.field("title")?.as_str().map(String::from))
///     .collect();
/// assert_eq!(titles, vec!["Two"]);
///
/// // The stored documents are untouched.
/// assert_eq!(posts.len(), 2);
/// # Ok::<(), fusion::Error>(())
/// ```
#[derive(Clone)]
pub struct Collection {
    items: Vec<Arc<Document>>,
    query: Query,
    config: CollectionConfig,
    parser: Arc<dyn DocumentParser>,
    enumerator: Arc<dyn FileEnumerator>,
}

impl Default for Collection {
    fn default() -> Self {
        Self::with_config(CollectionConfig::default())
    }
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items.len())
            .field("query", &self.query)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Collection {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Creates an empty collection with the YAML frontmatter parser and the
    /// real file system.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: CollectionConfig) -> Self {
        Self::with_parts(config, FrontmatterParser::new(), RealFs)
    }

    /// Creates an empty collection with custom collaborators.
    pub fn with_parts(
        config: CollectionConfig,
        parser: impl DocumentParser + 'static,
        enumerator: impl FileEnumerator + 'static,
    ) -> Self {
        Self {
            items: Vec::new(),
            query: Query::new(),
            config,
            parser: Arc::new(parser),
            enumerator: Arc::new(enumerator),
        }
    }

    /// Creates a collection holding `documents`, in order.
    pub fn from_documents(documents: impl IntoIterator<Item = Document>) -> Self {
        let mut collection = Self::new();
        collection.set_documents(documents);
        collection
    }

    /// Replaces the stored documents. Pending query state is kept.
    pub fn set_documents(&mut self, documents: impl IntoIterator<Item = Document>) -> &mut Self {
        self.items = documents.into_iter().map(Arc::new).collect();
        self
    }

    /// Derives an empty collection sharing this one's settings.
    fn derive(&self, items: Vec<Arc<Document>>) -> Self {
        Self {
            items,
            query: Query::new(),
            config: self.config.clone(),
            parser: Arc::clone(&self.parser),
            enumerator: Arc::clone(&self.enumerator),
        }
    }

    // ========================================================================
    // Adding documents
    // ========================================================================

    /// Appends a document built from its parts.
    pub fn add(
        &mut self,
        metadata: Metadata,
        content: impl Into<String>,
        source: impl Into<String>,
    ) -> &mut Self {
        self.add_document(Document::from_parts(metadata, content, source))
    }

    pub fn add_document(&mut self, document: Document) -> &mut Self {
        self.items.push(Arc::new(document));
        self
    }

    /// Parses `raw` and appends the result. Nothing is added on error.
    pub fn add_text(&mut self, raw: &str, source: impl Into<String>) -> Result<&mut Self> {
        let source = source.into();
        let parsed = self
            .parser
            .parse(raw)
            .map_err(|error| Error::parse(source.as_str(), error))?;
        Ok(self.add(parsed.metadata, parsed.content, source))
    }

    /// Loads every file under `root` with an accepted extension.
    ///
    /// Files are visited in lexicographic path order; subdirectories are
    /// entered only when `recursive` is set. Each document's source is its
    /// path joined onto `root` as given. Paths that are not valid UTF-8 are
    /// skipped with a warning.
    ///
    /// The load is all-or-nothing: on error no document from this call is
    /// added, and documents from earlier calls stay.
    pub fn load_dir(&mut self, root: impl AsRef<Path>, recursive: bool) -> Result<&mut Self> {
        let root = root.as_ref();
        let entries = self.enumerator.entries(root, recursive)?;

        let mut loaded = Vec::new();
        let mut ignored = 0usize;
        let mut skipped = 0usize;

        for entry in entries.iter().filter(|entry| !entry.is_dir) {
            let Some(source) = entry.path.to_str().map(str::to_string) else {
                warn!("skipping {}: path is not valid UTF-8", entry.path.display());
                ignored += 1;
                continue;
            };
            if !self.config.accepts(&source) {
                ignored += 1;
                continue;
            }

            let raw = self.enumerator.read_to_string(&entry.path)?;
            match self.parser.parse(&raw) {
                Ok(parsed) => {
                    trace!("loaded {} ({} fields)", source, parsed.metadata.len());
                    loaded.push(Arc::new(Document::from_parts(
                        parsed.metadata,
                        parsed.content,
                        source,
                    )));
                }
                Err(error) => match self.config.on_parse_error {
                    ParseErrorPolicy::Abort => return Err(Error::parse(source, error)),
                    ParseErrorPolicy::Skip => {
                        warn!("skipping {}: {}", source, error);
                        skipped += 1;
                    }
                },
            }
        }

        debug!(
            "loaded {} documents from {} ({} ignored, {} skipped, recursive: {})",
            loaded.len(),
            root.display(),
            ignored,
            skipped,
            recursive
        );

        self.items.extend(loaded);
        Ok(self)
    }

    // ========================================================================
    // Query building
    // ========================================================================

    /// Adds one strict equality filter per pair.
    pub fn where_eq<I, K, V>(&mut self, pairs: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        for (field, value) in pairs {
            self.query.push(Clause::new(field, Op::Eq, value));
        }
        self
    }

    pub fn filter(&mut self, field: &str, op: Op, value: impl Into<Value>) -> &mut Self {
        self.query.push(Clause::new(field, op, value));
        self
    }

    /// Keeps documents whose `field` is strictly `true`.
    pub fn filter_true(&mut self, field: &str) -> &mut Self {
        self.filter(field, Op::Eq, true)
    }

    /// Adds a filter from an operator token such as `">="` or `"ne"`.
    ///
    /// An unknown token is an error with `strict_operators` set. Otherwise
    /// the filter is recorded, matches nothing, and is reported each time
    /// the collection resolves.
    pub fn filter_op(
        &mut self,
        field: &str,
        token: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self> {
        let clause = if self.config.strict_operators {
            Clause::new(field, token.parse::<Op>()?, value)
        } else {
            Clause::parse(field, token, value)
        };
        self.query.push(clause);
        Ok(self)
    }

    /// Sets the sort field and direction, replacing any earlier one.
    pub fn order_by(&mut self, field: &str, dir: Dir) -> &mut Self {
        self.query.set_order(Some(OrderBy::new(field, dir)));
        self
    }

    pub fn order_asc(&mut self, field: &str) -> &mut Self {
        self.order_by(field, Dir::Asc)
    }

    pub fn order_desc(&mut self, field: &str) -> &mut Self {
        self.order_by(field, Dir::Desc)
    }

    /// Caps the number of resolved documents. A negative count removes
    /// the cap.
    pub fn limit(&mut self, count: i64) -> &mut Self {
        self.query.set_limit(usize::try_from(count).ok());
        self
    }

    /// Clears pending filters, sort and cap. Stored documents are kept.
    pub fn reset_params(&mut self) -> &mut Self {
        self.query.clear();
        self
    }

    /// The pending query.
    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn config(&self) -> &CollectionConfig {
        &self.config
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Evaluates the pending query into a new collection.
    ///
    /// The result holds the filtered, sorted and capped documents and has no
    /// pending state. `self` is not modified.
    pub fn resolve(&self) -> Collection {
        let items: Vec<Arc<Document>> = self
            .query
            .execute(&self.items)
            .into_iter()
            .map(Arc::clone)
            .collect();

        debug!(
            "resolved {} of {} documents",
            items.len(),
            self.items.len()
        );

        self.derive(items)
    }

    /// Resolves and returns the documents.
    pub fn items(&self) -> Vec<Arc<Document>> {
        self.resolve().items
    }

    /// Resolves and returns a record per document.
    pub fn to_array(&self) -> Vec<DocumentRecord> {
        self.resolve().items.iter().map(|doc| doc.record()).collect()
    }

    /// Resolves and returns a record per document with the content blanked.
    pub fn to_metadata_array(&self) -> Vec<DocumentRecord> {
        self.resolve()
            .items
            .iter()
            .map(|doc| doc.without_content().record())
            .collect()
    }

    /// Resolves and serializes the records as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let records = self.to_array();
        let json = if pretty {
            serde_json::to_string_pretty(&records)?
        } else {
            serde_json::to_string(&records)?
        };
        Ok(json)
    }

    /// Number of documents after resolution.
    pub fn count(&self) -> usize {
        self.resolve().items.len()
    }

    /// First document after resolution.
    pub fn first(&self) -> Option<Arc<Document>> {
        self.resolve().items.into_iter().next()
    }

    // ========================================================================
    // Stored documents
    // ========================================================================

    /// The stored documents, ignoring the pending query.
    pub fn documents(&self) -> &[Arc<Document>] {
        &self.items
    }

    /// Number of stored documents, ignoring the pending query.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First stored document whose `slug` field is the string `slug`.
    ///
    /// Looks at the stored documents; the pending query does not apply.
    pub fn find_by_slug(&self, slug: &str) -> Option<Arc<Document>> {
        let slug = Value::from(slug);
        self.items
            .iter()
            .find(|doc| doc.field("slug").is_some_and(|v| v.strict_eq(&slug)))
            .cloned()
    }

    /// First stored document with the given filename.
    ///
    /// Looks at the stored documents; the pending query does not apply.
    pub fn find_by_filename(&self, filename: &str) -> Option<Arc<Document>> {
        self.items
            .iter()
            .find(|doc| doc.filename() == filename)
            .cloned()
    }
}

impl IntoIterator for Collection {
    type Item = Arc<Document>;
    type IntoIter = std::vec::IntoIter<Arc<Document>>;

    /// Iterates the resolved documents.
    fn into_iter(self) -> Self::IntoIter {
        self.items().into_iter()
    }
}

impl IntoIterator for &Collection {
    type Item = Arc<Document>;
    type IntoIter = std::vec::IntoIter<Arc<Document>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items().into_iter()
    }
}

impl FromIterator<Document> for Collection {
    fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
        Self::from_documents(iter)
    }
}
