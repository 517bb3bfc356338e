//! Fusion - in-memory collections of frontmatter documents.
//!
//! Documents are text files that open with a YAML metadata block:
//!
//! ```text
//! ---
//! title: Post One
//! date: 2023-01-01
//! slug: post-one
//! ---
//! Body text.
//! ```
//!
//! A [`Collection`] loads them from strings or a directory, then filters,
//! sorts and caps them by metadata field. Query methods record intent;
//! reading results resolves the pending query into a new collection and
//! leaves the original as it was.
//!
//! # Quick Start
//!
//! ```rust
//! use fusion::{Collection, Dir};
//!
//! let mut posts = Collection::new();
//! posts
//!     .add_text("---\ntitle: Post One\ndate: 2023-01-01\n---\nOne", "")?
//!     .add_text("---\ntitle: Post Two\ndate: 2023-02-01\n---\nTwo", "")?
//!     .add_text("---\ntitle: Post Three\ndate: 2022-12-01\nhighlight: true\n---\nThree", "")?;
//!
//! posts.order_by("date", Dir::Desc).limit(2);
//! let latest: Vec<_> = posts.to_metadata_array();
//! assert_eq!(latest.len(), 2);
//! assert_eq!(latest[0].metadata["title"], "Post Two".into());
//!
//! posts.reset_params().filter_true("highlight");
//! assert_eq!(posts.count(), 1);
//! # Ok::<(), fusion::Error>(())
//! ```
//!
//! # Loading from disk
//!
//! ```rust,no_run
//! use fusion::Collection;
//!
//! let mut site = Collection::new();
//! site.load_dir("content/posts", true)?;
//! let about = site.find_by_filename("about.md");
//! # Ok::<(), fusion::Error>(())
//! ```
//!
//! Directory and file access goes through [`FileEnumerator`] and parsing
//! through [`DocumentParser`]; both can be swapped with
//! [`Collection::with_parts`]. The engine itself lives in `fusion-query` and
//! its main types are re-exported here.

mod collection;
mod config;
mod document;
mod error;
mod fs;
mod parser;
pub mod path;

pub use collection::Collection;
pub use config::{CollectionConfig, ParseErrorPolicy};
pub use document::{Document, DocumentRecord, Metadata};
pub use error::{Error, LoadError, ParseError, Result};
pub use fs::{Entry, FileEnumerator, MockFs, RealFs};
pub use parser::{parse_metadata, yaml_to_value, DocumentParser, FrontmatterParser, ParsedDocument};

// Query engine types
pub use fusion_query::{Clause, Dir, Mapping, Number, Op, OrderBy, Query, QueryError, Queryable, Value};
