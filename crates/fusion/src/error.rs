//! Error types for document loading and collection queries.

use std::io;
use std::path::PathBuf;

use fusion_query::QueryError;

/// Errors raised while extracting the metadata block from raw text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The metadata block is not valid YAML.
    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An opening delimiter was found but no closing one.
    #[error("frontmatter opened with '{0}' is never closed")]
    Unterminated(String),

    /// The metadata block parsed, but not to a key-value mapping.
    #[error("frontmatter must be a mapping, found {0}")]
    NotAMapping(&'static str),

    /// A mapping key that cannot be used as a field name.
    #[error("frontmatter key must be a scalar, found {0}")]
    InvalidKey(String),
}

/// Errors raised by a [`FileEnumerator`](crate::FileEnumerator).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Listing a directory or reading a file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The path being listed or read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The root passed to a directory load is not a directory.
    #[error("{} is not a directory", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },
}

impl LoadError {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors returned by [`Collection`](crate::Collection) operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A document's metadata block could not be parsed.
    #[error("failed to parse '{source_name}': {error}")]
    Parse {
        /// The document source (file path, or empty for raw strings).
        source_name: String,
        /// The parser's error.
        #[source]
        error: ParseError,
    },

    /// Directory enumeration or file reading failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A filter operator token was rejected in strict mode.
    #[error(transparent)]
    UnsupportedOperator(#[from] QueryError),

    /// Exporting records failed.
    #[error("failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Create a parse error for the document at `source_name`.
    pub fn parse(source_name: impl Into<String>, error: ParseError) -> Self {
        Self::Parse {
            source_name: source_name.into(),
            error,
        }
    }
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, Error>;
