//! Collection configuration.

use serde::{Deserialize, Serialize};

use crate::path::has_extension;

/// What a directory load does with a file whose frontmatter fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseErrorPolicy {
    /// Stop the load and return the error. Nothing from the load is kept.
    #[default]
    Abort,
    /// Log a warning and leave the file out.
    Skip,
}

/// Settings for a [`Collection`](crate::Collection).
///
/// Can be deserialized from a settings block; missing keys take their
/// defaults.
///
/// ```rust
/// use fusion::{CollectionConfig, ParseErrorPolicy};
///
/// let config: CollectionConfig = serde_json::from_str(
///     r#"{ "extensions": [".md", ".markdown"], "on_parse_error": "skip" }"#,
/// ).unwrap();
///
/// assert!(config.accepts("notes/today.markdown"));
/// assert!(!config.strict_operators);
/// assert_eq!(config.on_parse_error, ParseErrorPolicy::Skip);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// File extensions ingested by directory loads, with their leading dot.
    /// Matched case-insensitively.
    pub extensions: Vec<String>,

    /// Reject unknown filter operator tokens instead of matching nothing.
    pub strict_operators: bool,

    pub on_parse_error: ParseErrorPolicy,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            extensions: vec![".md".to_string()],
            strict_operators: false,
            on_parse_error: ParseErrorPolicy::Abort,
        }
    }
}

impl CollectionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the ingested extensions.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn strict_operators(mut self, strict: bool) -> Self {
        self.strict_operators = strict;
        self
    }

    pub fn on_parse_error(mut self, policy: ParseErrorPolicy) -> Self {
        self.on_parse_error = policy;
        self
    }

    /// Returns `true` if a directory load ingests `path`.
    pub fn accepts(&self, path: &str) -> bool {
        has_extension(path, &self.extensions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = CollectionConfig::default();
        assert_eq!(config.extensions, vec![".md"]);
        assert!(!config.strict_operators);
        assert_eq!(config.on_parse_error, ParseErrorPolicy::Abort);
        assert_eq!(CollectionConfig::new(), config);
    }

    #[test]
    fn builder_setters() {
        let config = CollectionConfig::new()
            .extensions([".md", ".mdx"])
            .strict_operators(true)
            .on_parse_error(ParseErrorPolicy::Skip);
        assert!(config.accepts("a/b.MDX"));
        assert!(config.strict_operators);
        assert_eq!(config.on_parse_error, ParseErrorPolicy::Skip);
    }

    #[test]
    fn accepts_by_extension() {
        let config = CollectionConfig::default();
        assert!(config.accepts("posts/post-1.md"));
        assert!(config.accepts("posts/POST.MD"));
        assert!(!config.accepts("posts/ignored.txt"));
        assert!(!config.accepts("posts/md"));
    }

    #[test]
    fn deserializes_from_yaml() {
        let config: CollectionConfig =
            serde_yaml::from_str("strict_operators: true\non_parse_error: abort\n").unwrap();
        assert_eq!(config.extensions, vec![".md"]);
        assert!(config.strict_operators);

        let empty: CollectionConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, CollectionConfig::default());
    }

    #[test]
    fn rejects_unknown_policy() {
        let result: Result<CollectionConfig, _> =
            serde_json::from_str(r#"{ "on_parse_error": "ignore" }"#);
        assert!(result.is_err());
    }
}
