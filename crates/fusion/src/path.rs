//! Filename helpers for document sources.
//!
//! Sources are plain strings, split on `/` regardless of platform, so that a
//! document's derived names do not depend on where it was loaded.

/// Returns the final `/`-separated segment of `source`.
///
/// ```rust
/// use fusion::path::filename_from_path;
///
/// assert_eq!(filename_from_path("src/content/test.md"), "test.md");
/// assert_eq!(filename_from_path("test.md"), "test.md");
/// assert_eq!(filename_from_path(""), "");
/// ```
pub fn filename_from_path(source: &str) -> &str {
    source.rsplit('/').next().unwrap_or(source)
}

/// Returns the filename of `source` without its final extension.
///
/// A dot in first position does not start an extension, so `.hidden` keeps
/// its whole name.
///
/// ```rust
/// use fusion::path::name_from_path;
///
/// assert_eq!(name_from_path("src/content/test.md"), "test");
/// assert_eq!(name_from_path("a/b/c.test.md"), "c.test");
/// assert_eq!(name_from_path("notes/.hidden"), ".hidden");
/// assert_eq!(name_from_path("README"), "README");
/// ```
pub fn name_from_path(source: &str) -> &str {
    let filename = filename_from_path(source);
    match filename.rfind('.') {
        Some(0) | None => filename,
        Some(dot) => &filename[..dot],
    }
}

/// Returns `true` if `source` ends with one of `extensions`, ignoring ASCII
/// case. Extensions are given with their leading dot (`".md"`).
pub fn has_extension<S: AsRef<str>>(source: &str, extensions: &[S]) -> bool {
    let filename = filename_from_path(source).to_ascii_lowercase();
    extensions.iter().any(|ext| {
        let ext = ext.as_ref().to_ascii_lowercase();
        filename.len() > ext.len() && filename.ends_with(&ext)
    })
}
