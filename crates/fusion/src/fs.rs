//! File system abstraction for directory loading.
//!
//! [`Collection::load_dir`](crate::Collection::load_dir) goes through a
//! [`FileEnumerator`] so tests can load from an in-memory tree with
//! [`MockFs`] instead of touching the disk.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::LoadError;

/// One entry under a directory root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The entry's path, joined onto the root as given (not canonicalized).
    pub path: PathBuf,
    pub is_dir: bool,
}

impl Entry {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: false,
        }
    }

    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            is_dir: true,
        }
    }
}

/// Abstraction over directory listing and file reading.
pub trait FileEnumerator: Send + Sync {
    /// Lists the entries under `root`, sorted by path.
    ///
    /// With `recursive`, each directory's entries follow it immediately
    /// (depth-first, pre-order). Without it, only direct children are listed.
    fn entries(&self, root: &Path, recursive: bool) -> Result<Vec<Entry>, LoadError>;

    /// Reads a file as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> Result<String, LoadError>;
}

// === Real implementation ===

/// Enumerator backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl FileEnumerator for RealFs {
    fn entries(&self, root: &Path, recursive: bool) -> Result<Vec<Entry>, LoadError> {
        let metadata = std::fs::metadata(root).map_err(|e| LoadError::io(root, e))?;
        if !metadata.is_dir() {
            return Err(LoadError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        let mut visited = HashSet::new();
        visited.insert(root.canonicalize().map_err(|e| LoadError::io(root, e))?);

        let mut entries = Vec::new();
        walk_dir(root, recursive, &mut visited, &mut entries)?;
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, LoadError> {
        std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
    }
}

/// Lists `current` and, with `recursive`, everything below it.
///
/// `visited` holds the canonical form of every directory entered so far. A
/// directory reached again through a symlink is listed but not entered.
fn walk_dir(
    current: &Path,
    recursive: bool,
    visited: &mut HashSet<PathBuf>,
    entries: &mut Vec<Entry>,
) -> Result<(), LoadError> {
    let mut children = std::fs::read_dir(current)
        .map_err(|e| LoadError::io(current, e))?
        .map(|entry| {
            let entry = entry.map_err(|e| LoadError::io(current, e))?;
            let path = entry.path();
            // Follows symlinks, so a link to a directory counts as one.
            Ok(if path.is_dir() {
                Entry::dir(path)
            } else {
                Entry::file(path)
            })
        })
        .collect::<Result<Vec<_>, LoadError>>()?;
    children.sort_by(|a, b| a.path.cmp(&b.path));

    for child in children {
        let descend = recursive && child.is_dir;
        let path = child.path.clone();
        entries.push(child);
        if !descend {
            continue;
        }

        let canonical = path.canonicalize().map_err(|e| LoadError::io(&path, e))?;
        if visited.insert(canonical) {
            walk_dir(&path, recursive, visited, entries)?;
        } else {
            debug!("not entering {}: directory already visited", path.display());
        }
    }

    Ok(())
}

// === Mock implementation for testing ===

/// In-memory enumerator for testing.
///
/// Directories are implied by the files added under them.
///
/// ```rust
/// use std::path::Path;
/// use fusion::{FileEnumerator, MockFs};
///
/// let fs = MockFs::new()
///     .file("posts/a.md", "A")
///     .file("posts/drafts/b.md", "B");
///
/// let flat = fs.entries(Path::new("posts"), false).unwrap();
/// assert_eq!(flat.len(), 2); // a.md and drafts/
///
/// let deep = fs.entries(Path::new("posts"), true).unwrap();
/// assert_eq!(deep.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockFs {
    files: BTreeMap<PathBuf, Option<String>>,
}

impl MockFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a readable file.
    pub fn file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), Some(content.into()));
        self
    }

    /// Adds a file that is listed but fails to read.
    pub fn unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.insert(path.into(), None);
        self
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files
            .keys()
            .any(|file| file != path && file.starts_with(path))
    }
}

impl FileEnumerator for MockFs {
    fn entries(&self, root: &Path, recursive: bool) -> Result<Vec<Entry>, LoadError> {
        if !self.is_dir(root) {
            if self.files.contains_key(root) {
                return Err(LoadError::NotADirectory {
                    path: root.to_path_buf(),
                });
            }
            return Err(LoadError::io(
                root,
                io::Error::new(io::ErrorKind::NotFound, "no such directory"),
            ));
        }

        // Every file and every intermediate directory below root.
        let mut paths = BTreeSet::new();
        for file in self.files.keys() {
            let Ok(relative) = file.strip_prefix(root) else {
                continue;
            };
            let mut current = root.to_path_buf();
            for component in relative.components() {
                current.push(component);
                paths.insert(current.clone());
            }
        }

        let mut entries = Vec::new();
        collect_children(self, root, recursive, &paths, &mut entries);
        Ok(entries)
    }

    fn read_to_string(&self, path: &Path) -> Result<String, LoadError> {
        match self.files.get(path) {
            Some(Some(content)) => Ok(content.clone()),
            Some(None) => Err(LoadError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"),
            )),
            None => Err(LoadError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such file"),
            )),
        }
    }
}

fn collect_children(
    fs: &MockFs,
    dir: &Path,
    recursive: bool,
    paths: &BTreeSet<PathBuf>,
    entries: &mut Vec<Entry>,
) {
    for path in paths.iter().filter(|p| p.parent() == Some(dir)) {
        let is_dir = fs.is_dir(path);
        entries.push(if is_dir {
            Entry::dir(path.clone())
        } else {
            Entry::file(path.clone())
        });
        if recursive && is_dir {
            collect_children(fs, path, recursive, paths, entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(entries: &[Entry]) -> Vec<String> {
        entries
            .iter()
            .map(|e| e.path.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn mock_lists_sorted_direct_children() {
        let fs = MockFs::new()
            .file("root/b.md", "")
            .file("root/a.md", "")
            .file("root/sub/c.md", "")
            .file("other/x.md", "");

        let entries = fs.entries(Path::new("root"), false).unwrap();
        assert_eq!(paths(&entries), vec!["root/a.md", "root/b.md", "root/sub"]);
        assert_eq!(
            entries.iter().map(|e| e.is_dir).collect::<Vec<_>>(),
            vec![false, false, true]
        );
    }

    #[test]
    fn mock_recursive_is_depth_first() {
        let fs = MockFs::new()
            .file("root/a/z.md", "")
            .file("root/a/deeper/y.md", "")
            .file("root/b.md", "");

        let entries = fs.entries(Path::new("root"), true).unwrap();
        assert_eq!(
            paths(&entries),
            vec![
                "root/a",
                "root/a/deeper",
                "root/a/deeper/y.md",
                "root/a/z.md",
                "root/b.md",
            ]
        );
    }

    #[test]
    fn mock_errors() {
        let fs = MockFs::new().file("root/a.md", "A").unreadable("root/b.md");

        assert_eq!(fs.read_to_string(Path::new("root/a.md")).unwrap(), "A");
        assert!(matches!(
            fs.read_to_string(Path::new("root/b.md")),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            fs.entries(Path::new("root/a.md"), false),
            Err(LoadError::NotADirectory { .. })
        ));
        assert!(matches!(
            fs.entries(Path::new("missing"), false),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn real_fs_walks_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("b.md"), "B").unwrap();
        std::fs::write(dir.path().join("a.md"), "A").unwrap();
        std::fs::write(dir.path().join("nested").join("c.md"), "C").unwrap();

        let flat = RealFs.entries(dir.path(), false).unwrap();
        let names: Vec<_> = flat
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.md", "b.md", "nested"]);
        assert!(flat[2].is_dir);
        assert_eq!(flat[0].path, dir.path().join("a.md"));

        let deep = RealFs.entries(dir.path(), true).unwrap();
        assert_eq!(deep.len(), 4);
        assert_eq!(deep[3].path, dir.path().join("nested").join("c.md"));
        assert_eq!(RealFs.read_to_string(&deep[3].path).unwrap(), "C");
    }

    #[cfg(unix)]
    #[test]
    fn real_fs_does_not_follow_directory_cycles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.md"), "A").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub").join("b.md"), "B").unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("loop")).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("sub").join("up")).unwrap();

        let entries = RealFs.entries(dir.path(), true).unwrap();
        let expected = vec![
            Entry::file(dir.path().join("a.md")),
            Entry::dir(dir.path().join("loop")),
            Entry::dir(dir.path().join("sub")),
            Entry::file(dir.path().join("sub").join("b.md")),
            Entry::dir(dir.path().join("sub").join("up")),
        ];
        assert_eq!(entries, expected);
    }

    #[cfg(unix)]
    #[test]
    fn real_fs_enters_linked_directory_once() {
        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("shared.md"), "S").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("a")).unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("b")).unwrap();

        let entries = RealFs.entries(dir.path(), true).unwrap();
        let files: Vec<_> = entries.iter().filter(|e| !e.is_dir).collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, dir.path().join("a").join("shared.md"));
    }

    #[test]
    fn real_fs_rejects_files_and_missing_roots() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.md");
        std::fs::write(&file, "A").unwrap();

        assert!(matches!(
            RealFs.entries(&file, false),
            Err(LoadError::NotADirectory { .. })
        ));
        assert!(matches!(
            RealFs.entries(&dir.path().join("missing"), false),
            Err(LoadError::Io { .. })
        ));
        assert!(matches!(
            RealFs.read_to_string(&dir.path().join("missing.md")),
            Err(LoadError::Io { .. })
        ));
    }
}
