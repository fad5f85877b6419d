//! Read-only manifest stores.
//!
//! Paths are `/`-separated and relative to the store root, e.g.
//! `v1.26/olm.yaml`. Stores are never written to while resolving, so one
//! instance can be read from any number of threads.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Source of raw manifest file content.
pub trait ManifestStore: Send + Sync {
    /// Read the full content of `path`.
    ///
    /// A missing file is reported as [`Error::ManifestNotFound`].
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>>;
}

/// Manifests laid out in a directory on disk.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ManifestStore for DirStore {
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        let native = path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |acc, part| acc.join(part));

        match fs::read(&native) {
            Ok(bytes) => Ok(Cow::Owned(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::ManifestNotFound {
                path: path.to_string(),
            }),
            Err(e) => Err(Error::io(native, e)),
        }
    }
}

/// Manifests held in memory, either borrowed from static data or owned.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: BTreeMap<String, Cow<'static, [u8]>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store over static `(path, content)` pairs without copying.
    pub fn from_static(files: &[(&'static str, &'static str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|&(path, content)| (path.to_string(), Cow::Borrowed(content.as_bytes())))
                .collect(),
        }
    }

    pub fn insert(&mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), Cow::Owned(content.into()));
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl ManifestStore for MemoryStore {
    fn read(&self, path: &str) -> Result<Cow<'_, [u8]>> {
        self.files
            .get(path)
            .map(|content| Cow::Borrowed(content.as_ref()))
            .ok_or_else(|| Error::ManifestNotFound {
                path: path.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_read() {
        let store = MemoryStore::new().with_file("v1.25/olm.yaml", "kind: A\n");
        assert_eq!(store.read("v1.25/olm.yaml").unwrap().as_ref(), b"kind: A\n");
        assert!(store.contains("v1.25/olm.yaml"));
    }

    #[test]
    fn test_memory_store_missing() {
        let store = MemoryStore::new();
        let err = store.read("v1.25/olm.yaml").unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { path } if path == "v1.25/olm.yaml"));
    }

    #[test]
    fn test_memory_store_from_static_borrows() {
        let store = MemoryStore::from_static(&[("b.yaml", "b"), ("a.yaml", "a")]);
        assert!(matches!(store.read("a.yaml").unwrap(), Cow::Borrowed(b"a")));
        assert!(store.contains("b.yaml"));
    }

    #[test]
    fn test_dir_store_read() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("v1.26")).unwrap();
        fs::write(temp.path().join("v1.26").join("crds.yaml"), "kind: X\n").unwrap();

        let store = DirStore::new(temp.path());
        assert_eq!(store.read("v1.26/crds.yaml").unwrap().as_ref(), b"kind: X\n");
    }

    #[test]
    fn test_dir_store_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = DirStore::new(temp.path());

        let err = store.read("v1.26/crds.yaml").unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }

    #[test]
    fn test_dir_store_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("v1.26").join("crds.yaml")).unwrap();
        let store = DirStore::new(temp.path());

        let err = store.read("v1.26/crds.yaml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
