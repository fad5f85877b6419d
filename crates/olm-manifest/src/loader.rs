//! Loader for versioned manifest bundles.
//!
//! A bundle is a directory keyed by Kubernetes minor version holding a fixed
//! set of multi-document YAML files:
//!
//! ```text
//! v1.25/
//!   crds.yaml
//!   permissions.yaml
//!   olm.yaml
//!   cleanup.yaml
//! v1.26/
//!   ...
//! ```
//!
//! Files are read in [`MANIFEST_FILES`] order and documents keep their
//! in-file order, so the resulting list is the install order.

use serde_yaml::Value;

use crate::document::split_documents;
use crate::{BundleKey, Error, ManifestObject, ManifestStore, Result, Scheme};

/// Files making up a bundle, in install order.
pub const MANIFEST_FILES: [&str; 4] = ["crds.yaml", "permissions.yaml", "olm.yaml", "cleanup.yaml"];

/// Loads manifest bundles from a [`ManifestStore`].
///
/// Nothing is cached: every call reads and decodes afresh.
pub struct BundleLoader<'a> {
    store: &'a dyn ManifestStore,
    scheme: &'a Scheme,
    files: &'a [&'a str],
}

impl<'a> BundleLoader<'a> {
    pub fn new(store: &'a dyn ManifestStore, scheme: &'a Scheme) -> Self {
        Self {
            store,
            scheme,
            files: &MANIFEST_FILES,
        }
    }

    /// Override the file list. Order is preserved as given.
    pub fn with_files(mut self, files: &'a [&'a str]) -> Self {
        self.files = files;
        self
    }

    /// Load every file of bundle `key`.
    ///
    /// Any missing file or undecodable document fails the whole call; a
    /// partial bundle is never returned.
    pub fn load(&self, key: BundleKey) -> Result<Vec<ManifestObject>> {
        let mut objects = Vec::new();
        for file in self.files {
            let path = key.path_for(file);
            let loaded = self.load_file(&path)?;
            tracing::debug!(path = %path, objects = loaded.len(), "Loaded manifest file");
            objects.extend(loaded);
        }
        Ok(objects)
    }

    /// Load a single file by store path.
    pub fn load_file(&self, path: &str) -> Result<Vec<ManifestObject>> {
        let content = self.store.read(path)?;
        let text = std::str::from_utf8(&content).map_err(|_| Error::InvalidUtf8 {
            path: path.to_string(),
        })?;
        decode_manifests(path, text, self.scheme)
    }
}

/// Load bundle `key` with the default file list.
pub fn load_bundle(
    key: BundleKey,
    store: &dyn ManifestStore,
    scheme: &Scheme,
) -> Result<Vec<ManifestObject>> {
    BundleLoader::new(store, scheme).load(key)
}

/// Decode every document of a multi-document YAML text.
///
/// `file` is only used in error messages. A document that parses to an
/// explicit null (`~`) holds no object and is skipped.
pub fn decode_manifests(file: &str, content: &str, scheme: &Scheme) -> Result<Vec<ManifestObject>> {
    let mut objects = Vec::new();

    for document in split_documents(content) {
        let value: Value =
            serde_yaml::from_str(document.text).map_err(|e| Error::DocumentParse {
                file: file.to_string(),
                index: document.index,
                line: document.line,
                message: e.to_string(),
            })?;

        if value.is_null() {
            continue;
        }

        let decoded = scheme.decode(value).map_err(|source| Error::Decode {
            file: file.to_string(),
            index: document.index,
            line: document.line,
            source,
        })?;
        objects.extend(decoded);
    }

    Ok(objects)
}
