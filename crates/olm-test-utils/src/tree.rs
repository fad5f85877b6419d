//! [`ManifestTree`] builder for on-disk manifest bundles.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// A temporary manifest directory laid out as `v<major>.<minor>/<file>`.
///
/// # Example
///
/// ```rust,no_run
/// use olm_test_utils::ManifestTree;
///
/// let tree = ManifestTree::new();
/// tree.write_minimal_bundle("v1.26");
/// tree.assert_file_exists("v1.26/olm.yaml");
/// ```
pub struct ManifestTree {
    temp_dir: TempDir,
}

impl Default for ManifestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ManifestTree::new: failed to create temp dir"),
        }
    }

    /// Root of the tree.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` at the `/`-separated `path`, creating parents.
    pub fn write(&self, path: &str, content: &str) -> PathBuf {
        let full = self.root().join(path);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).expect("ManifestTree::write: failed to create parent");
        }
        fs::write(&full, content).expect("ManifestTree::write: failed to write file");
        full
    }

    /// Write every `(file, content)` pair under the `key` directory.
    pub fn write_bundle(&self, key: &str, files: &[(&str, &str)]) {
        for (file, content) in files {
            self.write(&format!("{key}/{file}"), content);
        }
    }

    /// Write a complete four-file bundle with one small object per file
    /// except `olm.yaml`, which holds a deployment and a cluster service
    /// version.
    pub fn write_minimal_bundle(&self, key: &str) {
        let olm = format!(
            "{}---\n{}",
            fixtures::DEPLOYMENT_TWO_CONTAINERS,
            fixtures::CSV_TWO_DEPLOYMENTS
        );
        self.write_bundle(
            key,
            &[
                ("crds.yaml", fixtures::CRD),
                ("permissions.yaml", fixtures::NAMESPACE_SA_ROLE),
                ("olm.yaml", olm.as_str()),
                ("cleanup.yaml", fixtures::CLEANUP_CONFIGMAP),
            ],
        );
    }

    /// Remove one file from the tree.
    pub fn remove(&self, path: &str) {
        fs::remove_file(self.root().join(path)).expect("ManifestTree::remove: failed to remove");
    }

    pub fn assert_file_exists(&self, path: &str) {
        assert!(
            self.root().join(path).exists(),
            "Expected file to exist: {path}"
        );
    }
}
