//! Manifest bundles embedded at build time.

use olm_manifest::{BundleKey, MemoryStore};

const BUNDLED_VERSIONS: [BundleKey; 2] = [BundleKey::new(1, 25), BundleKey::new(1, 26)];

const BUNDLED_FILES: &[(&str, &str)] = &[
    ("v1.25/crds.yaml", include_str!("../manifests/v1.25/crds.yaml")),
    (
        "v1.25/permissions.yaml",
        include_str!("../manifests/v1.25/permissions.yaml"),
    ),
    ("v1.25/olm.yaml", include_str!("../manifests/v1.25/olm.yaml")),
    (
        "v1.25/cleanup.yaml",
        include_str!("../manifests/v1.25/cleanup.yaml"),
    ),
    ("v1.26/crds.yaml", include_str!("../manifests/v1.26/crds.yaml")),
    (
        "v1.26/permissions.yaml",
        include_str!("../manifests/v1.26/permissions.yaml"),
    ),
    ("v1.26/olm.yaml", include_str!("../manifests/v1.26/olm.yaml")),
    (
        "v1.26/cleanup.yaml",
        include_str!("../manifests/v1.26/cleanup.yaml"),
    ),
];

/// A store holding the embedded bundles.
pub fn bundled_store() -> MemoryStore {
    MemoryStore::from_static(BUNDLED_FILES)
}

/// Keys of the embedded bundles, oldest first.
pub fn bundled_versions() -> &'static [BundleKey] {
    &BUNDLED_VERSIONS
}
