//! Mapping a reported Kubernetes version to a manifest bundle.
//!
//! Bundles are keyed by `major.minor`; patch, pre-release and build
//! metadata never change the selected bundle. A version that cannot be read
//! selects [`DEFAULT_BUNDLE_KEY`] rather than failing.

use olm_manifest::BundleKey;

/// Bundle used when the cluster version is missing or unreadable.
pub const DEFAULT_BUNDLE_KEY: BundleKey = BundleKey::DEFAULT;

/// Parse a Kubernetes version string as a full semantic version.
///
/// A single leading `v` is accepted, as reported by the Kubernetes API
/// (`v1.26.4+k3s1`). Two-component versions like `1.26` are rejected.
pub fn parse_kube_version(version: &str) -> Result<semver::Version, semver::Error> {
    let version = version.trim();
    let version = version.strip_prefix('v').unwrap_or(version);
    semver::Version::parse(version)
}

/// Bundle key for a parsed version.
pub fn bundle_key_for(version: &semver::Version) -> BundleKey {
    BundleKey::new(version.major, version.minor)
}

/// Resolve the bundle for a reported version, falling back to
/// [`DEFAULT_BUNDLE_KEY`].
pub fn resolve_bundle_key(version: Option<&str>) -> BundleKey {
    let Some(raw) = version else {
        tracing::warn!(default = %DEFAULT_BUNDLE_KEY, "Cluster reported no version, using default");
        return DEFAULT_BUNDLE_KEY;
    };

    match parse_kube_version(raw) {
        Ok(parsed) => bundle_key_for(&parsed),
        Err(e) => {
            tracing::warn!(
                version = raw,
                default = %DEFAULT_BUNDLE_KEY,
                "Not able to parse the cluster version, using default: {}",
                e
            );
            DEFAULT_BUNDLE_KEY
        }
    }
}
