//! Bundle keys: the `v<major>.<minor>` directory a manifest bundle lives in.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Identifies one manifest bundle directory.
///
/// Bundles are keyed at minor-version granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BundleKey {
    pub major: u64,
    pub minor: u64,
}

impl BundleKey {
    /// Bundle for clusters whose version cannot be determined.
    pub const DEFAULT: BundleKey = BundleKey::new(1, 25);

    pub const fn new(major: u64, minor: u64) -> Self {
        Self { major, minor }
    }

    /// Store path of `file` inside this bundle.
    pub fn path_for(&self, file: &str) -> String {
        format!("{self}/{file}")
    }
}

impl fmt::Display for BundleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}", self.major, self.minor)
    }
}

impl FromStr for BundleKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidBundleKey { key: s.to_string() };
        let (major, minor) = s
            .strip_prefix('v')
            .and_then(|rest| rest.split_once('.'))
            .ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}
