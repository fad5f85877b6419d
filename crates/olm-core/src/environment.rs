//! Identity of the cluster manifests are resolved for.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A managed cluster as seen by the resolver.
///
/// Supplied by the caller for each call and never retained.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnvironmentContext {
    /// Cluster name, used for logging only
    pub name: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    /// Kubernetes version as reported by the cluster, e.g. `v1.26.4+k3s1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl EnvironmentContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.insert(key.into(), value.into());
        self
    }

    pub fn with_labels<K, V>(mut self, labels: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.labels
            .extend(labels.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let env = EnvironmentContext::new("cluster1")
            .with_label("vendor", "Kubernetes")
            .with_labels([("region", "eu"), ("tier", "prod")])
            .with_version("v1.26.4");

        assert_eq!(env.name, "cluster1");
        assert_eq!(env.label("vendor"), Some("Kubernetes"));
        assert_eq!(env.labels.len(), 3);
        assert_eq!(env.version.as_deref(), Some("v1.26.4"));
    }

    #[test]
    fn test_deserialize_minimal() {
        let env: EnvironmentContext = serde_yaml::from_str("name: cluster1\n").unwrap();
        assert!(env.labels.is_empty());
        assert!(env.version.is_none());
    }
}
