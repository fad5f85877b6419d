//! Recognized configuration values.

use std::collections::BTreeMap;

use olm_manifest::Toleration;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::ConfigError;

/// Key holding the node selector applied to every pod template.
pub const NODE_SELECTOR_KEY: &str = "NodeSelector";
/// Key holding the tolerations applied to every pod template.
pub const TOLERATIONS_KEY: &str = "Tolerations";
/// Key holding the image applied to every container.
pub const IMAGE_KEY: &str = "OLMImage";

/// Overrides for the deployments of a bundle.
///
/// A `None` field leaves the manifest's own value in place. Unknown keys are
/// ignored when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConfigValues {
    #[serde(rename = "NodeSelector", default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,

    /// Replaces the toleration list; entries are not merged.
    #[serde(rename = "Tolerations", default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,

    #[serde(rename = "OLMImage", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ConfigValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node_selector<K, V>(mut self, selector: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.node_selector = Some(
            selector
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    pub fn with_tolerations(mut self, tolerations: Vec<Toleration>) -> Self {
        self.tolerations = Some(tolerations);
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// True when no override is set.
    pub fn is_empty(&self) -> bool {
        self.node_selector.is_none() && self.tolerations.is_none() && self.image.is_none()
    }

    /// Read a flat `{NodeSelector, Tolerations, OLMImage}` YAML mapping.
    ///
    /// Values of the wrong shape are rejected here rather than at apply time.
    pub fn from_yaml_value(origin: &str, value: Value) -> Result<Self, ConfigError> {
        serde_yaml::from_value(value).map_err(|e| ConfigError::invalid(origin, e.to_string()))
    }
}
