//! `AddOnDeploymentConfig` documents and their conversion to
//! [`ConfigValues`].

use std::collections::BTreeMap;

use olm_manifest::{ObjectMeta, Toleration};
use serde::{Deserialize, Serialize};

use super::values::{ConfigValues, IMAGE_KEY};

pub const ADDON_DEPLOYMENT_CONFIG_KIND: &str = "AddOnDeploymentConfig";

/// An `addon.open-cluster-management.io/v1alpha1` AddOnDeploymentConfig.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnDeploymentConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: AddOnDeploymentConfigSpec,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOnDeploymentConfigSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub customized_variables: Vec<CustomizedVariable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_placement: Option<NodePlacement>,
}

/// A free-form name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizedVariable {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePlacement {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub node_selector: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tolerations: Vec<Toleration>,
}

impl AddOnDeploymentConfig {
    /// Values carried by this config.
    ///
    /// Empty node selectors and toleration lists are treated as unset so
    /// the manifests' own defaults stay in effect. Customized variables other
    /// than `OLMImage` are ignored; when a name repeats, the last one wins.
    pub fn to_values(&self) -> ConfigValues {
        let mut values = ConfigValues::new();

        if let Some(placement) = &self.spec.node_placement {
            if !placement.node_selector.is_empty() {
                values.node_selector = Some(placement.node_selector.clone());
            }
            if !placement.tolerations.is_empty() {
                values.tolerations = Some(placement.tolerations.clone());
            }
        }

        for variable in &self.spec.customized_variables {
            if variable.name == IMAGE_KEY {
                values.image = Some(variable.value.clone());
            } else {
                tracing::debug!(name = %variable.name, "Ignoring unrecognized customized variable");
            }
        }

        values
    }
}
