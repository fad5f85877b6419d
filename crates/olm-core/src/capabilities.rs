//! Static description of how the addon is installed and monitored.

use std::collections::BTreeMap;

use serde::Serialize;

/// Label selecting the clusters the addon is installed on.
pub const INSTALL_LABEL: &str = "addons.open-cluster-management.io/non-openshift";

/// Namespace of the deployment watched for health.
pub const HEALTH_NAMESPACE: &str = "olm";

/// Deployment watched for health.
pub const HEALTH_DEPLOYMENT: &str = "olm-operator";

/// What the orchestrator needs to know about the addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    pub addon_name: String,
    pub install_strategy: InstallStrategy,
    pub health_prober: HealthProber,
    pub supported_config_gvrs: Vec<GroupVersionResource>,
}

impl AgentCapabilities {
    pub fn for_addon(addon_name: impl Into<String>) -> Self {
        Self {
            addon_name: addon_name.into(),
            install_strategy: InstallStrategy::InstallByLabel {
                install_namespace: String::new(),
                match_labels: BTreeMap::from([(INSTALL_LABEL.to_string(), "true".to_string())]),
            },
            health_prober: HealthProber::DeploymentAvailability {
                deployments: vec![NamespacedName::new(HEALTH_NAMESPACE, HEALTH_DEPLOYMENT)],
            },
            supported_config_gvrs: vec![GroupVersionResource::addon_deployment_config()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InstallStrategy {
    /// Install on every cluster whose labels match. An empty namespace
    /// leaves the choice to the orchestrator.
    #[serde(rename_all = "camelCase")]
    InstallByLabel {
        install_namespace: String,
        match_labels: BTreeMap<String, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HealthProber {
    /// Healthy while every listed deployment reports available replicas.
    DeploymentAvailability { deployments: Vec<NamespacedName> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupVersionResource {
    pub group: String,
    pub version: String,
    pub resource: String,
}

impl GroupVersionResource {
    pub fn addon_deployment_config() -> Self {
        Self {
            group: "addon.open-cluster-management.io".to_string(),
            version: "v1alpha1".to_string(),
            resource: "addondeploymentconfigs".to_string(),
        }
    }
}

impl std::fmt::Display for GroupVersionResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.group, self.version, self.resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor() {
        let caps = AgentCapabilities::for_addon("olm-addon");

        assert_eq!(caps.addon_name, "olm-addon");
        let InstallStrategy::InstallByLabel { match_labels, .. } = &caps.install_strategy;
        assert_eq!(match_labels.get(INSTALL_LABEL).map(String::as_str), Some("true"));
        assert_eq!(
            caps.supported_config_gvrs[0].to_string(),
            "addon.open-cluster-management.io/v1alpha1/addondeploymentconfigs"
        );
    }

    #[test]
    fn test_yaml_rendering() {
        let yaml = serde_yaml::to_string(&AgentCapabilities::for_addon("olm-addon")).unwrap();
        insta::assert_snapshot!(yaml, @r###"
        addonName: olm-addon
        installStrategy:
          type: installByLabel
          installNamespace: ''
          matchLabels:
            addons.open-cluster-management.io/non-openshift: 'true'
        healthProber:
          type: deploymentAvailability
          deployments:
          - namespace: olm
            name: olm-operator
        supportedConfigGvrs:
        - group: addon.open-cluster-management.io
          version: v1alpha1
          resource: addondeploymentconfigs
        "###);
    }
}
