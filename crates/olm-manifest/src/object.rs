//! Typed manifest objects.
//!
//! Only the two shapes the override pass patches are modelled down to the
//! pod spec: `apps/v1` [`Deployment`] and `operators.coreos.com/v1alpha1`
//! [`ClusterServiceVersion`]. Every other kind is kept as a
//! [`GenericObject`].
//!
//! Each typed level carries a flattened `extra` mapping holding the fields it
//! does not model, so decoding and re-encoding an object never drops data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

/// The `apiVersion`/`kind` pair identifying an object's type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeMeta {
    pub api_version: String,
    pub kind: String,
}

impl TypeMeta {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
        }
    }
}

impl std::fmt::Display for TypeMeta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)
    }
}

/// Object metadata. Only `name` and `namespace` are typed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// A pod toleration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toleration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub toleration_seconds: Option<i64>,
}

/// A container in a pod template.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// The placement- and image-relevant part of a pod spec.
///
/// Sections are optional so an explicitly empty `containers: []` survives a
/// round trip distinct from an absent one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PodSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_selector: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerations: Option<Vec<Toleration>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containers: Option<Vec<Container>>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl PodSpec {
    pub fn containers(&self) -> &[Container] {
        self.containers.as_deref().unwrap_or(&[])
    }

    pub fn containers_mut(&mut self) -> impl Iterator<Item = &mut Container> {
        self.containers.iter_mut().flatten()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PodTemplateSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<PodSpec>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// The spec of a deployment, shared by standalone deployments and the
/// deployments embedded in a cluster service version.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DeploymentSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<PodTemplateSpec>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl DeploymentSpec {
    /// The pod spec of this deployment's template, if it has one.
    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.template.as_ref()?.spec.as_ref()
    }

    pub fn pod_spec_mut(&mut self) -> Option<&mut PodSpec> {
        self.template.as_mut()?.spec.as_mut()
    }

    /// The pod spec, creating `template.spec` when missing.
    pub fn pod_spec_or_insert(&mut self) -> &mut PodSpec {
        self.template
            .get_or_insert_with(Default::default)
            .spec
            .get_or_insert_with(Default::default)
    }
}

/// An `apps/v1` Deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeploymentSpec>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl Deployment {
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }

    pub fn pod_spec(&self) -> Option<&PodSpec> {
        self.spec.as_ref()?.pod_spec()
    }
}

/// One named deployment inside a cluster service version's install strategy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyDeploymentSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<DeploymentSpec>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// `spec.install.spec`: the deployments plus (untyped) permissions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyDetailsDeployment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployments: Option<Vec<StrategyDeploymentSpec>>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// `spec.install`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NamedInstallStrategy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<StrategyDetailsDeployment>,
    #[serde(flatten)]
    pub extra: Mapping,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClusterServiceVersionSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<NamedInstallStrategy>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// An `operators.coreos.com/v1alpha1` ClusterServiceVersion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterServiceVersion {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<ClusterServiceVersionSpec>,
    #[serde(flatten)]
    pub extra: Mapping,
}

impl ClusterServiceVersion {
    /// Deployments of the install strategy, in declaration order.
    pub fn strategy_deployments(&self) -> &[StrategyDeploymentSpec] {
        self.spec
            .as_ref()
            .and_then(|spec| spec.install.as_ref())
            .and_then(|install| install.spec.as_ref())
            .and_then(|details| details.deployments.as_deref())
            .unwrap_or(&[])
    }

    pub fn strategy_deployments_mut(&mut self) -> impl Iterator<Item = &mut StrategyDeploymentSpec> {
        self.spec
            .as_mut()
            .and_then(|spec| spec.install.as_mut())
            .and_then(|install| install.spec.as_mut())
            .and_then(|details| details.deployments.as_mut())
            .into_iter()
            .flatten()
    }

    /// The deployment specs embedded in the install strategy, skipping
    /// entries without a `spec`.
    pub fn deployment_specs(&self) -> impl Iterator<Item = &DeploymentSpec> {
        self.strategy_deployments()
            .iter()
            .filter_map(|d| d.spec.as_ref())
    }
}

/// Any object whose kind is not registered for typed decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericObject {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ObjectMeta>,
    #[serde(flatten)]
    pub body: Mapping,
}

/// A decoded manifest object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ManifestObject {
    Deployment(Deployment),
    ClusterServiceVersion(ClusterServiceVersion),
    Other(GenericObject),
}

impl ManifestObject {
    pub fn api_version(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.api_version,
            Self::ClusterServiceVersion(c) => &c.api_version,
            Self::Other(o) => &o.api_version,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            Self::Deployment(d) => &d.kind,
            Self::ClusterServiceVersion(c) => &c.kind,
            Self::Other(o) => &o.kind,
        }
    }

    pub fn type_meta(&self) -> TypeMeta {
        TypeMeta::new(self.api_version(), self.kind())
    }

    pub fn metadata(&self) -> Option<&ObjectMeta> {
        match self {
            Self::Deployment(d) => d.metadata.as_ref(),
            Self::ClusterServiceVersion(c) => c.metadata.as_ref(),
            Self::Other(o) => o.metadata.as_ref(),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata()?.name.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata()?.namespace.as_deref()
    }

    pub fn as_deployment(&self) -> Option<&Deployment> {
        match self {
            Self::Deployment(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_cluster_service_version(&self) -> Option<&ClusterServiceVersion> {
        match self {
            Self::ClusterServiceVersion(c) => Some(c),
            _ => None,
        }
    }
}

impl From<Deployment> for ManifestObject {
    fn from(value: Deployment) -> Self {
        Self::Deployment(value)
    }
}

impl From<ClusterServiceVersion> for ManifestObject {
    fn from(value: ClusterServiceVersion) -> Self {
        Self::ClusterServiceVersion(value)
    }
}

impl From<GenericObject> for ManifestObject {
    fn from(value: GenericObject) -> Self {
        Self::Other(value)
    }
}
