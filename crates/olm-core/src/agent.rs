//! The addon agent: the four resolution stages behind one call.

use std::sync::Arc;

use olm_manifest::{BundleLoader, ManifestObject, ManifestStore, Scheme};

use crate::capabilities::AgentCapabilities;
use crate::config::{ConfigSource, ConfigValues, NoConfig};
use crate::eligibility::is_eligible;
use crate::overrides::apply_config;
use crate::version::resolve_bundle_key;
use crate::{EnvironmentContext, Result};

/// Name the addon registers under.
pub const ADDON_NAME: &str = "olm-addon";

/// Resolves the OLM manifests for managed clusters.
///
/// Immutable after construction and safe to share between threads; each
/// call reads the store and the config source afresh.
#[derive(Clone)]
pub struct OlmAgent {
    addon_name: String,
    scheme: Arc<Scheme>,
    store: Arc<dyn ManifestStore>,
    config: Arc<dyn ConfigSource>,
}

impl OlmAgent {
    /// An agent over `store` with the OLM decoder table and no configuration.
    pub fn new(store: Arc<dyn ManifestStore>) -> Self {
        Self {
            addon_name: ADDON_NAME.to_string(),
            scheme: Arc::new(Scheme::olm()),
            store,
            config: Arc::new(NoConfig),
        }
    }

    pub fn with_config_source(mut self, config: Arc<dyn ConfigSource>) -> Self {
        self.config = config;
        self
    }

    pub fn with_scheme(mut self, scheme: Arc<Scheme>) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn with_addon_name(mut self, name: impl Into<String>) -> Self {
        self.addon_name = name.into();
        self
    }

    pub fn addon_name(&self) -> &str {
        &self.addon_name
    }

    pub fn capabilities(&self) -> AgentCapabilities {
        AgentCapabilities::for_addon(&self.addon_name)
    }

    /// Resolve the manifests to deploy on `env`, in install order.
    ///
    /// An ineligible cluster gets an empty list without any store access.
    /// Configuration failures only drop the overrides; a missing or
    /// malformed manifest fails the call.
    pub fn manifests(&self, env: &EnvironmentContext) -> Result<Vec<ManifestObject>> {
        let span = tracing::debug_span!("manifests", cluster = %env.name);
        let _enter = span.enter();

        if !is_eligible(&env.labels) {
            tracing::info!(cluster = %env.name, "Cluster is not eligible, skipping OLM install");
            return Ok(Vec::new());
        }

        let key = resolve_bundle_key(env.version.as_deref());
        tracing::debug!(bundle = %key, "Resolved manifest bundle");

        let mut objects = BundleLoader::new(self.store.as_ref(), &self.scheme).load(key)?;

        let values = self.config_values(env);
        apply_config(&mut objects, &values);

        tracing::debug!(objects = objects.len(), "Resolved manifests");
        Ok(objects)
    }

    fn config_values(&self, env: &EnvironmentContext) -> ConfigValues {
        match self.config.values(env) {
            Ok(values) => values,
            Err(e) if e.is_not_found() => {
                tracing::debug!("No configuration for cluster: {}", e);
                ConfigValues::default()
            }
            Err(e) => {
                tracing::warn!("Continuing without configuration overrides: {}", e);
                ConfigValues::default()
            }
        }
    }
}

impl std::fmt::Debug for OlmAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OlmAgent")
            .field("addon_name", &self.addon_name)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}
