//! Manifest resolution and configuration overrides for the OLM addon
//!
//! For one managed cluster this crate decides whether OLM is installed,
//! which manifest bundle applies and how it is parametrized:
//!
//! - **Eligibility**: clusters without a vendor label, or running OpenShift, get nothing
//! - **Version resolution**: the reported Kubernetes version selects a `v<major>.<minor>` bundle
//! - **Loading**: the bundle is decoded in install order (see `olm-manifest`)
//! - **Overrides**: node placement and image configuration are patched into pod templates
//!
//! # Architecture
//!
//! ```text
//!                    olm-cli
//!                       |
//!                   olm-core  (OlmAgent)
//!                       |
//!                 olm-manifest
//! ```
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use olm_core::{EnvironmentContext, OlmAgent, bundled::bundled_store};
//!
//! let agent = OlmAgent::new(Arc::new(bundled_store()));
//! let env = EnvironmentContext::new("cluster1")
//!     .with_label("vendor", "Kubernetes")
//!     .with_version("v1.26.4");
//!
//! let objects = agent.manifests(&env)?;
//! assert!(!objects.is_empty());
//! # Ok::<(), olm_core::Error>(())
//! ```

pub mod agent;
pub mod bundled;
pub mod capabilities;
pub mod config;
pub mod eligibility;
pub mod environment;
pub mod error;
pub mod overrides;
pub mod version;

pub use agent::{ADDON_NAME, OlmAgent};
pub use capabilities::{
    AgentCapabilities, GroupVersionResource, HealthProber, InstallStrategy, NamespacedName,
};
pub use config::{
    AddOnDeploymentConfig, ConfigSource, ConfigValues, FileConfigSource, NoConfig, StaticConfig,
};
pub use eligibility::is_eligible;
pub use environment::EnvironmentContext;
pub use error::{ConfigError, Error, Result};
pub use overrides::apply_config;
pub use version::{DEFAULT_BUNDLE_KEY, resolve_bundle_key};
