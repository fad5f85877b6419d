//! Configuration values and where they come from.
//!
//! - [`values`]: the recognized override keys
//! - [`deployment_config`]: `AddOnDeploymentConfig` documents
//! - [`source`]: per-cluster lookup of values

pub mod deployment_config;
pub mod source;
pub mod values;

pub use deployment_config::{
    AddOnDeploymentConfig, AddOnDeploymentConfigSpec, CustomizedVariable, NodePlacement,
};
pub use source::{ConfigSource, FileConfigSource, NoConfig, StaticConfig, parse_config_document};
pub use values::{ConfigValues, IMAGE_KEY, NODE_SELECTOR_KEY, TOLERATIONS_KEY};
