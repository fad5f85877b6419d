//! Sources of per-cluster configuration values.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::deployment_config::{ADDON_DEPLOYMENT_CONFIG_KIND, AddOnDeploymentConfig};
use super::values::ConfigValues;
use crate::EnvironmentContext;
use crate::error::ConfigError;

/// Supplies the configuration values for a cluster.
///
/// Failures never abort resolution; [`ConfigError::NotFound`] means the
/// cluster simply has no configuration.
pub trait ConfigSource: Send + Sync {
    fn values(&self, env: &EnvironmentContext) -> Result<ConfigValues, ConfigError>;
}

/// No configuration for any cluster.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfig;

impl ConfigSource for NoConfig {
    fn values(&self, env: &EnvironmentContext) -> Result<ConfigValues, ConfigError> {
        Err(ConfigError::not_found(format!("cluster {}", env.name)))
    }
}

/// The same values for every cluster.
#[derive(Debug, Clone, Default)]
pub struct StaticConfig(pub ConfigValues);

impl ConfigSource for StaticConfig {
    fn values(&self, _env: &EnvironmentContext) -> Result<ConfigValues, ConfigError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Clone)]
enum Location {
    File(PathBuf),
    PerCluster(PathBuf),
}

/// Values read from YAML files on disk.
///
/// A file may hold either an `AddOnDeploymentConfig` or a flat
/// `{NodeSelector, Tolerations, OLMImage}` mapping. Files are read on every
/// call.
#[derive(Debug, Clone)]
pub struct FileConfigSource {
    location: Location,
}

impl FileConfigSource {
    /// One file shared by all clusters.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::File(path.into()),
        }
    }

    /// One `<cluster name>.yaml` file per cluster inside `dir`.
    pub fn per_cluster(dir: impl Into<PathBuf>) -> Self {
        Self {
            location: Location::PerCluster(dir.into()),
        }
    }

    fn path_for(&self, env: &EnvironmentContext) -> Result<PathBuf, ConfigError> {
        match &self.location {
            Location::File(path) => Ok(path.clone()),
            Location::PerCluster(dir) => {
                let name = env.name.as_str();
                if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
                    return Err(ConfigError::invalid(
                        dir.display().to_string(),
                        format!("cluster name '{name}' cannot be used as a file name"),
                    ));
                }
                Ok(dir.join(format!("{name}.yaml")))
            }
        }
    }
}

impl ConfigSource for FileConfigSource {
    fn values(&self, env: &EnvironmentContext) -> Result<ConfigValues, ConfigError> {
        let path = self.path_for(env)?;
        let content = read_config(&path)?;
        parse_config_document(&path.display().to_string(), &content)
    }
}

fn read_config(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            ConfigError::not_found(path.display().to_string())
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Parse a configuration document, accepting both supported shapes.
///
/// A document with `kind: AddOnDeploymentConfig` or a `spec` field is read
/// as an `AddOnDeploymentConfig`; anything else as flat values.
pub fn parse_config_document(origin: &str, content: &str) -> Result<ConfigValues, ConfigError> {
    if olm_manifest::is_blank(content) {
        return Ok(ConfigValues::default());
    }

    let value: Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::invalid(origin, e.to_string()))?;

    let is_deployment_config = value.get("kind").and_then(Value::as_str)
        == Some(ADDON_DEPLOYMENT_CONFIG_KIND)
        || value.get("spec").is_some();

    if is_deployment_config {
        let config: AddOnDeploymentConfig = serde_yaml::from_value(value)
            .map_err(|e| ConfigError::invalid(origin, e.to_string()))?;
        Ok(config.to_values())
    } else {
        ConfigValues::from_yaml_value(origin, value)
    }
}
