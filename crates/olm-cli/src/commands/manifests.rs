//! Manifests command implementation

use std::io::Write;
use std::sync::Arc;

use olm_core::bundled::{bundled_store, bundled_versions};
use olm_core::{ConfigSource, EnvironmentContext, FileConfigSource, NoConfig, OlmAgent};
use olm_manifest::{DirStore, ManifestStore, render_stream};

use crate::cli::ManifestsArgs;
use crate::error::{CliError, Result};

/// Run the manifests command
pub fn run_manifests(args: &ManifestsArgs) -> Result<()> {
    let agent = build_agent(args)?;
    let env = environment(args);

    let objects = agent.manifests(&env)?;
    let stream = render_stream(&objects)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(stream.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn build_agent(args: &ManifestsArgs) -> Result<OlmAgent> {
    let store: Arc<dyn ManifestStore> = match &args.manifests_dir {
        Some(dir) => {
            if !dir.is_dir() {
                return Err(CliError::user(format!(
                    "Manifests directory not found: {}",
                    dir.display()
                )));
            }
            let store = DirStore::new(dir);
            tracing::debug!(dir = %store.root().display(), "Using manifests from disk");
            Arc::new(store)
        }
        None => {
            let versions: Vec<String> = bundled_versions()
                .iter()
                .map(ToString::to_string)
                .collect();
            tracing::debug!(versions = %versions.join(","), "Using embedded manifests");
            Arc::new(bundled_store())
        }
    };

    let config: Arc<dyn ConfigSource> = match &args.config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::user(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Arc::new(FileConfigSource::new(path))
        }
        None => Arc::new(NoConfig),
    };

    Ok(OlmAgent::new(store).with_config_source(config))
}

fn environment(args: &ManifestsArgs) -> EnvironmentContext {
    let env = EnvironmentContext::new(&args.cluster).with_labels(args.labels.iter().cloned());
    match &args.kube_version {
        Some(version) => env.with_version(version),
        None => env,
    }
}
