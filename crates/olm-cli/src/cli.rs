//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// OLM addon - Resolve the OLM manifests for a managed cluster
#[derive(Parser, Debug)]
#[command(name = "olm-addon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the manifests to deploy on a cluster as a YAML stream
    ///
    /// Nothing is printed for clusters the addon is not installed on.
    ///
    /// Examples:
    ///   olm-addon manifests --cluster edge -l vendor=Kubernetes --kube-version v1.26.4
    ///   olm-addon manifests --cluster edge -l vendor=Kubernetes --config adc.yaml
    ///   olm-addon manifests --cluster edge -l vendor=Kubernetes --manifests-dir ./manifests
    Manifests(ManifestsArgs),

    /// Print how the addon is installed and health-checked
    Capabilities {
        /// Output as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ManifestsArgs {
    /// Name of the managed cluster
    #[arg(long)]
    pub cluster: String,

    /// Cluster label as KEY=VALUE (repeatable)
    #[arg(short, long = "label", value_name = "KEY=VALUE", value_parser = parse_label)]
    pub labels: Vec<(String, String)>,

    /// Kubernetes version reported by the cluster, e.g. v1.26.4
    #[arg(long)]
    pub kube_version: Option<String>,

    /// Read bundles from this directory instead of the embedded set
    #[arg(long, value_name = "DIR")]
    pub manifests_dir: Option<PathBuf>,

    /// AddOnDeploymentConfig (or flat values) file to apply
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

fn parse_label(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{raw}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_manifests_command() {
        let cli = Cli::try_parse_from([
            "olm-addon",
            "manifests",
            "--cluster",
            "edge",
            "-l",
            "vendor=Kubernetes",
            "--label",
            "region=eu=west",
            "--kube-version",
            "v1.26.4",
        ])
        .unwrap();

        let Commands::Manifests(args) = cli.command else {
            panic!("expected manifests command");
        };
        assert_eq!(args.cluster, "edge");
        assert_eq!(
            args.labels,
            vec![
                ("vendor".to_string(), "Kubernetes".to_string()),
                ("region".to_string(), "eu=west".to_string()),
            ]
        );
        assert_eq!(args.kube_version.as_deref(), Some("v1.26.4"));
        assert!(args.manifests_dir.is_none());
    }

    #[test]
    fn parse_capabilities_json() {
        let cli = Cli::try_parse_from(["olm-addon", "-v", "capabilities", "--json"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command, Commands::Capabilities { json: true });
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::try_parse_from(["olm-addon", "capabilities", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn reject_malformed_label() {
        for bad in ["vendor", "=Kubernetes"] {
            let result = Cli::try_parse_from([
                "olm-addon",
                "manifests",
                "--cluster",
                "edge",
                "--label",
                bad,
            ]);
            assert!(result.is_err(), "label {bad:?} should be rejected");
        }
    }

    #[test]
    fn label_value_may_be_empty() {
        assert_eq!(
            parse_label("node-role.kubernetes.io/infra=").unwrap(),
            ("node-role.kubernetes.io/infra".to_string(), String::new())
        );
    }

    #[test]
    fn cluster_is_required() {
        assert!(Cli::try_parse_from(["olm-addon", "manifests"]).is_err());
    }
}
