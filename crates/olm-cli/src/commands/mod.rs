//! Command implementations for olm-cli

pub mod capabilities;
pub mod manifests;

pub use capabilities::run_capabilities;
pub use manifests::run_manifests;
