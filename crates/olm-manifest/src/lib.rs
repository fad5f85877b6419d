//! Manifest decoding for the OLM addon.
//!
//! Turns versioned bundles of multi-document YAML into ordered, typed
//! [`ManifestObject`]s:
//!
//! - [`store`]: read-only sources of raw manifest bytes
//! - [`document`]: `---` splitting and stream rendering
//! - [`scheme`]: the immutable decoder table
//! - [`loader`]: bundle loading in install order

pub mod document;
pub mod error;
pub mod key;
pub mod loader;
pub mod object;
pub mod scheme;
pub mod store;

pub use document::{Document, is_blank, render_stream, split_documents};
pub use error::{DecodeError, Error, Result};
pub use key::BundleKey;
pub use loader::{BundleLoader, MANIFEST_FILES, decode_manifests, load_bundle};
pub use object::{
    ClusterServiceVersion, ClusterServiceVersionSpec, Container, Deployment, DeploymentSpec,
    GenericObject, ManifestObject, NamedInstallStrategy, ObjectMeta, PodSpec, PodTemplateSpec,
    StrategyDeploymentSpec, StrategyDetailsDeployment, Toleration, TypeMeta,
};
pub use scheme::{Resource, Scheme, SchemeBuilder};
pub use store::{DirStore, ManifestStore, MemoryStore};
