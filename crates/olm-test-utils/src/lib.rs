//! Shared test utilities for the olm-addon workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`fixtures`]: sample manifest documents
//! - [`tree`]: [`ManifestTree`] builder for on-disk bundles

pub mod fixtures;
pub mod tree;

pub use tree::ManifestTree;
