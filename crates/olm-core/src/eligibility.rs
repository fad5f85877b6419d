//! Cluster eligibility by vendor label.
//!
//! OLM ships with OpenShift and must not be installed there. Clusters have
//! to carry a `vendor` label to be considered at all.

use std::collections::BTreeMap;

/// Label holding the cluster's distribution vendor.
pub const VENDOR_LABEL: &str = "vendor";

/// Vendor value (compared under Unicode case folding) that excludes a cluster.
pub const OPENSHIFT_VENDOR: &str = "OpenShift";

/// Whether the addon may be installed on a cluster with these labels.
///
/// Fails closed: a cluster without a vendor label is not eligible.
pub fn is_eligible(labels: &BTreeMap<String, String>) -> bool {
    match labels.get(VENDOR_LABEL) {
        Some(vendor) => !equal_fold(vendor, OPENSHIFT_VENDOR),
        None => false,
    }
}

/// Case-insensitive equality under Unicode simple case folding.
///
/// Each character folds to a single character, so `"ß"` does not match
/// `"ss"`. Lowercase-only variants such as the long s fold with their
/// base letter.
fn equal_fold(a: &str, b: &str) -> bool {
    a.chars().map(fold).eq(b.chars().map(fold))
}

fn fold(c: char) -> char {
    match c {
        '\u{017F}' => 's',
        '\u{212A}' => 'k',
        '\u{03C2}' => '\u{03C3}',
        _ => {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(single), None) => single,
                _ => c,
            }
        }
    }
}
