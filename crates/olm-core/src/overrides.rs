//! Injection of configuration values into decoded manifests.
//!
//! Only two kinds carry pod templates the addon configures: `Deployment`
//! and `ClusterServiceVersion` (through each deployment of its install
//! strategy). Every other object passes through untouched.

use olm_manifest::{DeploymentSpec, ManifestObject, PodSpec};

use crate::config::ConfigValues;

/// Apply `values` to every object of a bundle, in place.
///
/// Objects are never added, removed or reordered, and applying the same
/// values twice gives the same result as applying them once.
pub fn apply_config(objects: &mut [ManifestObject], values: &ConfigValues) {
    if values.is_empty() {
        return;
    }

    let mut patched = 0usize;
    for object in objects.iter_mut() {
        patched += apply_to_object(object, values);
    }
    tracing::debug!(patched, "Applied configuration values");
}

/// Apply `values` to one object, returning the number of pod specs patched.
pub fn apply_to_object(object: &mut ManifestObject, values: &ConfigValues) -> usize {
    match object {
        ManifestObject::Deployment(deployment) => {
            usize::from(apply_to_deployment_spec(&mut deployment.spec, values))
        }
        ManifestObject::ClusterServiceVersion(csv) => csv
            .strategy_deployments_mut()
            .map(|deployment| apply_to_deployment_spec(&mut deployment.spec, values))
            .filter(|patched| *patched)
            .count(),
        ManifestObject::Other(_) => 0,
    }
}

/// Patch the pod template of a deployment spec.
///
/// Placement values create a missing `template.spec`; an image alone only
/// touches containers that already exist.
fn apply_to_deployment_spec(spec: &mut Option<DeploymentSpec>, values: &ConfigValues) -> bool {
    let pod = if values.node_selector.is_some() || values.tolerations.is_some() {
        spec.get_or_insert_with(Default::default).pod_spec_or_insert()
    } else {
        match spec.as_mut().and_then(DeploymentSpec::pod_spec_mut) {
            Some(pod) => pod,
            None => return false,
        }
    };
    apply_to_pod_spec(pod, values);
    true
}

/// Set node selector, tolerations and container images on a pod spec.
///
/// The image goes to every entry of `containers`; init containers are left
/// alone.
pub fn apply_to_pod_spec(pod: &mut PodSpec, values: &ConfigValues) {
    if let Some(selector) = &values.node_selector {
        pod.node_selector = Some(selector.clone());
    }

    if let Some(tolerations) = &values.tolerations {
        pod.tolerations = Some(tolerations.clone());
    }

    if let Some(image) = &values.image {
        for container in pod.containers_mut() {
            container.image = Some(image.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use olm_manifest::{Scheme, Toleration, decode_manifests};
    use olm_test_utils::fixtures;
    use pretty_assertions::assert_eq;

    fn decode(content: &str) -> Vec<ManifestObject> {
        decode_manifests("test.yaml", content, &Scheme::olm()).unwrap()
    }

    fn full_values() -> ConfigValues {
        ConfigValues::new()
            .with_node_selector([("node-role.kubernetes.io/infra", "")])
            .with_tolerations(vec![Toleration {
                key: Some("node-role.kubernetes.io/infra".into()),
                operator: Some("Exists".into()),
                effect: Some("NoSchedule".into()),
                ..Toleration::default()
            }])
            .with_image("quay.io/example/olm:custom")
    }

    #[test]
    fn test_image_reaches_every_container() {
        let mut objects = decode(fixtures::DEPLOYMENT_TWO_CONTAINERS);
        apply_config(&mut objects, &ConfigValues::new().with_image("img:v9"));

        let pod = objects[0].as_deployment().unwrap().pod_spec().unwrap();
        let images: Vec<_> = pod
            .containers()
            .iter()
            .map(|c| c.image.as_deref())
            .collect();
        assert_eq!(images, vec![Some("img:v9"), Some("img:v9")]);
    }

    #[test]
    fn test_image_only_leaves_placement_untouched() {
        let mut objects = decode(fixtures::DEPLOYMENT_TWO_CONTAINERS);
        let before = objects[0].as_deployment().unwrap().pod_spec().unwrap().clone();

        apply_config(&mut objects, &ConfigValues::new().with_image("img:v9"));

        let after = objects[0].as_deployment().unwrap().pod_spec().unwrap();
        assert_eq!(after.node_selector, before.node_selector);
        assert_eq!(after.tolerations, before.tolerations);
        assert_eq!(after.extra, before.extra);
    }

    #[test]
    fn test_every_csv_deployment_is_patched() {
        let mut objects = decode(fixtures::CSV_TWO_DEPLOYMENTS);
        let values = full_values();
        apply_config(&mut objects, &values);

        let csv = objects[0].as_cluster_service_version().unwrap();
        let specs: Vec<_> = csv.deployment_specs().collect();
        assert_eq!(specs.len(), 2);
        for spec in specs {
            let pod = spec.pod_spec().unwrap();
            assert_eq!(pod.node_selector, values.node_selector);
            assert_eq!(pod.tolerations, values.tolerations);
            assert!(
                pod.containers()
                    .iter()
                    .all(|c| c.image.as_deref() == values.image.as_deref())
            );
        }
    }

    #[test]
    fn test_tolerations_are_replaced() {
        let mut objects = decode(fixtures::DEPLOYMENT_TWO_CONTAINERS);
        let replacement = vec![Toleration {
            key: Some("only".into()),
            operator: Some("Exists".into()),
            ..Toleration::default()
        }];
        apply_config(
            &mut objects,
            &ConfigValues::new().with_tolerations(replacement.clone()),
        );

        let pod = objects[0].as_deployment().unwrap().pod_spec().unwrap();
        assert_eq!(pod.tolerations, Some(replacement));
    }

    #[test]
    fn test_empty_values_leave_bundle_unchanged() {
        let content = format!(
            "{}---\n{}---\n{}",
            fixtures::DEPLOYMENT_TWO_CONTAINERS,
            fixtures::CSV_TWO_DEPLOYMENTS,
            fixtures::CLEANUP_CONFIGMAP
        );
        let original = decode(&content);
        let mut objects = original.clone();

        apply_config(&mut objects, &ConfigValues::default());
        assert_eq!(objects, original);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let content = format!(
            "{}---\n{}",
            fixtures::DEPLOYMENT_TWO_CONTAINERS,
            fixtures::CSV_TWO_DEPLOYMENTS
        );
        let values = full_values();

        let mut once = decode(&content);
        apply_config(&mut once, &values);
        let mut twice = once.clone();
        apply_config(&mut twice, &values);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_other_kinds_untouched() {
        let original = decode(fixtures::CLEANUP_CONFIGMAP);
        let mut objects = original.clone();

        apply_config(&mut objects, &full_values());
        assert_eq!(objects, original);
    }

    #[test]
    fn test_patched_count() {
        let mut objects = decode(&format!(
            "{}---\n{}---\n{}",
            fixtures::DEPLOYMENT_TWO_CONTAINERS,
            fixtures::CSV_TWO_DEPLOYMENTS,
            fixtures::CLEANUP_CONFIGMAP
        ));
        let values = full_values();
        let counts: Vec<_> = objects
            .iter_mut()
            .map(|o| apply_to_object(o, &values))
            .collect();
        assert_eq!(counts, vec![1, 2, 0]);
    }

    #[test]
    fn test_pod_spec_without_containers() {
        let mut pod = PodSpec::default();
        apply_to_pod_spec(&mut pod, &ConfigValues::new().with_image("img"));
        assert!(pod.containers.is_none());
    }

    #[test]
    fn test_image_alone_does_not_create_template() {
        let source = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: bare\nspec:\n  replicas: 1\n";
        let original = decode(source);
        let mut objects = original.clone();

        let patched = apply_to_object(&mut objects[0], &ConfigValues::new().with_image("img"));
        assert_eq!(patched, 0);
        assert_eq!(objects, original);
    }

    #[test]
    fn test_placement_creates_missing_template() {
        let mut objects =
            decode("apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: bare\n");
        apply_config(
            &mut objects,
            &ConfigValues::new().with_node_selector([("os", "linux")]),
        );

        let pod = objects[0].as_deployment().unwrap().pod_spec().unwrap();
        assert_eq!(
            pod.node_selector.as_ref().and_then(|s| s.get("os")).map(String::as_str),
            Some("linux")
        );
        assert!(pod.containers.is_none());
    }
}
