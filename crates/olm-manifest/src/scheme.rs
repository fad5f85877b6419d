//! The decoder table mapping `apiVersion`/`kind` pairs to typed decoders.
//!
//! A [`Scheme`] is assembled once with [`SchemeBuilder`] and is immutable
//! afterwards, so a single instance can be shared by every concurrent
//! resolution.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_yaml::Value;

use crate::error::DecodeError;
use crate::object::{ClusterServiceVersion, Deployment, GenericObject, ManifestObject, TypeMeta};

/// A kind that decodes into its own [`ManifestObject`] variant.
pub trait Resource: DeserializeOwned + Into<ManifestObject> {
    const API_VERSION: &'static str;
    const KIND: &'static str;
}

impl Resource for Deployment {
    const API_VERSION: &'static str = "apps/v1";
    const KIND: &'static str = "Deployment";
}

impl Resource for ClusterServiceVersion {
    const API_VERSION: &'static str = "operators.coreos.com/v1alpha1";
    const KIND: &'static str = "ClusterServiceVersion";
}

type DecodeFn = fn(Value) -> Result<ManifestObject, serde_yaml::Error>;

fn decode_as<T: Resource>(value: Value) -> Result<ManifestObject, serde_yaml::Error> {
    serde_yaml::from_value::<T>(value).map(Into::into)
}

/// Builder for a [`Scheme`].
#[derive(Debug, Default)]
pub struct SchemeBuilder {
    decoders: HashMap<TypeMeta, DecodeFn>,
}

impl SchemeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T` for typed decoding.
    pub fn register<T: Resource>(mut self) -> Self {
        self.decoders
            .insert(TypeMeta::new(T::API_VERSION, T::KIND), decode_as::<T>);
        self
    }

    pub fn build(self) -> Scheme {
        Scheme {
            decoders: self.decoders,
        }
    }
}

/// Immutable decoder table.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    decoders: HashMap<TypeMeta, DecodeFn>,
}

impl Scheme {
    pub fn builder() -> SchemeBuilder {
        SchemeBuilder::new()
    }

    /// The scheme used for OLM bundles: deployments and cluster service
    /// versions are typed, everything else passes through.
    pub fn olm() -> Self {
        Self::builder()
            .register::<Deployment>()
            .register::<ClusterServiceVersion>()
            .build()
    }

    pub fn is_registered(&self, type_meta: &TypeMeta) -> bool {
        self.decoders.contains_key(type_meta)
    }

    /// Decode one parsed document into objects.
    ///
    /// A list wrapper (a kind ending in `List` with an `items` field) yields
    /// its items in order; the wrapper itself is dropped.
    pub fn decode(&self, value: Value) -> Result<Vec<ManifestObject>, DecodeError> {
        let mut objects = Vec::new();
        self.decode_into(value, &mut objects)?;
        Ok(objects)
    }

    fn decode_into(&self, value: Value, out: &mut Vec<ManifestObject>) -> Result<(), DecodeError> {
        let type_meta = type_meta_of(&value)?;

        let value = match value {
            Value::Mapping(mut mapping) if type_meta.kind.ends_with("List") => {
                match mapping.remove("items") {
                    Some(Value::Sequence(items)) => {
                        for item in items {
                            self.decode_into(item, out)?;
                        }
                        return Ok(());
                    }
                    Some(_) => {
                        return Err(DecodeError::InvalidList {
                            kind: type_meta.kind,
                        });
                    }
                    None => Value::Mapping(mapping),
                }
            }
            other => other,
        };

        let object = match self.decoders.get(&type_meta) {
            Some(decode) => decode(value),
            None => serde_yaml::from_value::<GenericObject>(value).map(ManifestObject::Other),
        }
        .map_err(|source| DecodeError::Invalid {
            api_version: type_meta.api_version,
            kind: type_meta.kind,
            source,
        })?;

        out.push(object);
        Ok(())
    }
}

fn type_meta_of(value: &Value) -> Result<TypeMeta, DecodeError> {
    if !value.is_mapping() {
        return Err(DecodeError::NotAMapping);
    }
    let field = |name: &'static str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or(DecodeError::MissingTypeMeta { field: name })
    };
    Ok(TypeMeta::new(field("apiVersion")?, field("kind")?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Value {
        serde_yaml::from_str(source).unwrap()
    }

    #[test]
    fn test_olm_scheme_registers_typed_kinds() {
        let scheme = Scheme::olm();
        assert!(scheme.is_registered(&TypeMeta::new("apps/v1", "Deployment")));
        assert!(scheme.is_registered(&TypeMeta::new(
            "operators.coreos.com/v1alpha1",
            "ClusterServiceVersion"
        )));
        assert!(!scheme.is_registered(&TypeMeta::new("v1", "Namespace")));
    }

    #[test]
    fn test_decode_typed_deployment() {
        let objects = Scheme::olm()
            .decode(parse("apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: d\n"))
            .unwrap();
        assert_eq!(objects.len(), 1);
        assert!(objects[0].as_deployment().is_some());
    }

    #[test]
    fn test_decode_deployment_with_other_version_is_generic() {
        let objects = Scheme::olm()
            .decode(parse("apiVersion: apps/v1beta1\nkind: Deployment\n"))
            .unwrap();
        assert!(matches!(objects[0], ManifestObject::Other(_)));
    }

    #[test]
    fn test_empty_scheme_decodes_everything_generic() {
        let objects = Scheme::default()
            .decode(parse("apiVersion: apps/v1\nkind: Deployment\n"))
            .unwrap();
        assert!(matches!(objects[0], ManifestObject::Other(_)));
    }

    #[test]
    fn test_decode_list_unwraps_items_in_order() {
        let source = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: Namespace
    metadata: {name: olm}
  - apiVersion: apps/v1
    kind: Deployment
    metadata: {name: olm-operator}
  - apiVersion: v1
    kind: ServiceAccount
    metadata: {name: olm-operator-serviceaccount}
"#;
        let objects = Scheme::olm().decode(parse(source)).unwrap();
        let kinds: Vec<_> = objects.iter().map(|o| o.kind()).collect();

        assert_eq!(kinds, vec!["Namespace", "Deployment", "ServiceAccount"]);
        assert!(objects[1].as_deployment().is_some());
    }

    #[test]
    fn test_decode_nested_lists_flatten_in_order() {
        let source = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: ConfigMapList
    items:
      - {apiVersion: v1, kind: ConfigMap, metadata: {name: a}}
      - {apiVersion: v1, kind: ConfigMap, metadata: {name: b}}
  - {apiVersion: v1, kind: ConfigMap, metadata: {name: c}}
"#;
        let objects = Scheme::olm().decode(parse(source)).unwrap();
        let names: Vec<_> = objects.iter().filter_map(ManifestObject::name).collect();

        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_decode_empty_list() {
        let objects = Scheme::olm()
            .decode(parse("apiVersion: v1\nkind: List\nitems: []\n"))
            .unwrap();
        assert!(objects.is_empty());
    }

    #[test]
    fn test_decode_list_kind_without_items_is_an_object() {
        let objects = Scheme::olm()
            .decode(parse("apiVersion: example.io/v1\nkind: AllowList\nspec: {}\n"))
            .unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].kind(), "AllowList");
    }

    #[test]
    fn test_decode_list_with_scalar_items_fails() {
        let err = Scheme::olm()
            .decode(parse("apiVersion: v1\nkind: List\nitems: nope\n"))
            .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidList { .. }));
    }

    #[test]
    fn test_decode_missing_kind() {
        let err = Scheme::olm().decode(parse("apiVersion: v1\n")).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTypeMeta { field: "kind" }));
    }

    #[test]
    fn test_decode_missing_api_version() {
        let err = Scheme::olm().decode(parse("kind: Namespace\n")).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::MissingTypeMeta { field: "apiVersion" }
        ));
    }

    #[test]
    fn test_decode_scalar_document() {
        let err = Scheme::olm().decode(parse("just a string")).unwrap_err();
        assert!(matches!(err, DecodeError::NotAMapping));
    }

    #[test]
    fn test_decode_invalid_typed_field() {
        let source = r#"
apiVersion: apps/v1
kind: Deployment
spec:
  template:
    spec:
      containers: "not a list"
"#;
        let err = Scheme::olm().decode(parse(source)).unwrap_err();
        assert!(matches!(err, DecodeError::Invalid { .. }));
        assert!(err.to_string().contains("apps/v1 Deployment"));
    }
}
