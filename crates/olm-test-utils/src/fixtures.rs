//! Sample manifest documents.
//!
//! Every constant ends with a newline so constants can be joined with
//! `"---\n"`.

/// A single CustomResourceDefinition.
pub const CRD: &str = r#"apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: operatorgroups.operators.coreos.com
spec:
  group: operators.coreos.com
  names:
    kind: OperatorGroup
    plural: operatorgroups
  scope: Namespaced
  versions:
    - name: v1
      served: true
      storage: true
      schema:
        openAPIV3Schema:
          type: object
          x-kubernetes-preserve-unknown-fields: true
"#;

/// Three documents: Namespace, ServiceAccount, ClusterRole.
pub const NAMESPACE_SA_ROLE: &str = r#"---
apiVersion: v1
kind: Namespace
metadata:
  name: olm
---
apiVersion: v1
kind: ServiceAccount
metadata:
  name: olm-operator-serviceaccount
  namespace: olm
---
apiVersion: rbac.authorization.k8s.io/v1
kind: ClusterRole
metadata:
  name: system:controller:operator-lifecycle-manager
rules:
  - apiGroups: ["*"]
    resources: ["*"]
    verbs: ["*"]
"#;

/// A deployment with two containers, a node selector and one toleration.
pub const DEPLOYMENT_TWO_CONTAINERS: &str = r#"apiVersion: apps/v1
kind: Deployment
metadata:
  name: olm-operator
  namespace: olm
  labels:
    app: olm-operator
spec:
  replicas: 1
  selector:
    matchLabels:
      app: olm-operator
  template:
    metadata:
      labels:
        app: olm-operator
    spec:
      serviceAccountName: olm-operator-serviceaccount
      nodeSelector:
        kubernetes.io/os: linux
      tolerations:
        - key: node-role.kubernetes.io/master
          operator: Exists
          effect: NoSchedule
      containers:
        - name: olm-operator
          image: quay.io/operator-framework/olm:v0.24.0
          command: ["/bin/olm"]
          args: ["--namespace", "$(OPERATOR_NAMESPACE)", "--writeStatusName", ""]
        - name: sidecar
          image: quay.io/operator-framework/olm:v0.24.0
          command: ["/bin/sidecar"]
"#;

/// A cluster service version embedding two deployments.
pub const CSV_TWO_DEPLOYMENTS: &str = r#"apiVersion: operators.coreos.com/v1alpha1
kind: ClusterServiceVersion
metadata:
  name: packageserver
  namespace: olm
spec:
  displayName: Package Server
  minKubeVersion: 1.11.0
  install:
    strategy: deployment
    spec:
      clusterPermissions:
        - serviceAccountName: olm-operator-serviceaccount
          rules:
            - apiGroups: ["authorization.k8s.io"]
              resources: ["subjectaccessreviews"]
              verbs: ["create", "get"]
      deployments:
        - name: packageserver
          spec:
            replicas: 2
            selector:
              matchLabels:
                app: packageserver
            template:
              metadata:
                labels:
                  app: packageserver
              spec:
                serviceAccountName: olm-operator-serviceaccount
                nodeSelector:
                  kubernetes.io/os: linux
                containers:
                  - name: packageserver
                    image: quay.io/operator-framework/olm:v0.24.0
                    command: ["/bin/package-server"]
        - name: packageserver-metrics
          spec:
            replicas: 1
            template:
              spec:
                containers:
                  - name: metrics
                    image: quay.io/operator-framework/olm:v0.24.0
"#;

/// A list wrapper holding two objects.
pub const LIST_OF_TWO: &str = r#"apiVersion: v1
kind: List
items:
  - apiVersion: v1
    kind: ConfigMap
    metadata:
      name: first
  - apiVersion: v1
    kind: ConfigMap
    metadata:
      name: second
"#;

/// A single ConfigMap.
pub const CLEANUP_CONFIGMAP: &str = r#"apiVersion: v1
kind: ConfigMap
metadata:
  name: olm-cleanup
  namespace: olm
data:
  policy: remove-legacy
"#;
