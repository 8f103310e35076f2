use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ContainerPort, EnvVar, Volume, VolumeMount};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Desired state of a VAN site router: one controller role and one
/// transport role, both deployed into the same namespace
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VanRouterSpec {
    /// Site name
    #[serde(default)]
    pub name: String,

    /// Namespace both deployments live in
    #[serde(default)]
    pub namespace: String,

    /// Service controller role
    #[serde(default)]
    pub controller: RoleSpec,

    /// Router (transport) role
    #[serde(default)]
    pub transport: RoleSpec,
}

/// Deployment settings for a single role of the site
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSpec {
    /// Container image
    #[serde(default)]
    pub image: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_pull_policy: Option<String>,

    /// Number of pod replicas
    #[serde(default = "default_replicas")]
    pub replicas: i32,

    /// Labels used both as the deployment selector and on the pod template
    #[serde(default)]
    pub labels: BTreeMap<String, String>,

    /// Pod template annotations (only applied by roles that support them)
    #[serde(default)]
    pub annotations: BTreeMap<String, String>,

    #[serde(default)]
    pub env: Vec<EnvVar>,

    #[serde(default)]
    pub ports: Vec<ContainerPort>,

    /// Overrides the port probed for liveness
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liveness_port: Option<i32>,

    /// Pod volumes
    #[serde(default)]
    pub volumes: Vec<Volume>,

    /// Mounts for the role's single container
    #[serde(default)]
    pub volume_mounts: Vec<VolumeMount>,
}

impl Default for RoleSpec {
    fn default() -> Self {
        Self {
            image: String::new(),
            image_pull_policy: None,
            replicas: default_replicas(),
            labels: BTreeMap::new(),
            annotations: BTreeMap::new(),
            env: Vec::new(),
            ports: Vec::new(),
            liveness_port: None,
            volumes: Vec::new(),
            volume_mounts: Vec::new(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SpecError {
    #[error("Namespace must not be empty")]
    EmptyNamespace,

    #[error("Image for {0} role must not be empty")]
    EmptyImage(&'static str),

    #[error("Replica count for {role} role must not be negative: {replicas}")]
    NegativeReplicas { role: &'static str, replicas: i32 },
}

impl VanRouterSpec {
    /// Replace the namespace both deployments are created in
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Check that the spec can be turned into deployments
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.namespace.is_empty() {
            return Err(SpecError::EmptyNamespace);
        }
        for (role, spec) in [("controller", &self.controller), ("transport", &self.transport)] {
            if spec.image.is_empty() {
                return Err(SpecError::EmptyImage(role));
            }
            if spec.replicas < 0 {
                return Err(SpecError::NegativeReplicas {
                    role,
                    replicas: spec.replicas,
                });
            }
        }
        Ok(())
    }
}

fn default_replicas() -> i32 {
    1
}
