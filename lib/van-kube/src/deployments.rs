//! Get-or-create for the two deployments of a VAN site
//!
//! Each ensure call makes one lookup and at most one create. An existing
//! deployment always wins over the desired spec: it is returned unchanged and
//! any drift is only logged. Nothing is retried.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta, OwnerReference};
use tracing::{debug, info, warn};
use van_api::constants::{
    CONTROLLER_DEPLOYMENT_NAME, CONTROLLER_SERVICE_ACCOUNT_NAME, TRANSPORT_DEPLOYMENT_NAME,
    TRANSPORT_SERVICE_ACCOUNT_NAME,
};
use van_api::{RoleSpec, VanRouterSpec};

use crate::client::{is_not_found, DeploymentApi};
use crate::container::{container_for_controller, container_for_transport, non_empty};
use crate::drift::detect_drift;
use crate::{Result, VanError};

/// Site role a deployment belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Controller,
    Transport,
}

impl Role {
    pub fn deployment_name(&self) -> &'static str {
        match self {
            Role::Controller => CONTROLLER_DEPLOYMENT_NAME,
            Role::Transport => TRANSPORT_DEPLOYMENT_NAME,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Controller => write!(f, "controller"),
            Role::Transport => write!(f, "transport"),
        }
    }
}

/// Result of a successful ensure call
#[derive(Clone, Debug, PartialEq)]
pub enum EnsureOutcome {
    /// The deployment was already present and has been left untouched
    Existing(Deployment),
    /// The deployment was absent and has been created
    Created(Deployment),
}

impl EnsureOutcome {
    pub fn deployment(&self) -> &Deployment {
        match self {
            EnsureOutcome::Existing(d) | EnsureOutcome::Created(d) => d,
        }
    }

    pub fn into_inner(self) -> Deployment {
        match self {
            EnsureOutcome::Existing(d) | EnsureOutcome::Created(d) => d,
        }
    }

    pub fn was_created(&self) -> bool {
        matches!(self, EnsureOutcome::Created(_))
    }
}

/// Build the controller deployment, owned by `owner_ref`
pub fn build_controller_deployment(spec: &VanRouterSpec, owner_ref: OwnerReference) -> Deployment {
    let role = &spec.controller;
    let mut deployment = build_deployment(
        CONTROLLER_DEPLOYMENT_NAME,
        &spec.namespace,
        role,
        CONTROLLER_SERVICE_ACCOUNT_NAME,
        container_for_controller(role),
        None,
    );
    deployment.metadata.owner_references = Some(vec![owner_ref]);
    deployment
}

/// Build the transport deployment; its pod template carries the role's annotations
pub fn build_transport_deployment(spec: &VanRouterSpec) -> Deployment {
    let role = &spec.transport;
    build_deployment(
        TRANSPORT_DEPLOYMENT_NAME,
        &spec.namespace,
        role,
        TRANSPORT_SERVICE_ACCOUNT_NAME,
        container_for_transport(role),
        non_empty_map(&role.annotations),
    )
}

fn build_deployment(
    name: &str,
    namespace: &str,
    role: &RoleSpec,
    service_account: &str,
    mut container: Container,
    annotations: Option<BTreeMap<String, String>>,
) -> Deployment {
    container.volume_mounts = non_empty(role.volume_mounts.clone());

    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(role.replicas),
            selector: LabelSelector {
                match_labels: Some(role.labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(role.labels.clone()),
                    annotations,
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    service_account_name: Some(service_account.to_string()),
                    containers: vec![container],
                    volumes: non_empty(role.volumes.clone()),
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn non_empty_map(map: &BTreeMap<String, String>) -> Option<BTreeMap<String, String>> {
    if map.is_empty() {
        None
    } else {
        Some(map.clone())
    }
}

/// Make sure the controller deployment exists in the site namespace
pub async fn ensure_controller_deployment(
    spec: &VanRouterSpec,
    owner_ref: OwnerReference,
    api: &dyn DeploymentApi,
) -> Result<EnsureOutcome> {
    ensure_deployment(api, &spec.namespace, Role::Controller, || {
        build_controller_deployment(spec, owner_ref)
    })
    .await
}

/// Make sure the transport deployment exists in the site namespace
pub async fn ensure_transport_deployment(
    spec: &VanRouterSpec,
    api: &dyn DeploymentApi,
) -> Result<EnsureOutcome> {
    ensure_deployment(api, &spec.namespace, Role::Transport, || {
        build_transport_deployment(spec)
    })
    .await
}

async fn ensure_deployment<F>(
    api: &dyn DeploymentApi,
    namespace: &str,
    role: Role,
    build: F,
) -> Result<EnsureOutcome>
where
    F: FnOnce() -> Deployment,
{
    let name = role.deployment_name();

    match api.get(namespace, name).await {
        Ok(existing) => {
            info!("VAN site {} already exists: {}/{}", role, namespace, name);
            for drift in detect_drift(&existing, &build()) {
                warn!("VAN site {} {}/{} differs from spec: {}", role, namespace, name, drift);
            }
            Ok(EnsureOutcome::Existing(existing))
        }
        Err(e) if is_not_found(&e) => {
            debug!("VAN site {} {}/{} not found, creating", role, namespace, name);
            let desired = build();
            match api.create(namespace, &desired).await {
                Ok(created) => {
                    info!("Created VAN site {}: {}/{}", role, namespace, name);
                    Ok(EnsureOutcome::Created(created))
                }
                Err(source) => Err(VanError::Create {
                    name: name.to_string(),
                    namespace: namespace.to_string(),
                    source,
                }),
            }
        }
        Err(source) => Err(VanError::Lookup {
            name: name.to_string(),
            namespace: namespace.to_string(),
            source,
        }),
    }
}
