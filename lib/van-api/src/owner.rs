//! Owner references between site resources

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use thiserror::Error;

use crate::constants::{DEPLOYMENT_API_VERSION, DEPLOYMENT_KIND};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OwnerRefError {
    #[error("Deployment has no name")]
    MissingName,

    #[error("Deployment {0} has no UID")]
    MissingUid(String),
}

/// Build an owner reference pointing at a live deployment.
///
/// Objects that were never persisted carry no UID and cannot own anything.
pub fn owner_reference_for(deployment: &Deployment) -> Result<OwnerReference, OwnerRefError> {
    let name = deployment
        .metadata
        .name
        .clone()
        .ok_or(OwnerRefError::MissingName)?;
    let uid = deployment
        .metadata
        .uid
        .clone()
        .ok_or_else(|| OwnerRefError::MissingUid(name.clone()))?;

    Ok(OwnerReference {
        api_version: DEPLOYMENT_API_VERSION.to_string(),
        kind: DEPLOYMENT_KIND.to_string(),
        name,
        uid,
        ..Default::default()
    })
}
