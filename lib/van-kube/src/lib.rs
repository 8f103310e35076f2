//! Kubernetes plumbing for VAN site deployments
//!
//! This library provides:
//! - A narrow client seam over the apps/v1 Deployment API
//! - Container builders for the controller and transport roles
//! - Get-or-create ensurers for the two site deployments
//! - Drift diagnostics for deployments that already exist

pub mod client;
pub mod container;
pub mod deployments;
pub mod drift;
pub mod error;

pub use client::{get_deployment, is_not_found, DeploymentApi, KubeDeployments};
pub use deployments::{
    build_controller_deployment, build_transport_deployment, ensure_controller_deployment,
    ensure_transport_deployment, EnsureOutcome, Role,
};
pub use drift::{detect_drift, Drift};
pub use error::{Result, VanError};
