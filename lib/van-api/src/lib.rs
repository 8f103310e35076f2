//! VAN site API types for Kubernetes integration
//!
//! This library defines the desired state of a VAN site:
//! - VanRouterSpec: namespace plus the controller and transport roles
//! - RoleSpec: replicas, labels, volumes and container settings for one role
//! - Well-known deployment, container and service account names
//! - Owner references used for cascading deletion

pub mod constants;
pub mod owner;
pub mod spec;

pub use owner::{owner_reference_for, OwnerRefError};
pub use spec::{RoleSpec, SpecError, VanRouterSpec};
