//! Site configuration loaded from a YAML file plus environment overrides

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;
use van_api::constants::{
    CONTROLLER_DEPLOYMENT_NAME, DEFAULT_CONTROLLER_IMAGE, DEFAULT_TRANSPORT_IMAGE,
    TRANSPORT_DEPLOYMENT_NAME,
};
use van_api::{RoleSpec, VanRouterSpec};

pub const SITE_CONFIG_ENV: &str = "VAN_SITE_CONFIG";
pub const NAMESPACE_ENV: &str = "VAN_NAMESPACE";
pub const DEFAULT_SITE_CONFIG_PATH: &str = "/etc/van/site.yaml";

/// Label key used when a role does not define its own selector labels
const APPLICATION_LABEL: &str = "application";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub config_path: PathBuf,
    pub namespace_override: Option<String>,
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let config_path = lookup(SITE_CONFIG_ENV)
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_CONFIG_PATH.to_string());
        let namespace_override = lookup(NAMESPACE_ENV).filter(|ns| !ns.is_empty());

        Self {
            config_path: PathBuf::from(config_path),
            namespace_override,
        }
    }

    /// Read the site spec and resolve its namespace.
    ///
    /// The environment override wins over the file; `default_namespace`
    /// (the client's namespace) is used when neither sets one.
    pub fn load_spec(&self, default_namespace: &str) -> Result<VanRouterSpec> {
        let yaml = std::fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read site config {}", self.config_path.display())
        })?;
        let spec = parse_spec(&yaml)
            .with_context(|| format!("Failed to parse site config {}", self.config_path.display()))?;

        let namespace = match (&self.namespace_override, spec.namespace.is_empty()) {
            (Some(ns), _) => ns.clone(),
            (None, true) => default_namespace.to_string(),
            (None, false) => spec.namespace.clone(),
        };
        debug!("Site {} resolved to namespace {}", spec.name, namespace);

        Ok(spec.with_namespace(namespace))
    }
}

/// Parse a site spec, filling in default images and selector labels
pub fn parse_spec(yaml: &str) -> Result<VanRouterSpec> {
    let mut spec: VanRouterSpec = serde_yaml::from_str(yaml)?;
    apply_role_defaults(&mut spec.transport, DEFAULT_TRANSPORT_IMAGE, TRANSPORT_DEPLOYMENT_NAME);
    apply_role_defaults(&mut spec.controller, DEFAULT_CONTROLLER_IMAGE, CONTROLLER_DEPLOYMENT_NAME);
    Ok(spec)
}

fn apply_role_defaults(role: &mut RoleSpec, image: &str, deployment_name: &str) {
    if role.image.is_empty() {
        role.image = image.to_string();
    }
    if role.labels.is_empty() {
        role.labels = BTreeMap::from([(
            APPLICATION_LABEL.to_string(),
            deployment_name.to_string(),
        )]);
    }
}
