//! Differences between a live deployment and the one the spec would build
//!
//! Existing deployments are never patched; drift is only reported.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Container;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Drift {
    Replicas {
        existing: Option<i32>,
        desired: Option<i32>,
    },
    SelectorLabels {
        existing: BTreeMap<String, String>,
        desired: BTreeMap<String, String>,
    },
    Image {
        container: String,
        existing: Option<String>,
        desired: Option<String>,
    },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::Replicas { existing, desired } => {
                write!(f, "replicas {:?} (desired {:?})", existing, desired)
            }
            Drift::SelectorLabels { existing, desired } => {
                write!(f, "selector labels {:?} (desired {:?})", existing, desired)
            }
            Drift::Image {
                container,
                existing,
                desired,
            } => write!(
                f,
                "container {} image {:?} (desired {:?})",
                container, existing, desired
            ),
        }
    }
}

pub fn detect_drift(existing: &Deployment, desired: &Deployment) -> Vec<Drift> {
    let mut drifts = Vec::new();

    let existing_spec = existing.spec.as_ref();
    let desired_spec = desired.spec.as_ref();

    let existing_replicas = existing_spec.and_then(|s| s.replicas);
    let desired_replicas = desired_spec.and_then(|s| s.replicas);
    if existing_replicas != desired_replicas {
        drifts.push(Drift::Replicas {
            existing: existing_replicas,
            desired: desired_replicas,
        });
    }

    let existing_labels = selector_labels(existing);
    let desired_labels = selector_labels(desired);
    if existing_labels != desired_labels {
        drifts.push(Drift::SelectorLabels {
            existing: existing_labels,
            desired: desired_labels,
        });
    }

    let existing_containers = containers(existing);
    for wanted in containers(desired) {
        let current = existing_containers
            .iter()
            .find(|c| c.name == wanted.name)
            .and_then(|c| c.image.clone());
        if current != wanted.image {
            drifts.push(Drift::Image {
                container: wanted.name.clone(),
                existing: current,
                desired: wanted.image.clone(),
            });
        }
    }

    drifts
}

fn selector_labels(deployment: &Deployment) -> BTreeMap<String, String> {
    deployment
        .spec
        .as_ref()
        .and_then(|s| s.selector.match_labels.clone())
        .unwrap_or_default()
}

fn containers(deployment: &Deployment) -> &[Container] {
    deployment
        .spec
        .as_ref()
        .and_then(|s| s.template.spec.as_ref())
        .map(|p| p.containers.as_slice())
        .unwrap_or(&[])
}
