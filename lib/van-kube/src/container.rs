//! Container templates for the site roles

use k8s_openapi::api::core::v1::{Container, HTTPGetAction, Probe};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use van_api::constants::{
    CONTROLLER_CONTAINER_NAME, TRANSPORT_CONTAINER_NAME, TRANSPORT_LIVENESS_INITIAL_DELAY_SECONDS,
    TRANSPORT_LIVENESS_PATH, TRANSPORT_LIVENESS_PORT,
};
use van_api::RoleSpec;

/// Router container with an HTTP liveness probe
pub fn container_for_transport(role: &RoleSpec) -> Container {
    let liveness_port = role.liveness_port.unwrap_or(TRANSPORT_LIVENESS_PORT);

    Container {
        name: TRANSPORT_CONTAINER_NAME.to_string(),
        image: Some(role.image.clone()),
        image_pull_policy: role.image_pull_policy.clone(),
        env: non_empty(role.env.clone()),
        ports: non_empty(role.ports.clone()),
        liveness_probe: Some(Probe {
            initial_delay_seconds: Some(TRANSPORT_LIVENESS_INITIAL_DELAY_SECONDS),
            http_get: Some(HTTPGetAction {
                path: Some(TRANSPORT_LIVENESS_PATH.to_string()),
                port: IntOrString::Int(liveness_port),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn container_for_controller(role: &RoleSpec) -> Container {
    Container {
        name: CONTROLLER_CONTAINER_NAME.to_string(),
        image: Some(role.image.clone()),
        image_pull_policy: role.image_pull_policy.clone(),
        env: non_empty(role.env.clone()),
        ports: non_empty(role.ports.clone()),
        ..Default::default()
    }
}

/// Kubernetes omits empty lists; keep built objects comparable with what
/// the API server returns
pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use k8s_openapi::api::core::v1::{ContainerPort, EnvVar};

    fn role() -> RoleSpec {
        RoleSpec {
            image: "quay.io/skupper/router:0.3".to_string(),
            env: vec![EnvVar {
                name: "QDROUTERD_CONF".to_string(),
                value: Some("/etc/qpid-dispatch/qdrouterd.conf".to_string()),
                ..Default::default()
            }],
            ports: vec![ContainerPort {
                name: Some("amqp".to_string()),
                container_port: 5672,
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_transport_container() {
        let container = container_for_transport(&role());
        assert_eq!(container.name, "router");
        assert_eq!(container.image.as_deref(), Some("quay.io/skupper/router:0.3"));
        assert_eq!(container.env.as_ref().map(Vec::len), Some(1));
        assert_eq!(container.ports.as_ref().map(Vec::len), Some(1));

        let probe = container.liveness_probe.unwrap();
        assert_eq!(probe.initial_delay_seconds, Some(60));
        let http_get = probe.http_get.unwrap();
        assert_eq!(http_get.path.as_deref(), Some("/healthz"));
        assert_eq!(http_get.port, IntOrString::Int(9090));
    }

    #[test]
    fn test_transport_liveness_port_override() {
        let mut role = role();
        role.liveness_port = Some(8888);
        let probe = container_for_transport(&role).liveness_probe.unwrap();
        assert_eq!(probe.http_get.unwrap().port, IntOrString::Int(8888));
    }

    #[test]
    fn test_controller_container() {
        let mut role = role();
        role.ports.clear();
        role.image_pull_policy = Some("Always".to_string());
        let container = container_for_controller(&role);
        assert_eq!(container.name, "proxy-controller");
        assert_eq!(container.image_pull_policy.as_deref(), Some("Always"));
        assert!(container.ports.is_none());
        assert!(container.liveness_probe.is_none());
        assert!(container.volume_mounts.is_none());
    }
}
