//! Well-known names for the resources that make up a VAN site

/// Transport (router) deployment name
pub const TRANSPORT_DEPLOYMENT_NAME: &str = "skupper-router";
/// Name of the router container inside the transport pod
pub const TRANSPORT_CONTAINER_NAME: &str = "router";
/// Service account the transport pods run as
pub const TRANSPORT_SERVICE_ACCOUNT_NAME: &str = "skupper";
/// Port serving the router liveness endpoint
pub const TRANSPORT_LIVENESS_PORT: i32 = 9090;
pub const TRANSPORT_LIVENESS_PATH: &str = "/healthz";
pub const TRANSPORT_LIVENESS_INITIAL_DELAY_SECONDS: i32 = 60;
pub const DEFAULT_TRANSPORT_IMAGE: &str = "quay.io/interconnectedcloud/qdrouterd";

/// Controller deployment name
pub const CONTROLLER_DEPLOYMENT_NAME: &str = "skupper-proxy-controller";
/// Name of the controller container inside the controller pod
pub const CONTROLLER_CONTAINER_NAME: &str = "proxy-controller";
/// Service account the controller pods run as
pub const CONTROLLER_SERVICE_ACCOUNT_NAME: &str = "skupper-proxy-controller";
pub const DEFAULT_CONTROLLER_IMAGE: &str = "quay.io/skupper/proxy-controller";

/// API version and kind recorded in owner references to deployments
pub const DEPLOYMENT_API_VERSION: &str = "apps/v1";
pub const DEPLOYMENT_KIND: &str = "Deployment";
