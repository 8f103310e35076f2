//! Client seam over the apps/v1 Deployment API

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::api::{Api, PostParams};
use kube::Client;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::{Result, VanError};

/// Trait abstracting the Deployment operations the ensurers need
///
/// Production code uses [`KubeDeployments`]; tests substitute a mock or
/// an in-memory store.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Fetch a deployment by name
    async fn get(&self, namespace: &str, name: &str) -> std::result::Result<Deployment, kube::Error>;

    /// Submit a new deployment
    async fn create(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> std::result::Result<Deployment, kube::Error>;
}

/// DeploymentApi backed by a live cluster
#[derive(Clone)]
pub struct KubeDeployments {
    client: Client,
}

impl KubeDeployments {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl DeploymentApi for KubeDeployments {
    async fn get(&self, namespace: &str, name: &str) -> std::result::Result<Deployment, kube::Error> {
        self.api(namespace).get(name).await
    }

    async fn create(
        &self,
        namespace: &str,
        deployment: &Deployment,
    ) -> std::result::Result<Deployment, kube::Error> {
        self.api(namespace)
            .create(&PostParams::default(), deployment)
            .await
    }
}

/// Whether the API server answered 404 for the request
pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(ae) if ae.code == 404)
}

/// Look up a deployment, mapping "not found" to `None`
pub async fn get_deployment(
    api: &dyn DeploymentApi,
    namespace: &str,
    name: &str,
) -> Result<Option<Deployment>> {
    match api.get(namespace, name).await {
        Ok(deployment) => Ok(Some(deployment)),
        Err(e) if is_not_found(&e) => {
            debug!("Deployment {}/{} not found", namespace, name);
            Ok(None)
        }
        Err(source) => Err(VanError::Lookup {
            name: name.to_string(),
            namespace: namespace.to_string(),
            source,
        }),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_is_not_found() {
        assert!(is_not_found(&not_found()));
        assert!(!is_not_found(&api_error(403, "Forbidden")));
        assert!(!is_not_found(&api_error(409, "AlreadyExists")));
    }

    #[tokio::test]
    async fn test_get_deployment_missing() {
        let api = InMemoryDeployments::default();
        let found = get_deployment(&api, "van", "skupper-router").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_get_deployment_other_error() {
        let mut api = MockDeploymentApi::new();
        api.expect_get()
            .returning(|_, _| Err(api_error(403, "Forbidden")));

        let err = get_deployment(&api, "van", "skupper-router").await.unwrap_err();
        match err {
            VanError::Lookup { name, namespace, .. } => {
                assert_eq!(name, "skupper-router");
                assert_eq!(namespace, "van");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
