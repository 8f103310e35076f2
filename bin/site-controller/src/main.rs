use anyhow::{Context, Result};
use kube::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;
use van_api::owner_reference_for;
use van_kube::{
    ensure_controller_deployment, ensure_transport_deployment, EnsureOutcome, KubeDeployments,
    VanError,
};

mod config;

use config::SiteConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting site-controller...");

    let client = Client::try_default().await?;
    let config = SiteConfig::from_env();
    let spec = config.load_spec(client.default_namespace())?;
    spec.validate().map_err(VanError::from)?;

    info!(
        "Ensuring VAN site {} in namespace {}",
        spec.name, spec.namespace
    );

    let api = KubeDeployments::new(client);

    // The transport deployment owns the controller so that removing the
    // router cascades to it.
    let transport = ensure_transport_deployment(&spec, &api).await?;
    report("transport", &transport);

    let owner_ref = owner_reference_for(transport.deployment())
        .map_err(VanError::from)
        .context("Transport deployment cannot own the controller")?;

    let controller = ensure_controller_deployment(&spec, owner_ref, &api).await?;
    report("controller", &controller);

    info!("VAN site {} is in place", spec.name);
    Ok(())
}

fn report(role: &str, outcome: &EnsureOutcome) {
    let name = outcome
        .deployment()
        .metadata
        .name
        .as_deref()
        .unwrap_or("unknown");
    match outcome {
        EnsureOutcome::Created(_) => info!("Created {} deployment {}", role, name),
        EnsureOutcome::Existing(_) => info!("Using existing {} deployment {}", role, name),
    }
}
