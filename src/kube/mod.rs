//! Kubernetes client module
//!
//! Builds the client the Traceflow store talks through. The kubeconfig comes
//! from the configuration (which picks up `KUBECONFIG`); when none is given the
//! default loading strategy applies:
//! 1. In-cluster config (if running in a pod)
//! 2. ~/.kube/config

use std::path::Path;
use std::time::Duration;

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};

use crate::config::ClusterConfig;
use crate::error::{TraceflowError, TraceflowResult};

/// Create a Kubernetes client with the configured timeouts
///
/// Any failure here is a configuration error; the plugin cannot start without a client.
pub async fn create_client(
    kubeconfig: Option<&str>,
    cluster: &ClusterConfig,
) -> TraceflowResult<Client> {
    let mut config = match kubeconfig.filter(|p| !p.is_empty()) {
        Some(path) => load_kubeconfig(Path::new(path)).await?,
        None => Config::infer()
            .await
            .map_err(|e| TraceflowError::Configuration(e.to_string()))?,
    };

    apply_timeouts(&mut config, cluster);
    tracing::debug!("Using API server {}", config.cluster_url);

    Client::try_from(config).map_err(|e| {
        TraceflowError::Configuration(format!("Failed to create Kubernetes client: {}", e))
    })
}

async fn load_kubeconfig(path: &Path) -> TraceflowResult<Config> {
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
        TraceflowError::Configuration(format!(
            "Failed to read kubeconfig {}: {}",
            path.display(),
            e
        ))
    })?;

    Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| {
            TraceflowError::Configuration(format!(
                "Failed to build config from {}: {}",
                path.display(),
                e
            ))
        })
}

fn apply_timeouts(config: &mut Config, cluster: &ClusterConfig) {
    config.connect_timeout = Some(Duration::from_secs(cluster.connect_timeout_secs));
    config.read_timeout = Some(Duration::from_secs(cluster.request_timeout_secs));
    config.write_timeout = Some(Duration::from_secs(cluster.request_timeout_secs));
}
