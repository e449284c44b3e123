//! Cluster API lookup of a node's zone label.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Node;
use kube::{Api, Client};
use thiserror::Error;
use tokio::sync::OnceCell;

/// Well-known label carrying the node's zone.
pub const ZONE_LABEL: &str = "topology.kubernetes.io/zone";
/// Legacy label still set on older node pools.
pub const LEGACY_ZONE_LABEL: &str = "failure-domain.beta.kubernetes.io/zone";

#[derive(Debug, Error)]
pub enum ZoneLookupError {
    #[error("cluster client unavailable: {0}")]
    ClientUnavailable(String),
    #[error("node lookup failed: {0}")]
    Kube(#[from] kube::Error),
}

/// Reads the zone label of a node by name.
///
/// `Ok(None)` means the node exists but carries neither zone label.
#[async_trait]
pub trait NodeLookup: Send + Sync {
    async fn node_zone(&self, node_name: &str) -> Result<Option<String>, ZoneLookupError>;
}

/// In-cluster lookup using the pod's service account.
///
/// The client is created on first use so that startup never blocks on the
/// cluster API.
#[derive(Default)]
pub struct KubeNodeLookup {
    client: OnceCell<Client>,
}

impl KubeNodeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self) -> Result<&Client, ZoneLookupError> {
        self.client
            .get_or_try_init(|| async {
                Client::try_default()
                    .await
                    .map_err(|e| ZoneLookupError::ClientUnavailable(e.to_string()))
            })
            .await
    }
}

#[async_trait]
impl NodeLookup for KubeNodeLookup {
    async fn node_zone(&self, node_name: &str) -> Result<Option<String>, ZoneLookupError> {
        let client = self.client().await?.clone();
        let nodes: Api<Node> = Api::all(client);
        let node = nodes.get(node_name).await?;
        Ok(zone_from_labels(node.metadata.labels.as_ref()))
    }
}

/// Pick the zone label, preferring the current key over the legacy one.
pub fn zone_from_labels(
    labels: Option<&std::collections::BTreeMap<String, String>>,
) -> Option<String> {
    let labels = labels?;
    labels
        .get(ZONE_LABEL)
        .or_else(|| labels.get(LEGACY_ZONE_LABEL))
        .filter(|z| !z.is_empty())
        .cloned()
}
