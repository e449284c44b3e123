//! Best-effort resolution of the zone this instance runs in.
//!
//! Resolution order: cluster API (node label), node-name suffix match
//! against known zones, static `ZONE` value. Only API answers are cached.

pub mod k8s;

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{debug, warn};

pub use k8s::{KubeNodeLookup, NodeLookup, ZoneLookupError};

/// Zone names recognized as node-name suffixes.
pub const KNOWN_ZONES: &[&str] = &[
    "us-central1-a",
    "us-central1-b",
    "us-central1-c",
    "us-central1-f",
    "us-east1-b",
    "us-east1-c",
    "us-east1-d",
    "us-east4-a",
    "us-east4-b",
    "us-east4-c",
    "us-west1-a",
    "us-west1-b",
    "us-west1-c",
    "europe-west1-b",
    "europe-west1-c",
    "europe-west1-d",
    "europe-west2-a",
    "europe-west2-b",
    "europe-west2-c",
    "europe-west4-a",
    "europe-west4-b",
    "europe-west4-c",
    "asia-east1-a",
    "asia-east1-b",
    "asia-east1-c",
    "asia-northeast1-a",
    "asia-northeast1-b",
    "asia-northeast1-c",
    "asia-southeast1-a",
    "asia-southeast1-b",
    "asia-southeast1-c",
];

/// Outcome of a zone lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ZoneResolution {
    /// Read from the node's zone label.
    FromApi(String),
    /// Derived from the node name or the static configuration.
    FromHeuristic(String),
    Unknown,
}

impl ZoneResolution {
    pub fn as_str(&self) -> &str {
        match self {
            ZoneResolution::FromApi(zone) | ZoneResolution::FromHeuristic(zone) => zone,
            ZoneResolution::Unknown => "unknown",
        }
    }

    /// Short label for where the zone came from.
    pub fn source(&self) -> &'static str {
        match self {
            ZoneResolution::FromApi(_) => "api",
            ZoneResolution::FromHeuristic(_) => "heuristic",
            ZoneResolution::Unknown => "unknown",
        }
    }
}

pub struct ZoneResolver {
    node_name: Option<String>,
    static_zone: Option<String>,
    lookup: Option<Arc<dyn NodeLookup>>,
    cached: OnceCell<String>,
}

impl std::fmt::Debug for ZoneResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneResolver")
            .field("node_name", &self.node_name)
            .field("static_zone", &self.static_zone)
            .field("has_lookup", &self.lookup.is_some())
            .field("cached", &self.cached.get())
            .finish()
    }
}

impl ZoneResolver {
    pub fn new(
        node_name: Option<String>,
        static_zone: Option<String>,
        lookup: Option<Arc<dyn NodeLookup>>,
    ) -> Self {
        Self {
            node_name: node_name.filter(|n| !n.is_empty()),
            static_zone: static_zone.filter(|z| !z.is_empty()),
            lookup,
            cached: OnceCell::new(),
        }
    }

    /// Resolver that never contacts a cluster.
    pub fn fixed(static_zone: Option<String>) -> Self {
        Self::new(None, static_zone, None)
    }

    pub async fn resolve(&self) -> ZoneResolution {
        let Some(node_name) = self.node_name.as_deref() else {
            return ZoneResolution::Unknown;
        };

        if let Some(zone) = self.cached.get() {
            return ZoneResolution::FromApi(zone.clone());
        }

        if let Some(lookup) = &self.lookup {
            match lookup.node_zone(node_name).await {
                Ok(Some(zone)) => {
                    // A concurrent caller may have won the race; both saw the same label.
                    let _ = self.cached.set(zone.clone());
                    return ZoneResolution::FromApi(zone);
                }
                Ok(None) => {
                    debug!(node = node_name, "Node has no zone label");
                }
                Err(e) => {
                    warn!(node = node_name, error = %e, "Zone lookup failed, using heuristic");
                }
            }
        }

        self.heuristic(node_name)
    }

    fn heuristic(&self, node_name: &str) -> ZoneResolution {
        if let Some(zone) = zone_from_node_name(node_name) {
            return ZoneResolution::FromHeuristic(zone.to_string());
        }
        match &self.static_zone {
            Some(zone) => ZoneResolution::FromHeuristic(zone.clone()),
            None => ZoneResolution::Unknown,
        }
    }
}

/// Longest known zone the node name ends with.
pub fn zone_from_node_name(node_name: &str) -> Option<&'static str> {
    KNOWN_ZONES
        .iter()
        .copied()
        .filter(|zone| node_name.ends_with(zone))
        .max_by_key(|zone| zone.len())
}
