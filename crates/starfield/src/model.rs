use crate::grouping::DomainAdjacency;
use indexmap::IndexMap;
use nalgebra::Point3;

/// Bucket name for nodes that carry no domain tag.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// A layout input: an id plus its normalized (lowercase, trimmed, de-duplicated) domain tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub id: u32,
    pub domains: Vec<String>,
}

impl Node {
    pub fn new(id: u32, domains: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            id,
            domains: domains.into_iter().map(Into::into).collect(),
        }
    }

    /// The first listed domain, or [`UNKNOWN_DOMAIN`].
    pub fn primary_domain(&self) -> &str {
        self.domains
            .first()
            .map(String::as_str)
            .unwrap_or(UNKNOWN_DOMAIN)
    }

    pub fn is_multi_domain(&self) -> bool {
        self.domains.len() > 1
    }
}

#[derive(Debug, Clone)]
pub struct Placement {
    pub id: u32,
    pub position: Point3<f64>,
    /// Primary domain the node was clustered under.
    pub cluster: String,
    pub relations: Vec<u32>,
}

#[derive(Debug, Clone)]
pub struct Cluster {
    pub domain: String,
    pub center: Point3<f64>,
    pub members: Vec<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ClusterLayout {
    /// One entry per input node, in cluster order then input order within a cluster.
    pub placements: Vec<Placement>,
    /// Clusters with their refined centers, in first-encounter order.
    pub clusters: Vec<Cluster>,
    /// Centers as placed, before co-occurring clusters were pulled together.
    pub centers_before_refine: IndexMap<String, Point3<f64>>,
    /// Number of centers that needed the separation fallback.
    pub fallback_centers: usize,
    pub adjacency: DomainAdjacency,
}

impl ClusterLayout {
    pub fn placement(&self, id: u32) -> Option<&Placement> {
        self.placements.iter().find(|p| p.id == id)
    }

    pub fn cluster(&self, domain: &str) -> Option<&Cluster> {
        self.clusters.iter().find(|c| c.domain == domain)
    }
}
