#![forbid(unsafe_code)]

//! Headless 3D domain-cluster layout.
//!
//! Nodes carrying domain tags are grouped under their primary domain; each group gets a cluster
//! center placed at a minimum distance from the others, co-occurring clusters are pulled slightly
//! together, and members are scattered in a shell around their center (or around the average of
//! all of their domains' centers). Relations are inferred: a full mesh inside each cluster plus
//! one representative edge per co-occurring domain pair.

pub mod error;
pub mod grouping;
pub mod model;
pub mod options;
pub mod placement;
pub mod refine;
pub mod relations;

pub use error::{Error, Result};
pub use grouping::{DomainAdjacency, DomainPair, build_adjacency, group_by_primary_domain};
pub use model::{Cluster, ClusterLayout, Node, Placement, UNKNOWN_DOMAIN};
pub use options::ClusterOptions;

use indexmap::{IndexMap, IndexSet};
use nalgebra::Point3;
use rand::{Rng, SeedableRng, rngs::StdRng};
use relations::RelationSet;

/// Layout entry point, seeded from `opts.random_seed`.
pub fn layout(nodes: &[Node], opts: &ClusterOptions) -> Result<ClusterLayout> {
    let mut rng = StdRng::seed_from_u64(opts.random_seed);
    layout_with_rng(nodes, opts, &mut rng)
}

/// Same as [`layout`], drawing every random sample from `rng`.
pub fn layout_with_rng<R: Rng + ?Sized>(
    nodes: &[Node],
    opts: &ClusterOptions,
    rng: &mut R,
) -> Result<ClusterLayout> {
    opts.validate()?;
    if nodes.is_empty() {
        return Ok(ClusterLayout::default());
    }

    let groups = group_by_primary_domain(nodes);
    let adjacency = build_adjacency(nodes);

    let placed = placement::place_centers(groups.len(), opts, rng);
    let fallback_centers = placed.iter().filter(|p| p.fallback).count();
    let centers_before_refine: IndexMap<String, Point3<f64>> = groups
        .keys()
        .cloned()
        .zip(placed.iter().map(|p| p.point))
        .collect();

    let mut centers = centers_before_refine.clone();
    refine::refine_centers(&mut centers, &adjacency, opts.attraction_blend);

    let mut placements: Vec<Placement> = Vec::with_capacity(nodes.len());
    let mut spanned_pairs: IndexSet<DomainPair> = IndexSet::new();
    for (domain, members) in &groups {
        let cluster_center = centers[domain.as_str()];
        for node in members {
            let target = if node.is_multi_domain() {
                spanned_pairs.extend(grouping::domain_pairs(&node.domains));
                blended_center(&node.domains, &centers).unwrap_or(cluster_center)
            } else {
                cluster_center
            };
            let offset = placement::offset_in_shell(opts.shell_min, opts.shell_max(), rng);
            placements.push(Placement {
                id: node.id,
                position: target + offset,
                cluster: domain.clone(),
                relations: Vec::new(),
            });
        }
    }

    let members: Vec<(u32, &str)> = placements
        .iter()
        .map(|p| (p.id, p.cluster.as_str()))
        .collect();
    let mut relation_set = RelationSet::default();
    relations::link_within_clusters(&mut relation_set, &members);
    let reps = relations::representatives(&members);
    let cross_edges = relations::link_across_clusters(&mut relation_set, &spanned_pairs, &reps);

    for p in &mut placements {
        p.relations = relation_set.relations_of(p.id);
    }

    let clusters = groups
        .iter()
        .map(|(domain, members)| Cluster {
            domain: domain.clone(),
            center: centers[domain.as_str()],
            members: members.iter().map(|n| n.id).collect(),
        })
        .collect();

    tracing::debug!(
        nodes = nodes.len(),
        clusters = groups.len(),
        fallback_centers,
        adjacency_edges = adjacency.edge_count(),
        intra_and_cross_edges = relation_set.edge_count(),
        cross_edges,
        "cluster layout finished"
    );

    Ok(ClusterLayout {
        placements,
        clusters,
        centers_before_refine,
        fallback_centers,
        adjacency,
    })
}

/// Coordinate-wise average of the centers of every domain that has a cluster.
fn blended_center(
    domains: &[String],
    centers: &IndexMap<String, Point3<f64>>,
) -> Option<Point3<f64>> {
    let resolved: Vec<&Point3<f64>> = domains
        .iter()
        .filter_map(|d| centers.get(d.as_str()))
        .collect();
    if resolved.is_empty() {
        return None;
    }
    let sum = resolved
        .iter()
        .fold(nalgebra::Vector3::<f64>::zeros(), |acc, c| acc + c.coords);
    Some(Point3::from(sum / resolved.len() as f64))
}
