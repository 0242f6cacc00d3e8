//! Render-ready view of a deity list.
//!
//! The renderer itself is out of process; this module only derives what it draws: one star per
//! deity, one line per related pair and one label per domain cluster.

use indexmap::IndexMap;
use pantheon_core::colors::{DEFAULT_EDGE_COLOR, DEFAULT_STAR_COLOR, DomainColorRegistry};
use pantheon_core::{Deity, Position};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

const MIN_STAR_SCALE: f64 = 0.5;
const STAR_SCALE_RANGE: f64 = 1.2;
const STAR_SCALE_EXPONENT: f64 = 0.6;
const MIN_EDGE_OPACITY: f64 = 0.08;
const SAME_CLUSTER_OPACITY_BOOST: f64 = 1.5;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneStar {
    pub id: u32,
    pub name: String,
    pub position: Position,
    pub color: String,
    /// Sprite scale; better connected deities are drawn larger.
    pub scale: f64,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneEdge {
    pub from: u32,
    pub to: u32,
    pub color: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterLabel {
    pub domain: String,
    /// Mean position of the cluster's members.
    pub position: Position,
    pub members: usize,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub stars: Vec<SceneStar>,
    pub edges: Vec<SceneEdge>,
    pub labels: Vec<ClusterLabel>,
}

fn star_color(deity: &Deity, colors: &DomainColorRegistry) -> String {
    match deity.domain_cluster.as_deref() {
        Some(domain) => colors.color_for(domain),
        None => DEFAULT_STAR_COLOR.to_string(),
    }
}

fn edge_opacity(distance: f64, same_cluster: bool) -> f64 {
    let base = (0.3 - distance * 0.02).max(MIN_EDGE_OPACITY);
    if same_cluster {
        base * SAME_CLUSTER_OPACITY_BOOST
    } else {
        base
    }
}

/// Derives stars, edges and cluster labels from `deities`.
///
/// Relations pointing at ids that are not in the list are skipped. A relation stored on both ends
/// yields a single edge.
pub fn build_scene(deities: &[Deity], colors: &DomainColorRegistry) -> Scene {
    let max_relations = deities
        .iter()
        .map(|d| d.relations.len())
        .max()
        .unwrap_or(0)
        .max(1);

    let stars: Vec<SceneStar> = deities
        .iter()
        .map(|deity| {
            let importance = deity.relations.len() as f64;
            let normalized = importance / max_relations as f64;
            SceneStar {
                id: deity.id,
                name: deity.name.clone(),
                position: deity.position,
                color: star_color(deity, colors),
                scale: MIN_STAR_SCALE + normalized.powf(STAR_SCALE_EXPONENT) * STAR_SCALE_RANGE,
                opacity: (0.5 + importance * 0.1).min(1.0),
            }
        })
        .collect();

    let mut by_id: FxHashMap<u32, &Deity> = FxHashMap::default();
    for deity in deities {
        by_id.entry(deity.id).or_insert(deity);
    }

    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut edges = Vec::new();
    for deity in deities {
        for &target in &deity.relations {
            let Some(other) = by_id.get(&target) else {
                continue;
            };
            let key = (deity.id.min(target), deity.id.max(target));
            if key.0 == key.1 || !seen.insert(key) {
                continue;
            }
            let shared = match (&deity.domain_cluster, &other.domain_cluster) {
                (Some(a), Some(b)) if a == b => Some(a.as_str()),
                _ => None,
            };
            let color = match shared {
                Some(domain) => colors.color_for(domain),
                None => DEFAULT_EDGE_COLOR.to_string(),
            };
            edges.push(SceneEdge {
                from: deity.id,
                to: target,
                color,
                opacity: edge_opacity(deity.position.distance(&other.position), shared.is_some()),
            });
        }
    }

    let mut sums: IndexMap<&str, (Position, usize)> = IndexMap::new();
    for deity in deities {
        let Some(domain) = deity.domain_cluster.as_deref() else {
            continue;
        };
        let (sum, count) = sums.entry(domain).or_insert((Position::ORIGIN, 0));
        sum.x += deity.position.x;
        sum.y += deity.position.y;
        sum.z += deity.position.z;
        *count += 1;
    }
    let labels = sums
        .into_iter()
        .map(|(domain, (sum, count))| {
            let n = count as f64;
            ClusterLabel {
                domain: domain.to_string(),
                position: Position::new(sum.x / n, sum.y / n, sum.z / n),
                members: count,
                color: colors.color_for(domain),
            }
        })
        .collect();

    tracing::debug!(
        stars = stars.len(),
        edges = edges.len(),
        "scene assembled"
    );

    Scene {
        stars,
        edges,
        labels,
    }
}

/// What the detail panel shows for a selected star.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarDetails {
    pub id: u32,
    pub name: String,
    pub mythology: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_cluster: Option<String>,
    pub domains: Vec<String>,
    /// Names of related deities, in relation order; unknown ids are left out.
    pub related: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl StarDetails {
    pub fn for_deity(deities: &[Deity], id: u32) -> Option<Self> {
        let deity = deities.iter().find(|d| d.id == id)?;
        let related = deity
            .relations
            .iter()
            .filter_map(|rid| deities.iter().find(|d| d.id == *rid))
            .map(|d| d.name.clone())
            .collect();
        Some(Self {
            id: deity.id,
            name: deity.name.clone(),
            mythology: deity.mythology.clone(),
            domain_cluster: deity.domain_cluster.clone(),
            domains: deity.domain_list(),
            related,
            description: deity.description.clone(),
            image: deity.image.clone(),
            article: deity.article.clone(),
        })
    }
}
