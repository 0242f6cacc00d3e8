use crate::{PipelineError, PipelineResult};
use pantheon_core::config::ConstellationConfig;
use pantheon_core::convert::{KnowledgeRecord, convert_record_at};
use pantheon_core::{Deity, DomainColorRegistry, Error as CoreError, Position};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use starfield::{ClusterLayout, ClusterOptions, Node, Placement};
use std::collections::VecDeque;

/// Reads the `layout.*` keys of `config` into [`ClusterOptions`].
///
/// A missing `layout.seed` draws a fresh seed, so unseeded runs differ from each other.
pub fn cluster_options_from_config(config: &ConstellationConfig) -> PipelineResult<ClusterOptions> {
    let base = ClusterOptions::default();
    let attempts = config
        .optional_u64("layout.maxPlacementAttempts")?
        .map(|n| {
            usize::try_from(n).map_err(|_| CoreError::InvalidConfig {
                path: "layout.maxPlacementAttempts".to_string(),
                message: format!("{n} does not fit in usize"),
            })
        })
        .transpose()?
        .unwrap_or(base.max_placement_attempts);
    let seed = match config.optional_u64("layout.seed")? {
        Some(seed) => seed,
        None => rand::thread_rng().r#gen(),
    };

    let options = ClusterOptions {
        random_seed: seed,
        min_cluster_distance: config
            .f64_or("layout.minClusterDistance", base.min_cluster_distance)?,
        max_cluster_distance: config
            .f64_or("layout.maxClusterDistance", base.max_cluster_distance)?,
        vertical_jitter: config.f64_or("layout.verticalJitter", base.vertical_jitter)?,
        max_placement_attempts: attempts,
        attraction_blend: config.f64_or("layout.attractionBlend", base.attraction_blend)?,
        shell_min: config.f64_or("layout.shellMin", base.shell_min)?,
        shell_extra: config.f64_or("layout.shellExtra", base.shell_extra)?,
    };
    options.validate()?;
    Ok(options)
}

/// One pipeline session: configuration, the domain color registry and the random source every
/// layout of the session draws from.
#[derive(Debug)]
pub struct Constellation {
    config: ConstellationConfig,
    options: ClusterOptions,
    clustering: bool,
    colors: DomainColorRegistry,
    rng: StdRng,
}

impl Constellation {
    pub fn new(config: ConstellationConfig) -> PipelineResult<Self> {
        let options = cluster_options_from_config(&config)?;
        let clustering = config.bool_or("clustering.enabled", true)?;
        let colors = DomainColorRegistry::with_seed(options.random_seed);
        let rng = StdRng::seed_from_u64(options.random_seed);
        Ok(Self {
            config,
            options,
            clustering,
            colors,
            rng,
        })
    }

    pub fn config(&self) -> &ConstellationConfig {
        &self.config
    }

    pub fn options(&self) -> &ClusterOptions {
        &self.options
    }

    pub fn clustering_enabled(&self) -> bool {
        self.clustering
    }

    pub fn colors(&self) -> &DomainColorRegistry {
        &self.colors
    }

    /// Converts knowledge-base rows into deities with ids `start_id, start_id + 1, ...`.
    ///
    /// A `start_id` of 0, or one whose last id would not fit in `u32`, is rejected as an invalid
    /// `conversion.startId`.
    ///
    /// With clustering enabled, each deity is positioned exactly once by the domain layout and the
    /// output follows cluster order. Otherwise deities keep input order and are spread on rings.
    pub fn build(
        &mut self,
        records: &[KnowledgeRecord],
        mythology: &str,
        start_id: u32,
    ) -> PipelineResult<Vec<Deity>> {
        let ids = sequential_ids(start_id, records.len())?;
        if !self.clustering {
            let count = records.len();
            return Ok(records
                .iter()
                .zip(ids)
                .enumerate()
                .map(|(index, (record, id))| {
                    convert_record_at(record, mythology, id, Position::on_ring(index, count))
                })
                .collect());
        }

        let nodes: Vec<Node> = records
            .iter()
            .zip(&ids)
            .map(|(record, &id)| Node::new(id, record.domain_list()))
            .collect();
        let layout = self.run_layout(&nodes)?;
        let mut pending = pending_by_id(records.iter().zip(ids).map(|(r, id)| (id, r)));

        let mut out = Vec::with_capacity(records.len());
        for placement in &layout.placements {
            let Some(record) = pending.get_mut(&placement.id).and_then(VecDeque::pop_front) else {
                continue;
            };
            let deity = convert_record_at(
                record,
                mythology,
                placement.id,
                to_position(placement),
            );
            out.push(apply_placement(deity, placement));
        }
        Ok(out)
    }

    /// Clusters already converted deities, replacing positions and appending inferred relations
    /// after any relations they already carry.
    ///
    /// With clustering disabled the list is returned unchanged.
    pub fn cluster(&mut self, deities: Vec<Deity>) -> PipelineResult<Vec<Deity>> {
        if !self.clustering || deities.is_empty() {
            return Ok(deities);
        }
        let nodes: Vec<Node> = deities
            .iter()
            .map(|d| Node::new(d.id, d.domain_list()))
            .collect();
        let layout = self.run_layout(&nodes)?;

        let count = deities.len();
        let mut pending = pending_by_id(deities.into_iter().map(|d| (d.id, d)));
        let mut out = Vec::with_capacity(count);
        for placement in &layout.placements {
            let Some(mut deity) = pending.get_mut(&placement.id).and_then(VecDeque::pop_front)
            else {
                continue;
            };
            deity.position = to_position(placement);
            out.push(apply_placement(deity, placement));
        }
        Ok(out)
    }

    fn run_layout(&mut self, nodes: &[Node]) -> PipelineResult<ClusterLayout> {
        let layout = starfield::layout_with_rng(nodes, &self.options, &mut self.rng)?;
        if layout.fallback_centers > 0 {
            tracing::debug!(
                fallback_centers = layout.fallback_centers,
                clusters = layout.clusters.len(),
                "some cluster centers could not keep the minimum distance"
            );
        }
        Ok(layout)
    }
}

fn sequential_ids(start_id: u32, count: usize) -> PipelineResult<Vec<u32>> {
    let invalid = |message: String| {
        PipelineError::from(CoreError::InvalidConfig {
            path: "conversion.startId".to_string(),
            message,
        })
    };
    if start_id == 0 {
        return Err(invalid("ids start at 1".to_string()));
    }
    if let Some(span) = count.checked_sub(1) {
        let last = u32::try_from(span)
            .ok()
            .and_then(|span| start_id.checked_add(span));
        if last.is_none() {
            return Err(invalid(format!(
                "{count} ids starting at {start_id} do not fit in u32"
            )));
        }
    }
    Ok((0..count).map(|i| start_id + i as u32).collect())
}

/// Input entries queued per id; placements of a repeated id consume them in input order.
fn pending_by_id<T>(entries: impl Iterator<Item = (u32, T)>) -> FxHashMap<u32, VecDeque<T>> {
    let mut pending: FxHashMap<u32, VecDeque<T>> = FxHashMap::default();
    for (id, entry) in entries {
        pending.entry(id).or_default().push_back(entry);
    }
    pending
}

fn to_position(placement: &Placement) -> Position {
    let p = placement.position;
    Position::new(p.x, p.y, p.z)
}

fn apply_placement(mut deity: Deity, placement: &Placement) -> Deity {
    deity.domain_cluster = Some(placement.cluster.clone());
    for &id in &placement.relations {
        if id != deity.id && !deity.relates_to(id) {
            deity.relations.push(id);
        }
    }
    deity
}
