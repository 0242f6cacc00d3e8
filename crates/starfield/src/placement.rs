//! Random placement primitives: separated cluster centers and shell scatter around a center.
//!
//! Every sampler takes the random source explicitly so callers (and tests) can drive the layout
//! from a seeded generator.

use crate::options::ClusterOptions;
use nalgebra::{Point3, Vector3, distance};
use rand::Rng;
use std::f64::consts::{PI, TAU};

/// Distance substituted when a fallback candidate lands exactly on an existing center.
pub const COINCIDENT_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCenter {
    pub point: Point3<f64>,
    /// `true` when no sampled candidate satisfied the separation and the push fallback ran.
    pub fallback: bool,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + rng.r#gen::<f64>() * (max - min)
}

/// Candidate on a spherical shell around the origin with an independently jittered height.
pub fn random_cluster_position<R: Rng + ?Sized>(
    opts: &ClusterOptions,
    rng: &mut R,
) -> Point3<f64> {
    let radius = uniform(rng, opts.min_cluster_distance, opts.max_cluster_distance);
    let theta = rng.r#gen::<f64>() * TAU;
    let phi = rng.r#gen::<f64>() * PI;
    Point3::new(
        radius * phi.sin() * theta.cos(),
        uniform(rng, -opts.vertical_jitter, opts.vertical_jitter),
        radius * phi.sin() * theta.sin(),
    )
}

/// Pushes tried by the fallback before it moves the candidate outside every center.
const MAX_FALLBACK_PUSHES: usize = 32;

/// Closest point of `existing` to `candidate`, with its distance.
fn nearest(existing: &[Point3<f64>], candidate: &Point3<f64>) -> Option<(Point3<f64>, f64)> {
    existing
        .iter()
        .map(|p| (*p, distance(p, candidate)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Samples up to `max_placement_attempts` candidates and returns the first one at least
/// `min_cluster_distance` from every point of `existing`.
///
/// When none qualifies, the candidate with the most clearance is pushed away from whichever center
/// is too close until all of them are at least `min_cluster_distance - COINCIDENT_EPSILON` away.
pub fn place_center<R: Rng + ?Sized>(
    existing: &[Point3<f64>],
    opts: &ClusterOptions,
    rng: &mut R,
) -> PlacedCenter {
    let min_dist = opts.min_cluster_distance;
    let mut best: Option<(Point3<f64>, f64)> = None;
    for _ in 0..opts.max_placement_attempts {
        let candidate = random_cluster_position(opts, rng);
        let clearance = nearest(existing, &candidate).map_or(f64::INFINITY, |(_, d)| d);
        if clearance >= min_dist {
            return PlacedCenter {
                point: candidate,
                fallback: false,
            };
        }
        if best.is_none_or(|(_, kept)| clearance > kept) {
            best = Some((candidate, clearance));
        }
    }

    let mut candidate = match best {
        Some((point, _)) => point,
        None => random_cluster_position(opts, rng),
    };
    if existing.is_empty() {
        return PlacedCenter {
            point: candidate,
            fallback: false,
        };
    }

    // A push can move the candidate onto another center, so every center is checked again.
    let floor = min_dist - COINCIDENT_EPSILON;
    let mut pushes = 0;
    while let Some((closest, dist)) = nearest(existing, &candidate) {
        if dist >= floor {
            break;
        }
        if pushes == MAX_FALLBACK_PUSHES {
            candidate = beyond_all(existing, &candidate, min_dist);
            break;
        }
        let (dir, dist) = if dist == 0.0 {
            // Any direction works when the points coincide; push along +x.
            (Vector3::x(), COINCIDENT_EPSILON)
        } else {
            ((candidate - closest) / dist, dist)
        };
        candidate += dir * (min_dist - dist);
        pushes += 1;
    }
    tracing::debug!(
        attempts = opts.max_placement_attempts,
        pushes,
        "cluster center separation fallback"
    );
    PlacedCenter {
        point: candidate,
        fallback: true,
    }
}

/// Point in the direction of `candidate` that lies `min_dist` beyond the farthest center.
fn beyond_all(existing: &[Point3<f64>], candidate: &Point3<f64>, min_dist: f64) -> Point3<f64> {
    let reach = existing.iter().map(|p| p.coords.norm()).fold(0.0, f64::max);
    let dir = candidate
        .coords
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector3::x);
    Point3::from(dir * (reach + min_dist))
}

/// Places `count` centers one after another, each separated from all earlier ones.
pub fn place_centers<R: Rng + ?Sized>(
    count: usize,
    opts: &ClusterOptions,
    rng: &mut R,
) -> Vec<PlacedCenter> {
    let mut points: Vec<Point3<f64>> = Vec::with_capacity(count);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        let placed = place_center(&points, opts, rng);
        points.push(placed.point);
        out.push(placed);
    }
    out
}

/// Uniform direction on the unit sphere (Marsaglia 1972).
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vector3<f64> {
    loop {
        let x = rng.r#gen::<f64>() * 2.0 - 1.0;
        let y = rng.r#gen::<f64>() * 2.0 - 1.0;
        let s = x * x + y * y;
        if s >= 1.0 || s == 0.0 {
            continue;
        }
        let factor = (1.0 - s).sqrt();
        return Vector3::new(2.0 * x * factor, 2.0 * y * factor, 2.0 * s - 1.0);
    }
}

/// Random displacement whose length is uniform in `[min_dist, max_dist]`.
pub fn offset_in_shell<R: Rng + ?Sized>(
    min_dist: f64,
    max_dist: f64,
    rng: &mut R,
) -> Vector3<f64> {
    let dir = random_unit_vector(rng);
    dir * uniform(rng, min_dist, max_dist)
}
