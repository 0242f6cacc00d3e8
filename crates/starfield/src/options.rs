use crate::error::{Error, Result};

/// Minimum distance kept between two cluster centers right after placement.
pub const MIN_CLUSTER_DISTANCE: f64 = 10.0;
/// Upper bound of the shell radius cluster centers are sampled on.
pub const MAX_CLUSTER_DISTANCE: f64 = 20.0;
/// Half-height of the vertical band cluster centers are jittered in.
pub const VERTICAL_JITTER: f64 = 5.0;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 200;
pub const ATTRACTION_BLEND: f64 = 0.1;
/// Inner radius of the shell members are scattered in around their center.
pub const CLUSTER_OFFSET_MIN: f64 = 1.0;
pub const CLUSTER_OFFSET_EXTRA: f64 = 1.5;

#[derive(Debug, Clone)]
pub struct ClusterOptions {
    /// Seed for the `StdRng` used by [`crate::layout`]. Callers that want to drive the layout
    /// from their own random source use [`crate::layout_with_rng`] instead.
    pub random_seed: u64,
    pub min_cluster_distance: f64,
    pub max_cluster_distance: f64,
    pub vertical_jitter: f64,
    pub max_placement_attempts: usize,
    /// Fraction each co-occurring pair of cluster centers is pulled toward the other.
    pub attraction_blend: f64,
    pub shell_min: f64,
    pub shell_extra: f64,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            random_seed: 0,
            min_cluster_distance: MIN_CLUSTER_DISTANCE,
            max_cluster_distance: MAX_CLUSTER_DISTANCE,
            vertical_jitter: VERTICAL_JITTER,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            attraction_blend: ATTRACTION_BLEND,
            shell_min: CLUSTER_OFFSET_MIN,
            shell_extra: CLUSTER_OFFSET_EXTRA,
        }
    }
}

impl ClusterOptions {
    pub fn with_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    pub fn shell_max(&self) -> f64 {
        self.shell_min + self.shell_extra
    }

    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("min_cluster_distance", self.min_cluster_distance),
            ("max_cluster_distance", self.max_cluster_distance),
            ("vertical_jitter", self.vertical_jitter),
            ("attraction_blend", self.attraction_blend),
            ("shell_min", self.shell_min),
            ("shell_extra", self.shell_extra),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{name} must be finite, got {value}")));
            }
            if value < 0.0 {
                return Err(invalid(format!("{name} must not be negative, got {value}")));
            }
        }
        if self.min_cluster_distance > self.max_cluster_distance {
            return Err(invalid(format!(
                "min_cluster_distance ({}) exceeds max_cluster_distance ({})",
                self.min_cluster_distance, self.max_cluster_distance
            )));
        }
        if self.attraction_blend > 1.0 {
            return Err(invalid(format!(
                "attraction_blend must lie in [0, 1], got {}",
                self.attraction_blend
            )));
        }
        Ok(())
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidOptions { message }
}
