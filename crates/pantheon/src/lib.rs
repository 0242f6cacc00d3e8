#![forbid(unsafe_code)]

//! `pantheon` turns knowledge-base result rows (or the classic dataset) into a render-ready
//! constellation of deities.
//!
//! - [`Constellation`] converts rows, clusters them by domain with `starfield` and writes
//!   positions, clusters and inferred relations back onto each [`Deity`].
//! - [`scene::build_scene`] derives star colors, edges and cluster labels for a renderer.

pub use pantheon_core::*;
pub use starfield;

pub mod constellation;
pub mod scene;

pub use constellation::{Constellation, cluster_options_from_config};
pub use scene::{ClusterLabel, Scene, SceneEdge, SceneStar, StarDetails, build_scene};

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Core(#[from] pantheon_core::Error),
    #[error(transparent)]
    Layout(#[from] starfield::Error),
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
