#![forbid(unsafe_code)]

//! Deity model and data plumbing for pantheon (headless).
//!
//! Converts knowledge-base result rows into [`Deity`] records, assigns stable display colors per
//! domain, validates deity lists and ships the classic hand-placed dataset. Spatial layout lives in
//! the `starfield` crate.

pub mod colors;
pub mod config;
pub mod convert;
pub mod dataset;
pub mod domains;
pub mod error;
pub mod model;
pub mod mythology;
pub mod relationships;
pub mod validate;

pub use colors::{DEFAULT_EDGE_COLOR, DEFAULT_STAR_COLOR, DomainColorRegistry};
pub use config::ConstellationConfig;
pub use convert::{KnowledgeRecord, convert_record, convert_record_at, parse_bindings};
pub use dataset::classic_pantheon;
pub use domains::parse_domains;
pub use error::{Error, Result};
pub use model::{Deity, Position};
pub use mythology::Mythology;
pub use relationships::{RelationshipRow, apply_relationship_rows, parse_relationship_rows};
pub use validate::{ValidationReport, validate_deities};
