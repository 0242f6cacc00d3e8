use crate::domains::parse_domains;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub const ORIGIN: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn distance(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Spherical-coordinate sample with radius uniform in `[min_radius, max_radius]`.
    pub fn random<R: Rng + ?Sized>(min_radius: f64, max_radius: f64, rng: &mut R) -> Self {
        let radius = min_radius + rng.r#gen::<f64>() * (max_radius - min_radius);
        let theta = rng.r#gen::<f64>() * TAU;
        let phi = rng.r#gen::<f64>() * PI;
        Self {
            x: radius * phi.sin() * theta.cos(),
            y: radius * phi.cos(),
            z: radius * phi.sin() * theta.sin(),
        }
    }

    /// Slot `index` of `count` on three interleaved rings (radius 5, 7, 9) around `y = 3`.
    pub fn on_ring(index: usize, count: usize) -> Self {
        let angle = if count == 0 {
            0.0
        } else {
            (index as f64 / count as f64) * TAU
        };
        let radius = 5.0 + (index % 3) as f64 * 2.0;
        Self {
            x: angle.cos() * radius,
            y: 3.0 + (index as f64).sin() * 2.0,
            z: angle.sin() * radius,
        }
    }
}

/// A mythological figure as handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deity {
    pub id: u32,
    pub name: String,
    pub mythology: String,
    pub position: Position,
    #[serde(default)]
    pub relations: Vec<u32>,
    /// Raw comma-delimited domain tags, e.g. `"war, death"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_cluster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fathers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mothers: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<String>,
}

impl Deity {
    pub fn new(id: u32, name: impl Into<String>, mythology: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            mythology: mythology.into(),
            position: Position::ORIGIN,
            relations: Vec::new(),
            domains: None,
            domain_cluster: None,
            description: None,
            image: None,
            fathers: None,
            mothers: None,
            children: None,
            article: None,
        }
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_domains(mut self, domains: impl Into<String>) -> Self {
        self.domains = Some(domains.into());
        self
    }

    pub fn with_relations(mut self, relations: impl IntoIterator<Item = u32>) -> Self {
        self.relations = relations.into_iter().collect();
        self
    }

    /// Lowercase, trimmed, de-duplicated domain tags in listed order.
    pub fn domain_list(&self) -> Vec<String> {
        parse_domains(self.domains.as_deref())
    }

    pub fn primary_domain(&self) -> Option<String> {
        self.domain_list().into_iter().next()
    }

    pub fn relates_to(&self, id: u32) -> bool {
        self.relations.contains(&id)
    }
}
