//! Stable display colors per domain.
//!
//! Known domains use a fixed palette; any other domain gets a vivid random color the first time
//! it is requested, and keeps it for the lifetime of the registry.

use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Star color for deities without a domain cluster.
pub const DEFAULT_STAR_COLOR: &str = "#FFFFFF";
/// Line color for relations that cross clusters.
pub const DEFAULT_EDGE_COLOR: &str = "#4A5568";

const PALETTE: &[(&str, &str)] = &[
    ("war", "#FF4444"),
    ("love", "#FF69B4"),
    ("wisdom", "#4169E1"),
    ("sea", "#00CED1"),
    ("sky", "#87CEEB"),
    ("death", "#8B4513"),
    ("fertility", "#228B22"),
    ("magic", "#9932CC"),
    ("trade", "#FFD700"),
    ("craft", "#A9A9A9"),
    ("hunt", "#8B7500"),
    ("music", "#FF1493"),
    ("wine", "#722F37"),
    ("forge", "#696969"),
    ("agriculture", "#90EE90"),
    ("beauty", "#FFB6C1"),
    ("justice", "#4B0082"),
    ("night", "#191970"),
    ("time", "#FF6347"),
    ("nature", "#00AA00"),
    ("healing", "#00E800"),
    ("dream", "#0000FF"),
    ("insanity", "#FF00FF"),
    ("sun", "#FFD700"),
];

pub fn palette_color(domain: &str) -> Option<&'static str> {
    PALETTE
        .iter()
        .find(|(name, _)| *name == domain)
        .map(|(_, color)| *color)
}

#[derive(Debug)]
struct RegistryState {
    generated: IndexMap<String, String>,
    rng: StdRng,
}

/// Domain → `#RRGGBB` lookup shared by every caller in a process or session.
#[derive(Debug)]
pub struct DomainColorRegistry {
    state: Mutex<RegistryState>,
}

impl Default for DomainColorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainColorRegistry {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Registry whose generated colors are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            state: Mutex::new(RegistryState {
                generated: IndexMap::new(),
                rng,
            }),
        }
    }

    /// Case-insensitive color lookup; unseen domains are assigned and memoized.
    pub fn color_for(&self, domain: &str) -> String {
        let key = domain.to_lowercase();
        if let Some(color) = palette_color(&key) {
            return color.to_string();
        }

        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(color) = state.generated.get(&key) {
            return color.clone();
        }
        let color = random_vivid_color(&mut state.rng);
        tracing::debug!(domain = %key, %color, "assigned color to unseen domain");
        state.generated.insert(key, color.clone());
        color
    }

    /// Domains that received a generated color so far, in assignment order.
    pub fn generated(&self) -> Vec<(String, String)> {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state
            .generated
            .iter()
            .map(|(d, c)| (d.clone(), c.clone()))
            .collect()
    }
}

/// Hue in `[0, 360)`, saturation in `[60, 90)`%, lightness in `[45, 65)`%, whole-number steps.
pub fn random_vivid_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue = rng.gen_range(0..360u32);
    let saturation = 60 + rng.gen_range(0..30u32);
    let lightness = 45 + rng.gen_range(0..20u32);
    hsl_to_hex(
        f64::from(hue) / 360.0,
        f64::from(saturation) / 100.0,
        f64::from(lightness) / 100.0,
    )
}

/// `h`, `s`, `l` in `[0, 1]`.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let channel = |t: f64| {
        let mut t = t;
        if t < 0.0 {
            t += 1.0;
        }
        if t > 1.0 {
            t -= 1.0;
        }
        let v = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 1.0 / 2.0 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (v * 255.0).round().clamp(0.0, 255.0) as u8
    };
    let r = channel(h + 1.0 / 3.0);
    let g = channel(h);
    let b = channel(h - 1.0 / 3.0);
    format!("#{r:02X}{g:02X}{b:02X}")
}

/// Parses `#RRGGBB` (or `RRGGBB`) into a packed `0xRRGGBB` value.
pub fn color_value(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
