use rustc_hash::FxHashSet;

/// Splits a comma-delimited domain string into lowercase, trimmed tags.
///
/// Empty tags are dropped and repeated tags keep only their first occurrence.
pub fn parse_domains(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    let mut seen: FxHashSet<String> = FxHashSet::default();
    raw.split(',')
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty())
        .filter(|d| seen.insert(d.clone()))
        .collect()
}
