use crate::model::Deity;
use rustc_hash::FxHashSet;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Checks every deity and collects one message per problem; a bad entry never stops the batch.
pub fn validate_deities(deities: &[Deity]) -> ValidationReport {
    let mut errors = Vec::new();
    for (index, deity) in deities.iter().enumerate() {
        if deity.name.trim().is_empty() {
            errors.push(format!("Item at index {index} has no name"));
        }
        if deity.mythology.trim().is_empty() {
            errors.push(format!("Item at index {index} has no mythology"));
        }
        if !deity.position.is_finite() {
            errors.push(format!("Item at index {index} has invalid position"));
        }
        if deity.relates_to(deity.id) {
            errors.push(format!("Item at index {index} relates to itself"));
        }
        let mut seen = FxHashSet::default();
        if let Some(dup) = deity.relations.iter().find(|r| !seen.insert(**r)) {
            errors.push(format!(
                "Item at index {index} lists relation {dup} more than once"
            ));
        }
    }
    ValidationReport {
        valid: errors.is_empty(),
        errors,
    }
}
