use crate::convert::{BindingValue, bindings_from_value};
use crate::error::Result;
use crate::model::Deity;
use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Row of a relationship query: `?subject ?predicate ?object` with labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipRow {
    pub subject_label: Option<BindingValue>,
    pub object_label: Option<BindingValue>,
}

pub fn parse_relationship_rows(json: &str) -> Result<Vec<RelationshipRow>> {
    bindings_from_value(serde_json::from_str(json)?)
}

/// Adds `subject -> object` relations for rows whose labels both name a deity in `deities`.
///
/// Names resolve to the first deity carrying them. Edges are directed, as the query reports them;
/// self links and already-present relations are skipped. Returns the number of relations added.
pub fn apply_relationship_rows(deities: &mut [Deity], rows: &[RelationshipRow]) -> usize {
    let mut by_name: FxHashMap<String, (u32, usize)> = FxHashMap::default();
    for (idx, deity) in deities.iter().enumerate() {
        by_name
            .entry(deity.name.clone())
            .or_insert((deity.id, idx));
    }

    let mut added = 0;
    for row in rows {
        let subject = row.subject_label.as_ref().map(|b| b.value.as_str());
        let object = row.object_label.as_ref().map(|b| b.value.as_str());
        let (Some(&(subject_id, idx)), Some(&(object_id, _))) = (
            subject.and_then(|s| by_name.get(s)),
            object.and_then(|o| by_name.get(o)),
        ) else {
            tracing::trace!(?subject, ?object, "relationship row does not resolve");
            continue;
        };
        if subject_id == object_id {
            continue;
        }
        let deity = &mut deities[idx];
        if !deity.relates_to(object_id) {
            deity.relations.push(object_id);
            added += 1;
        }
    }
    added
}

/// Concatenates batches converted for different mythologies.
pub fn merge_deities(batches: impl IntoIterator<Item = Vec<Deity>>) -> Vec<Deity> {
    batches.into_iter().flatten().collect()
}
