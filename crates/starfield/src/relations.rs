use crate::grouping::DomainPair;
use indexmap::{IndexMap, IndexSet};

/// Relation lists keyed by node id, kept in discovery order without duplicates.
#[derive(Debug, Clone, Default)]
pub struct RelationSet {
    relations: IndexMap<u32, IndexSet<u32>>,
}

impl RelationSet {
    /// Registers `id` so it appears in the output even without relations.
    pub fn insert_node(&mut self, id: u32) {
        self.relations.entry(id).or_default();
    }

    /// Adds `a -> b` and `b -> a`. Self links are ignored.
    pub fn link(&mut self, a: u32, b: u32) {
        if a == b {
            return;
        }
        self.relations.entry(a).or_default().insert(b);
        self.relations.entry(b).or_default().insert(a);
    }

    pub fn contains(&self, a: u32, b: u32) -> bool {
        self.relations.get(&a).is_some_and(|r| r.contains(&b))
    }

    pub fn relations_of(&self, id: u32) -> Vec<u32> {
        self.relations
            .get(&id)
            .map(|r| r.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.relations.values().map(IndexSet::len).sum::<usize>() / 2
    }
}

/// Fully connects the members of every cluster.
///
/// `members` lists `(id, cluster)` in output order; each node gains its cluster mates in that
/// order.
pub fn link_within_clusters(relations: &mut RelationSet, members: &[(u32, &str)]) {
    let mut by_cluster: IndexMap<&str, Vec<u32>> = IndexMap::new();
    for &(id, cluster) in members {
        relations.insert_node(id);
        by_cluster.entry(cluster).or_default().push(id);
    }
    for ids in by_cluster.values() {
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                relations.link(a, b);
            }
        }
    }
}

/// First id assigned to each cluster, in one pass over the output order.
pub fn representatives<'a>(members: &[(u32, &'a str)]) -> IndexMap<&'a str, u32> {
    let mut reps: IndexMap<&'a str, u32> = IndexMap::new();
    for &(id, cluster) in members {
        reps.entry(cluster).or_insert(id);
    }
    reps
}

/// Adds one symmetric edge between the representatives of each co-occurring domain pair.
///
/// Pairs whose domains have no representative (a domain that is never primary) or resolve to the
/// same node are skipped. Returns the number of edges added.
pub fn link_across_clusters<'a>(
    relations: &mut RelationSet,
    pairs: impl IntoIterator<Item = &'a DomainPair>,
    representatives: &IndexMap<&str, u32>,
) -> usize {
    let mut added = 0;
    for pair in pairs {
        let (Some(&rep_a), Some(&rep_b)) = (
            representatives.get(pair.a.as_str()),
            representatives.get(pair.b.as_str()),
        ) else {
            continue;
        };
        if rep_a == rep_b || relations.contains(rep_a, rep_b) {
            continue;
        }
        relations.link(rep_a, rep_b);
        added += 1;
    }
    added
}
