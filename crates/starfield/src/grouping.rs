use crate::model::Node;
use indexmap::{IndexMap, IndexSet};

/// Buckets nodes under their primary domain.
///
/// Buckets appear in first-encounter order and keep input order inside each bucket.
pub fn group_by_primary_domain(nodes: &[Node]) -> IndexMap<String, Vec<&Node>> {
    let mut groups: IndexMap<String, Vec<&Node>> = IndexMap::new();
    for node in nodes {
        groups
            .entry(node.primary_domain().to_string())
            .or_default()
            .push(node);
    }
    groups
}

/// Unordered pair of distinct domains, stored with `a <= b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainPair {
    pub a: String,
    pub b: String,
}

impl DomainPair {
    pub fn new(x: &str, y: &str) -> Self {
        let (a, b) = if x <= y { (x, y) } else { (y, x) };
        Self {
            a: a.to_string(),
            b: b.to_string(),
        }
    }
}

/// Unordered pairs `(domains[i], domains[j])` for `i < j`, skipping identical tags.
pub fn domain_pairs(domains: &[String]) -> impl Iterator<Item = DomainPair> + '_ {
    domains.iter().enumerate().flat_map(move |(i, a)| {
        domains[i + 1..]
            .iter()
            .filter(move |b| *b != a)
            .map(move |b| DomainPair::new(a, b))
    })
}

/// Undirected co-occurrence graph over domain names.
#[derive(Debug, Clone, Default)]
pub struct DomainAdjacency {
    neighbors: IndexMap<String, IndexSet<String>>,
}

impl DomainAdjacency {
    pub fn add_edge(&mut self, a: &str, b: &str) {
        if a == b {
            return;
        }
        self.neighbors
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.neighbors
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    pub fn neighbors(&self, domain: &str) -> Option<&IndexSet<String>> {
        self.neighbors.get(domain)
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.neighbors.get(a).is_some_and(|n| n.contains(b))
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.neighbors.keys().map(String::as_str)
    }

    pub fn edge_count(&self) -> usize {
        self.neighbors.values().map(IndexSet::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }
}

/// Connects every unordered pair of domains listed together on a multi-domain node.
pub fn build_adjacency(nodes: &[Node]) -> DomainAdjacency {
    let mut adjacency = DomainAdjacency::default();
    for node in nodes.iter().filter(|n| n.is_multi_domain()) {
        for pair in domain_pairs(&node.domains) {
            adjacency.add_edge(&pair.a, &pair.b);
        }
    }
    adjacency
}
