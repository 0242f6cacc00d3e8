use crate::grouping::DomainAdjacency;
use indexmap::IndexMap;
use nalgebra::Point3;

/// Pulls the centers of co-occurring domains toward each other by `blend`.
///
/// Each visited pair is updated from A's pre-blend coordinates, so A and B move by the same
/// amount regardless of which side is processed first. Pairs are visited from both ends, in
/// cluster order. This may undo the minimum separation established by placement.
pub fn refine_centers(
    centers: &mut IndexMap<String, Point3<f64>>,
    adjacency: &DomainAdjacency,
    blend: f64,
) {
    let domains: Vec<String> = centers.keys().cloned().collect();
    for domain_a in &domains {
        let Some(neighbors) = adjacency.neighbors(domain_a) else {
            continue;
        };
        for domain_b in neighbors {
            let (Some(idx_a), Some(idx_b)) =
                (centers.get_index_of(domain_a), centers.get_index_of(domain_b))
            else {
                continue;
            };
            if idx_a == idx_b {
                continue;
            }
            let a = centers[idx_a];
            let b = centers[idx_b];
            centers[idx_a] = a + (b - a) * blend;
            centers[idx_b] = b + (a - b) * blend;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::distance;

    fn adjacency(edges: &[(&str, &str)]) -> DomainAdjacency {
        let mut adj = DomainAdjacency::default();
        for (a, b) in edges {
            adj.add_edge(a, b);
        }
        adj
    }

    #[test]
    fn single_pair_moves_symmetrically() {
        let mut centers = IndexMap::new();
        centers.insert("war".to_string(), Point3::new(0.0, 0.0, 0.0));
        centers.insert("love".to_string(), Point3::new(10.0, 0.0, 0.0));
        refine_centers(&mut centers, &adjacency(&[("war", "love")]), 0.1);

        // Visited from "war" then from "love": 10 -> 8 -> 6.4.
        let gap = distance(&centers["war"], &centers["love"]);
        assert!((gap - 6.4).abs() < 1e-9, "gap {gap}");
        let mid = (centers["war"].x + centers["love"].x) / 2.0;
        assert!((mid - 5.0).abs() < 1e-9);
    }

    #[test]
    fn neighbors_without_a_center_are_ignored() {
        let mut centers = IndexMap::new();
        centers.insert("war".to_string(), Point3::new(1.0, 2.0, 3.0));
        refine_centers(&mut centers, &adjacency(&[("war", "death")]), 0.1);
        assert_eq!(centers["war"], Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn zero_blend_is_a_no_op() {
        let mut centers = IndexMap::new();
        centers.insert("a".to_string(), Point3::new(0.0, 0.0, 0.0));
        centers.insert("b".to_string(), Point3::new(0.0, 12.0, 0.0));
        let before = centers.clone();
        refine_centers(&mut centers, &adjacency(&[("a", "b")]), 0.0);
        assert_eq!(centers, before);
    }
}
