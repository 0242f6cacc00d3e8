use nalgebra::distance;
use rand::SeedableRng;
use rand::rngs::StdRng;
use starfield::placement::COINCIDENT_EPSILON;
use starfield::{ClusterLayout, ClusterOptions, Node, layout, layout_with_rng};
use std::collections::BTreeSet;

fn node(id: u32, domains: &str) -> Node {
    Node::new(
        id,
        domains
            .split(',')
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty()),
    )
}

fn mixed_nodes() -> Vec<Node> {
    vec![
        node(1, "war"),
        node(2, "war"),
        node(3, "war, love"),
        node(4, "love"),
        node(5, ""),
        node(6, "sea, sky, war"),
        node(7, "sky"),
        node(8, ""),
        node(9, "death"),
        node(10, "love, beauty"),
        node(11, "wisdom, war"),
        node(12, "sea"),
    ]
}

fn relations_of(out: &ClusterLayout, id: u32) -> &[u32] {
    &out.placement(id).expect("placement").relations
}

#[test]
fn every_node_gets_one_finite_position_and_valid_relations() {
    let nodes = mixed_nodes();
    for seed in 0..20 {
        let out = layout(&nodes, &ClusterOptions::default().with_seed(seed)).unwrap();
        assert_eq!(out.placements.len(), nodes.len());

        let ids: BTreeSet<u32> = nodes.iter().map(|n| n.id).collect();
        let placed: BTreeSet<u32> = out.placements.iter().map(|p| p.id).collect();
        assert_eq!(ids, placed);

        for p in &out.placements {
            assert!(p.position.iter().all(|c| c.is_finite()));
            assert!(!p.relations.contains(&p.id), "self loop on {}", p.id);
            let unique: BTreeSet<u32> = p.relations.iter().copied().collect();
            assert_eq!(unique.len(), p.relations.len(), "duplicate edge on {}", p.id);
            assert!(p.relations.iter().all(|r| ids.contains(r)));
        }
    }
}

#[test]
fn relations_are_symmetric() {
    let nodes = mixed_nodes();
    let out = layout(&nodes, &ClusterOptions::default().with_seed(3)).unwrap();
    for a in &out.placements {
        for &b in &a.relations {
            assert!(
                relations_of(&out, b).contains(&a.id),
                "{} -> {b} has no reverse edge",
                a.id
            );
        }
    }
}

fn assert_centers_separated(out: &ClusterLayout, opts: &ClusterOptions) {
    let centers: Vec<_> = out.centers_before_refine.values().collect();
    for (i, a) in centers.iter().enumerate() {
        for b in &centers[i + 1..] {
            let d = distance(*a, *b);
            assert!(
                d >= opts.min_cluster_distance - COINCIDENT_EPSILON,
                "centers {a} and {b} are {d} apart"
            );
        }
    }
}

#[test]
fn centers_are_separated_before_refinement() {
    let opts = ClusterOptions::default();
    let nodes: Vec<Node> = (1..=10).map(|i| node(i, &format!("domain{i}"))).collect();
    for seed in 0..10 {
        let out = layout(&nodes, &opts.clone().with_seed(seed)).unwrap();
        assert_eq!(out.centers_before_refine.len(), 10);
        assert_centers_separated(&out, &opts);
    }
}

#[test]
fn fallback_centers_keep_the_minimum_distance() {
    let opts = ClusterOptions::default();
    let nodes: Vec<Node> = (1..=30).map(|i| node(i, &format!("domain{i}"))).collect();
    let mut fallbacks = 0;
    for seed in 0..20 {
        let out = layout(&nodes, &opts.clone().with_seed(seed)).unwrap();
        assert_eq!(out.centers_before_refine.len(), 30);
        fallbacks += out.fallback_centers;
        assert_centers_separated(&out, &opts);
    }
    assert!(fallbacks > 0, "thirty clusters should crowd the default shell");
}

#[test]
fn refinement_may_pull_co_occurring_centers_closer() {
    let nodes = vec![node(1, "war, love"), node(2, "love")];
    let out = layout(&nodes, &ClusterOptions::default().with_seed(8)).unwrap();
    let before = distance(
        &out.centers_before_refine["war"],
        &out.centers_before_refine["love"],
    );
    let after = distance(
        &out.cluster("war").unwrap().center,
        &out.cluster("love").unwrap().center,
    );
    assert!(before >= ClusterOptions::default().min_cluster_distance - 1e-9);
    // Each pair is visited from both ends: 0.8 * 0.8 of the placed gap.
    assert!((after - before * 0.64).abs() < 1e-9, "before {before} after {after}");
}

#[test]
fn single_domain_nodes_sit_in_the_shell_around_their_center() {
    let nodes = mixed_nodes();
    let opts = ClusterOptions::default().with_seed(17);
    let out = layout(&nodes, &opts).unwrap();
    for n in nodes.iter().filter(|n| n.domains.len() == 1) {
        let p = out.placement(n.id).unwrap();
        assert_eq!(p.cluster, n.domains[0]);
        let center = out.cluster(&p.cluster).unwrap().center;
        let r = distance(&p.position, &center);
        assert!(
            (opts.shell_min - 1e-9..=opts.shell_max() + 1e-9).contains(&r),
            "node {} at radius {r}",
            n.id
        );
    }
}

#[test]
fn war_and_love_scenario() {
    let nodes = vec![
        node(1, "war"),
        node(2, "war"),
        node(3, "war,love"),
        node(4, "love"),
    ];
    let opts = ClusterOptions::default().with_seed(1);
    let out = layout(&nodes, &opts).unwrap();

    assert!(relations_of(&out, 1).contains(&2));
    assert!(relations_of(&out, 2).contains(&1));

    let p3 = out.placement(3).unwrap();
    assert_eq!(p3.cluster, "war");
    let war = out.cluster("war").unwrap().center;
    let love = out.cluster("love").unwrap().center;
    let mid = nalgebra::center(&war, &love);
    let r = distance(&p3.position, &mid);
    assert!(
        (opts.shell_min - 1e-9..=opts.shell_max() + 1e-9).contains(&r),
        "entity 3 is {r} away from the war/love midpoint"
    );

    // Representatives are the first member of each cluster: 1 for war, 4 for love.
    assert_eq!(relations_of(&out, 1), &[2, 3, 4]);
    assert_eq!(relations_of(&out, 4), &[1]);
    assert_eq!(relations_of(&out, 3), &[1, 2]);
}

#[test]
fn domainless_nodes_only_relate_to_each_other() {
    let nodes = mixed_nodes();
    let out = layout(&nodes, &ClusterOptions::default().with_seed(4)).unwrap();
    let unknown: BTreeSet<u32> = [5, 8].into_iter().collect();
    for id in &unknown {
        let p = out.placement(*id).unwrap();
        assert_eq!(p.cluster, "unknown");
        let rel: BTreeSet<u32> = p.relations.iter().copied().collect();
        let expected: BTreeSet<u32> = unknown.iter().copied().filter(|o| o != id).collect();
        assert_eq!(rel, expected);
    }
    for p in out.placements.iter().filter(|p| p.cluster != "unknown") {
        assert!(p.relations.iter().all(|r| !unknown.contains(r)));
    }
}

#[test]
fn secondary_only_domains_do_not_create_cross_edges() {
    // "death" never appears first, so it has no cluster and no representative.
    let nodes = vec![node(1, "war, death"), node(2, "war")];
    let out = layout(&nodes, &ClusterOptions::default()).unwrap();
    assert!(out.cluster("death").is_none());
    assert_eq!(relations_of(&out, 1), &[2]);
    assert!(out.adjacency.has_edge("war", "death"));
}

#[test]
fn output_is_cluster_ordered() {
    let nodes = vec![node(1, "sea"), node(2, "war"), node(3, "sea")];
    let out = layout(&nodes, &ClusterOptions::default()).unwrap();
    let order: Vec<u32> = out.placements.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![1, 3, 2]);
    assert_eq!(out.clusters[0].members, vec![1, 3]);
}

#[test]
fn same_seed_reproduces_the_same_layout() {
    let nodes = mixed_nodes();
    let opts = ClusterOptions::default().with_seed(99);
    let a = layout(&nodes, &opts).unwrap();
    let b = layout(&nodes, &opts).unwrap();
    for (pa, pb) in a.placements.iter().zip(&b.placements) {
        assert_eq!(pa.id, pb.id);
        assert_eq!(pa.position, pb.position);
        assert_eq!(pa.relations, pb.relations);
    }

    let mut rng = StdRng::seed_from_u64(99);
    let c = layout_with_rng(&nodes, &opts, &mut rng).unwrap();
    assert_eq!(a.placements[0].position, c.placements[0].position);
}

#[test]
fn crowded_layouts_still_terminate_with_the_fallback() {
    let opts = ClusterOptions {
        max_placement_attempts: 3,
        ..Default::default()
    };
    let nodes: Vec<Node> = (1..=40).map(|i| node(i, &format!("d{i}"))).collect();
    let out = layout(&nodes, &opts).unwrap();
    assert_eq!(out.clusters.len(), 40);
    assert!(out.fallback_centers > 0);
    assert!(
        out.centers_before_refine
            .values()
            .all(|c| c.iter().all(|v| v.is_finite()))
    );
    assert_centers_separated(&out, &opts);
}
