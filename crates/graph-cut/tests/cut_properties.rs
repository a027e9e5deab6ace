use approx::assert_relative_eq;
use graph_cut::{hierarchical_cut, min_cut, sub_matrix, threshold_cut, GraphCutError};
use nalgebra::DMatrix;

/// Small deterministic generator so failures are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// Random symmetric graph with weights in quarter steps (exact in f32).
fn random_graph(rng: &mut Lcg, n: usize, density_percent: u32) -> DMatrix<f32> {
    let mut w = DMatrix::zeros(n, n);
    for i in 0..n {
        for j in i + 1..n {
            if rng.below(100) < density_percent {
                let weight = (1 + rng.below(12)) as f32 * 0.25;
                w[(i, j)] = weight;
                w[(j, i)] = weight;
            }
        }
    }
    w
}

fn crossing_sum(w: &DMatrix<f32>, a: &[usize], b: &[usize]) -> f64 {
    let mut sum = 0.0;
    for &i in a {
        for &j in b {
            sum += w[(i.min(j), i.max(j))] as f64;
        }
    }
    sum
}

/// Minimum over all non-trivial bipartitions.
fn brute_force_min_cut(w: &DMatrix<f32>) -> f64 {
    let n = w.nrows();
    let mut best = f64::INFINITY;
    // Node 0 is always on side `a`, so each bipartition is visited once.
    for mask in 0u32..(1 << (n - 1)) - 1 {
        let mut a = vec![0];
        let mut b = Vec::new();
        for k in 1..n {
            if mask & (1 << (k - 1)) != 0 {
                a.push(k);
            } else {
                b.push(k);
            }
        }
        best = best.min(crossing_sum(w, &a, &b));
    }
    best
}

fn assert_partition(n: usize, parts: &[&[usize]]) {
    let mut seen = vec![0usize; n];
    for part in parts {
        for &k in part.iter() {
            seen[k] += 1;
        }
    }
    assert!(seen.iter().all(|&c| c == 1), "not a partition: {parts:?}");
}

#[test]
fn min_cut_matches_brute_force() {
    let mut rng = Lcg(7);
    for round in 0..400 {
        let n = 2 + (round % 9);
        let density = [20, 45, 70, 100][round % 4];
        let w = random_graph(&mut rng, n, density);

        let cut = min_cut(&w).expect("valid graph");
        assert!(!cut.subset_a.is_empty() && !cut.subset_b.is_empty());
        assert_partition(n, &[&cut.subset_a, &cut.subset_b]);
        assert!(cut.subset_a.windows(2).all(|p| p[0] < p[1]));
        assert!(cut.subset_b.windows(2).all(|p| p[0] < p[1]));

        let crossing = crossing_sum(&w, &cut.subset_a, &cut.subset_b);
        assert_relative_eq!(cut.cost as f64, crossing, epsilon = 1e-6);
        assert_relative_eq!(
            cut.cost as f64,
            brute_force_min_cut(&w),
            epsilon = 1e-6
        );
    }
}

#[test]
fn disconnected_halves_cut_for_free() {
    let mut w = DMatrix::zeros(6, 6);
    for &(i, j) in &[(0, 2), (2, 4), (0, 4), (1, 3), (3, 5), (1, 5)] {
        w[(i, j)] = 2.0f32;
        w[(j, i)] = 2.0f32;
    }
    let cut = min_cut(&w).expect("valid graph");
    assert_eq!(cut.cost, 0.0);
    let mut sides = vec![cut.subset_a, cut.subset_b];
    sides.sort();
    assert_eq!(sides, vec![vec![0, 2, 4], vec![1, 3, 5]]);
}

#[test]
fn only_the_upper_triangle_is_read() {
    let mut w = DMatrix::zeros(3, 3);
    w[(0, 1)] = 1.0f32;
    w[(1, 2)] = 4.0f32;
    // Garbage below the diagonal must not matter.
    w[(2, 0)] = -10.0f32;
    w[(1, 0)] = f32::NAN;
    let cut = min_cut(&w).expect("lower triangle ignored");
    assert_eq!(cut.cost, 1.0);
    assert_eq!(cut.subset_a, vec![0]);
}

#[test]
fn invalid_weights_are_rejected() {
    let mut w = DMatrix::zeros(3, 3);
    w[(0, 2)] = f32::INFINITY;
    assert!(matches!(
        min_cut(&w),
        Err(GraphCutError::InvalidWeight { row: 0, col: 2, .. })
    ));
}

#[test]
fn hierarchical_leaves_partition_all_nodes() {
    let mut rng = Lcg(99);
    for round in 0..60 {
        let n = 1 + (round % 12);
        let w = random_graph(&mut rng, n, 35);
        let nodes = hierarchical_cut(&w).expect("valid graph");

        let leaves: Vec<&[usize]> = nodes
            .iter()
            .filter(|node| node.is_leaf())
            .map(|node| node.subset.as_slice())
            .collect();
        assert_eq!(leaves.len(), n);
        assert!(leaves.iter().all(|leaf| leaf.len() == 1));
        assert_partition(n, &leaves);

        let roots: Vec<&[usize]> = nodes
            .iter()
            .filter(|node| node.is_root())
            .map(|node| node.subset.as_slice())
            .collect();
        assert_partition(n, &roots);

        for node in &nodes {
            if let Some([a, b]) = node.children {
                let mut union = nodes[a].subset.clone();
                union.extend_from_slice(&nodes[b].subset);
                union.sort_unstable();
                let mut parent = node.subset.clone();
                parent.sort_unstable();
                assert_eq!(union, parent);
                assert_eq!(nodes[a].parent, nodes[b].parent);
            }
        }
    }
}

#[test]
fn threshold_cut_leaves_only_expensive_subsets() {
    let mut rng = Lcg(2024);
    for round in 0..80 {
        let n = 2 + (round % 10);
        let w = random_graph(&mut rng, n, 40);
        let threshold = 0.25 * (1 + rng.below(10)) as f32;
        let subsets = threshold_cut(&w, threshold).expect("valid graph");

        let parts: Vec<&[usize]> = subsets.iter().map(Vec::as_slice).collect();
        assert_partition(n, &parts);

        for subset in subsets.iter().filter(|s| s.len() > 1) {
            let cut = min_cut(&sub_matrix(&w, subset)).expect("connected subset");
            assert!(
                cut.cost >= threshold,
                "subset {subset:?} could still be cut at {}",
                cut.cost
            );
        }
    }
}
