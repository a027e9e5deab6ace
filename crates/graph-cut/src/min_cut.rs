//! Global minimum cut (Stoer–Wagner with capforest contraction).
//!
//! Every round runs one maximum-adjacency ordering over the current
//! contracted graph. The ordering gives
//!
//! - a lower bound `q(e)` on the local edge connectivity of every scanned
//!   edge (the capforest bound),
//! - the classic cut-of-the-phase: the last vertex `t` is separated from the
//!   one before it, `s`, by no cut lighter than its own weighted degree.
//!
//! `lambda` is the lightest single super-node cut seen so far. Edges with
//! `q(e) >= lambda`, and the pair `{s, t}`, cannot be crossed by a cut lighter
//! than `lambda`, so their endpoints are merged. The loop stops when two
//! super-nodes remain or `lambda` drops to zero.
//!
//! Ties are broken by position: the maximum-adjacency ordering picks the
//! lowest-index vertex among equally connected ones, and `lambda` only moves
//! on a strict improvement, so the first lightest super-node wins.

use crate::matrix::{edge_weight, validate_weights};
use crate::GraphCutError;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A two-way partition of the node set and the weight of the edges it cuts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MinCut {
    /// Sum of the weights of all edges between `subset_a` and `subset_b`.
    pub cost: f32,
    /// Side that was isolated as a single super-node, sorted ascending.
    pub subset_a: Vec<usize>,
    /// Complement of `subset_a`, sorted ascending.
    pub subset_b: Vec<usize>,
}

/// Compute a global minimum cut of the weighted graph `adjacency`.
///
/// Only the upper triangle is read. Fails for non-square matrices, invalid
/// weights, and graphs with fewer than two nodes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(adjacency), fields(nodes = adjacency.nrows()))
)]
pub fn min_cut(adjacency: &DMatrix<f32>) -> Result<MinCut, GraphCutError> {
    let n = validate_weights(adjacency)?;
    if n < 2 {
        return Err(GraphCutError::TooFewNodes { nodes: n });
    }

    let mut graph = ContractedGraph::from_matrix(adjacency);
    let mut lambda = graph.lightest_node();
    let mut rounds = 0usize;

    while graph.len() > 2 && lambda.cost > 0.0 {
        rounds += 1;
        let phase = graph.max_adjacency_phase();

        let t_cut = graph.degree(phase.t);
        if t_cut < lambda.cost {
            lambda = Lambda {
                cost: t_cut,
                members: graph.members[phase.t].clone(),
            };
        }

        let mut merges = Merges::new(graph.len());
        for bound in &phase.bounds {
            if bound.q >= lambda.cost {
                merges.union(bound.a, bound.b);
            }
        }
        merges.union(phase.s, phase.t);

        let contracted = graph.contract(&mut merges);
        if contracted.len() < 2 {
            break;
        }
        graph = contracted;

        let candidate = graph.lightest_node();
        if candidate.cost < lambda.cost {
            lambda = candidate;
        }
    }

    log::trace!(
        "min cut over {n} nodes: lambda={} after {rounds} contraction rounds",
        lambda.cost
    );
    Ok(lambda.into_partition(adjacency))
}

struct Lambda {
    cost: f64,
    members: Vec<usize>,
}

impl Lambda {
    fn into_partition(self, adjacency: &DMatrix<f32>) -> MinCut {
        let n = adjacency.nrows();
        let mut in_a = vec![false; n];
        for &m in &self.members {
            in_a[m] = true;
        }
        let subset_a: Vec<usize> = (0..n).filter(|&i| in_a[i]).collect();
        let subset_b: Vec<usize> = (0..n).filter(|&i| !in_a[i]).collect();

        let mut cost = 0.0f64;
        for &a in &subset_a {
            for &b in &subset_b {
                cost += edge_weight(adjacency, a, b) as f64;
            }
        }
        MinCut {
            cost: cost as f32,
            subset_a,
            subset_b,
        }
    }
}

struct EdgeBound {
    a: usize,
    b: usize,
    q: f64,
}

struct Phase {
    s: usize,
    t: usize,
    bounds: Vec<EdgeBound>,
}

/// Dense symmetric graph over super-nodes; `members[v]` lists the original
/// nodes merged into super-node `v`.
struct ContractedGraph {
    n: usize,
    weights: Vec<f64>,
    members: Vec<Vec<usize>>,
}

impl ContractedGraph {
    fn from_matrix(adjacency: &DMatrix<f32>) -> Self {
        let n = adjacency.nrows();
        let mut weights = vec![0.0; n * n];
        for i in 0..n {
            for j in i + 1..n {
                let w = adjacency[(i, j)] as f64;
                weights[i * n + j] = w;
                weights[j * n + i] = w;
            }
        }
        Self {
            n,
            weights,
            members: (0..n).map(|i| vec![i]).collect(),
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.n
    }

    #[inline]
    fn weight(&self, a: usize, b: usize) -> f64 {
        self.weights[a * self.n + b]
    }

    fn degree(&self, v: usize) -> f64 {
        self.weights[v * self.n..(v + 1) * self.n].iter().sum()
    }

    fn lightest_node(&self) -> Lambda {
        let mut best = 0;
        let mut best_cost = self.degree(0);
        for v in 1..self.n {
            let cost = self.degree(v);
            if cost < best_cost {
                best = v;
                best_cost = cost;
            }
        }
        Lambda {
            cost: best_cost,
            members: self.members[best].clone(),
        }
    }

    /// One maximum-adjacency ordering; requires at least two super-nodes.
    fn max_adjacency_phase(&self) -> Phase {
        let n = self.n;
        let mut visited = vec![false; n];
        let mut r = vec![0.0f64; n];
        let mut order = Vec::with_capacity(n);
        let mut bounds = Vec::new();

        while let Some(v) = most_connected(&visited, &r) {
            visited[v] = true;
            for u in 0..n {
                if visited[u] {
                    continue;
                }
                let w = self.weight(v, u);
                if w > 0.0 {
                    r[u] += w;
                    bounds.push(EdgeBound { a: v, b: u, q: r[u] });
                }
            }
            order.push(v);
        }

        Phase {
            s: order[n - 2],
            t: order[n - 1],
            bounds,
        }
    }

    /// Merge every group of `merges` into one super-node. Super-nodes keep
    /// the order of their first member position.
    fn contract(&self, merges: &mut Merges) -> ContractedGraph {
        let mut group_of_root = vec![usize::MAX; self.n];
        let mut group = vec![0usize; self.n];
        let mut members: Vec<Vec<usize>> = Vec::new();
        for v in 0..self.n {
            let root = merges.root(v);
            if group_of_root[root] == usize::MAX {
                group_of_root[root] = members.len();
                members.push(Vec::new());
            }
            group[v] = group_of_root[root];
            members[group[v]].extend_from_slice(&self.members[v]);
        }

        let k = members.len();
        let mut weights = vec![0.0; k * k];
        for a in 0..self.n {
            for b in a + 1..self.n {
                let (ga, gb) = (group[a], group[b]);
                if ga != gb {
                    let w = self.weight(a, b);
                    weights[ga * k + gb] += w;
                    weights[gb * k + ga] += w;
                }
            }
        }
        ContractedGraph {
            n: k,
            weights,
            members,
        }
    }
}

fn most_connected(visited: &[bool], r: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (v, &done) in visited.iter().enumerate() {
        if done {
            continue;
        }
        match best {
            Some(b) if r[b] >= r[v] => {}
            _ => best = Some(v),
        }
    }
    best
}

/// Disjoint sets over super-node positions; the lower index stays root.
struct Merges {
    parent: Vec<usize>,
}

impl Merges {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn root(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.root(a);
        let rb = self.root(b);
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[hi] = lo;
        }
    }
}
