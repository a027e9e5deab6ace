//! Adjacency matrix validation and construction helpers.

use crate::GraphCutError;
use nalgebra::DMatrix;

pub(crate) fn ensure_square<T>(m: &DMatrix<T>) -> Result<usize, GraphCutError> {
    if m.nrows() != m.ncols() {
        return Err(GraphCutError::NotSquare {
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(m.nrows())
}

fn ensure_same_shape<A, B>(expected: &DMatrix<A>, m: &DMatrix<B>) -> Result<(), GraphCutError> {
    if expected.shape() != m.shape() {
        return Err(GraphCutError::UnequalSizes {
            expected_rows: expected.nrows(),
            expected_cols: expected.ncols(),
            rows: m.nrows(),
            cols: m.ncols(),
        });
    }
    Ok(())
}

/// Check that `w` is square and its upper triangle holds finite,
/// non-negative weights. Returns the node count.
pub(crate) fn validate_weights(w: &DMatrix<f32>) -> Result<usize, GraphCutError> {
    let n = ensure_square(w)?;
    for row in 0..n {
        for col in row + 1..n {
            let weight = w[(row, col)];
            if !weight.is_finite() || weight < 0.0 {
                return Err(GraphCutError::InvalidWeight { row, col, weight });
            }
        }
    }
    Ok(n)
}

/// Weight of the undirected edge `{i, j}`, read from the upper triangle.
#[inline]
pub(crate) fn edge_weight(w: &DMatrix<f32>, i: usize, j: usize) -> f32 {
    if i < j {
        w[(i, j)]
    } else {
        w[(j, i)]
    }
}

/// Split the graph into its connected components.
///
/// Components are grown breadth-first from the lowest unassigned node; each
/// component lists its nodes in discovery order.
pub fn connected_components(w: &DMatrix<f32>) -> Result<Vec<Vec<usize>>, GraphCutError> {
    let n = ensure_square(w)?;
    let mut visited = vec![false; n];
    let mut components = Vec::new();

    for seed in 0..n {
        if visited[seed] {
            continue;
        }
        visited[seed] = true;
        let mut component = vec![seed];
        let mut head = 0;
        while head < component.len() {
            let node = component[head];
            head += 1;
            for next in 0..n {
                if !visited[next] && next != node && edge_weight(w, node, next) > 0.0 {
                    visited[next] = true;
                    component.push(next);
                }
            }
        }
        components.push(component);
    }
    Ok(components)
}

/// Extract the sub-graph induced by `subset`; row/column `k` of the result is
/// node `subset[k]` of `w`.
///
/// # Panics
/// Panics if an index in `subset` is out of range for `w`.
pub fn sub_matrix(w: &DMatrix<f32>, subset: &[usize]) -> DMatrix<f32> {
    DMatrix::from_fn(subset.len(), subset.len(), |r, c| w[(subset[r], subset[c])])
}

/// Turn a boolean directed adjacency matrix into edge weights.
///
/// Every outgoing edge `a -> b` (`a != b`) of node `a` gets weight
/// `1 / outdegree(a)`. With `symmetric`, `W[a][b]` and `W[b][a]` are both
/// replaced by their mean.
pub fn probability_matrix(
    adjacency: &DMatrix<bool>,
    symmetric: bool,
) -> Result<DMatrix<f32>, GraphCutError> {
    let n = ensure_square(adjacency)?;
    let mut probabilities = DMatrix::<f32>::zeros(n, n);

    for a in 0..n {
        let out_degree = (0..n).filter(|&b| b != a && adjacency[(a, b)]).count();
        if out_degree == 0 {
            continue;
        }
        let p = 1.0 / out_degree as f32;
        for b in 0..n {
            if b != a && adjacency[(a, b)] {
                probabilities[(a, b)] = p;
            }
        }
    }

    if symmetric {
        for i in 0..n {
            for j in i + 1..n {
                let v = 0.5 * (probabilities[(i, j)] + probabilities[(j, i)]);
                probabilities[(i, j)] = v;
                probabilities[(j, i)] = v;
            }
        }
    }
    Ok(probabilities)
}

/// Logical OR of `src` into `dst`.
pub fn merge_matrix(dst: &mut DMatrix<bool>, src: &DMatrix<bool>) -> Result<(), GraphCutError> {
    ensure_same_shape(dst, src)?;
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d |= s;
    }
    Ok(())
}

/// Multiply every weight of `dst` selected by `features` with `weight`.
pub fn weight_matrix(
    dst: &mut DMatrix<f32>,
    features: &DMatrix<bool>,
    weight: f32,
) -> Result<(), GraphCutError> {
    ensure_same_shape(dst, features)?;
    for (d, &selected) in dst.iter_mut().zip(features.iter()) {
        if selected {
            *d *= weight;
        }
    }
    Ok(())
}
