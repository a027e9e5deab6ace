//! Recursive cut policies built on [`min_cut`].

use crate::matrix::{connected_components, probability_matrix, sub_matrix, validate_weights};
use crate::{min_cut, GraphCutError};
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// One node of a hierarchical cut tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CutNode {
    /// Original node indices covered by this tree node.
    pub subset: Vec<usize>,
    /// Index of the parent in the returned list; `None` for component roots.
    pub parent: Option<usize>,
    /// Indices of the two halves this node was split into.
    pub children: Option<[usize; 2]>,
    /// Cost of the cut that split this node; `0` for leaves.
    pub cost: f32,
}

impl CutNode {
    fn root(subset: Vec<usize>) -> Self {
        Self {
            subset,
            parent: None,
            children: None,
            cost: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Cut `subset` of `w` in two and map both halves back to node indices of `w`.
fn split(
    w: &DMatrix<f32>,
    subset: &[usize],
) -> Result<(f32, Vec<usize>, Vec<usize>), GraphCutError> {
    let cut = min_cut(&sub_matrix(w, subset))?;
    let a = cut.subset_a.iter().map(|&k| subset[k]).collect();
    let b = cut.subset_b.iter().map(|&k| subset[k]).collect();
    Ok((cut.cost, a, b))
}

/// Split connected components recursively while the minimum cut costs less
/// than `threshold`.
///
/// Subsets that were not split further are returned in the order they were
/// produced: untouched components first, halves appended behind them.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(w), fields(nodes = w.nrows()))
)]
pub fn threshold_cut(w: &DMatrix<f32>, threshold: f32) -> Result<Vec<Vec<usize>>, GraphCutError> {
    validate_weights(w)?;
    let mut subsets = connected_components(w)?;
    let mut was_split = vec![false; subsets.len()];

    let mut i = 0;
    while i < subsets.len() {
        if subsets[i].len() > 1 {
            let (cost, a, b) = split(w, &subsets[i])?;
            if cost < threshold {
                log::trace!(
                    "split subset of {} nodes at cost {cost} into {} + {}",
                    subsets[i].len(),
                    a.len(),
                    b.len()
                );
                was_split[i] = true;
                subsets.push(a);
                subsets.push(b);
                was_split.extend([false, false]);
            }
        }
        i += 1;
    }

    let result: Vec<Vec<usize>> = subsets
        .into_iter()
        .zip(was_split)
        .filter_map(|(subset, split)| (!split).then_some(subset))
        .collect();
    log::debug!("threshold cut at {threshold}: {} subsets", result.len());
    Ok(result)
}

/// [`threshold_cut`] on a boolean relation, weighted with
/// [`probability_matrix`] (symmetric).
pub fn threshold_cut_binary(
    adjacency: &DMatrix<bool>,
    threshold: f32,
) -> Result<Vec<Vec<usize>>, GraphCutError> {
    threshold_cut(&probability_matrix(adjacency, true)?, threshold)
}

/// Build the complete binary cut tree of every connected component.
///
/// Component roots come first; each split appends its two halves, so a
/// parent always precedes its children. Leaves hold single nodes.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(w), fields(nodes = w.nrows()))
)]
pub fn hierarchical_cut(w: &DMatrix<f32>) -> Result<Vec<CutNode>, GraphCutError> {
    validate_weights(w)?;
    let mut nodes: Vec<CutNode> = connected_components(w)?
        .into_iter()
        .map(CutNode::root)
        .collect();

    let mut i = 0;
    while i < nodes.len() {
        if nodes[i].subset.len() > 1 {
            let (cost, a, b) = split(w, &nodes[i].subset)?;
            let first = nodes.len();
            for half in [a, b] {
                nodes.push(CutNode {
                    subset: half,
                    parent: Some(i),
                    children: None,
                    cost: 0.0,
                });
            }
            nodes[i].children = Some([first, first + 1]);
            nodes[i].cost = cost;
        }
        i += 1;
    }

    log::debug!(
        "hierarchical cut over {} nodes: {} tree nodes",
        w.nrows(),
        nodes.len()
    );
    Ok(nodes)
}

/// [`hierarchical_cut`] on a boolean relation, weighted with
/// [`probability_matrix`] (symmetric).
pub fn hierarchical_cut_binary(adjacency: &DMatrix<bool>) -> Result<Vec<CutNode>, GraphCutError> {
    hierarchical_cut(&probability_matrix(adjacency, true)?)
}
