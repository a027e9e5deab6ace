//! Minimum cuts of dense weighted graphs.
//!
//! The graph is given as a square adjacency matrix (`nalgebra::DMatrix<f32>`)
//! whose upper triangle holds the non-negative edge weights; `0` means "no
//! edge" and the diagonal is ignored. The crate provides:
//!
//! - [`min_cut`]: the global minimum two-way cut (Stoer–Wagner with
//!   capforest lower bounds),
//! - [`threshold_cut`]: recursive splitting of connected components while the
//!   cut cost stays below a threshold,
//! - [`hierarchical_cut`]: the full binary cut tree down to single nodes,
//! - helpers to build weight matrices from boolean relations
//!   ([`probability_matrix`], [`merge_matrix`], [`weight_matrix`]).
//!
//! All functions are pure with respect to their inputs except
//! [`merge_matrix`] and [`weight_matrix`], which write into the destination
//! matrix passed by the caller.
//!
//! ```
//! use graph_cut::min_cut;
//! use nalgebra::DMatrix;
//!
//! // Two triangles joined by a single light edge (2 -- 3).
//! let mut w = DMatrix::<f32>::zeros(6, 6);
//! for &(i, j, c) in &[(0, 1, 3.0), (1, 2, 3.0), (0, 2, 3.0),
//!                     (3, 4, 3.0), (4, 5, 3.0), (3, 5, 3.0), (2, 3, 0.5)] {
//!     w[(i, j)] = c;
//!     w[(j, i)] = c;
//! }
//! let cut = min_cut(&w).unwrap();
//! assert_eq!(cut.cost, 0.5);
//! ```

mod error;
mod matrix;
mod min_cut;
mod partition;

pub use error::GraphCutError;
pub use matrix::{
    connected_components, merge_matrix, probability_matrix, sub_matrix, weight_matrix,
};
pub use min_cut::{min_cut, MinCut};
pub use partition::{
    hierarchical_cut, hierarchical_cut_binary, threshold_cut, threshold_cut_binary, CutNode,
};
